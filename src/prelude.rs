//! # rsrcfork Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the rsrcfork
//! library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all rsrcfork operations
pub use crate::Error;

/// The result type used throughout rsrcfork
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Decoded container and the one-shot decoding function
pub use crate::{parse_resource_fork, ResourceFork};

/// Acquisition strategies and loaded fork bytes
pub use crate::{File, Source};

// ================================================================================================
// Resources
// ================================================================================================

/// Resource identity, attributes and payload
pub use crate::rsrc::{MapAttributes, Resource, ResourceAttributes, TypeCode};
