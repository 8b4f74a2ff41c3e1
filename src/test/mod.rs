//! Shared fixtures for unit tests.


pub use builders::ForkBuilder;
