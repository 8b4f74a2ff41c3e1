use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// rsrcfork - browse and extract Classic Mac OS resource forks
#[derive(Debug, Parser)]
#[command(name = "rsrcfork", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Where to read the fork from and which resources to consider.
#[derive(Debug, Args)]
pub struct ForkArgs {
    /// File whose resource fork is read.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Treat the file's ordinary content as the fork (e.g. a saved `.rsrc` file).
    #[arg(long)]
    pub data_fork: bool,

    /// Only resources of this type, e.g. `STR#` or `ICN#`. Shorter codes are padded with spaces.
    #[arg(long = "type", value_name = "CODE")]
    pub type_code: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List resources in on-disk data order: type, ID, name, attributes and size.
    List {
        #[command(flatten)]
        fork: ForkArgs,
    },

    /// Write resource payloads to `<type>_<id>.bin` files.
    Extract {
        #[command(flatten)]
        fork: ForkArgs,

        /// Extract only the resource with this ID (combine with --type).
        #[arg(long, value_name = "N", allow_negative_numbers = true)]
        id: Option<i16>,

        /// Output directory (default: current dir).
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}
