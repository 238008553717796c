//! Command-line interface definitions, using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Scan the current directory (direct children only)
//! cleanscan
//!
//! # Scan a folder and its whole subtree
//! cleanscan ~/Downloads -r
//!
//! # Verbose mode for debugging
//! cleanscan -v ~/Downloads
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Interactive duplicate file and empty folder cleaner.
///
/// Finds byte-identical files via staged BLAKE3 hashing and empty
/// directories under a root path, then lets you review and move the
/// redundant ones to the system trash.
#[derive(Debug, Parser)]
#[command(name = "cleanscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder to scan
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Scan subdirectories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["cleanscan"]);
        assert_eq!(cli.path, PathBuf::from("."));
        assert!(!cli.recursive);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_path_and_recursive() {
        let cli = Cli::parse_from(["cleanscan", "/tmp/stuff", "-r"]);
        assert_eq!(cli.path, PathBuf::from("/tmp/stuff"));
        assert!(cli.recursive);
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::parse_from(["cleanscan", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["cleanscan", "-q", "-v"]).is_err());
    }
}
