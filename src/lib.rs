//! cleanscan - interactive duplicate file and empty folder cleaner.
//!
//! Finds byte-identical files via staged BLAKE3 hashing (size bucket,
//! 64 KiB prehash, full hash) plus empty directories, and drives an
//! interactive review loop that moves redundant items to the system
//! trash.

pub mod actions;
pub mod cli;
pub mod duplicates;
pub mod logging;
pub mod scanner;
pub mod session;

use anyhow::{ensure, Context, Result};

use actions::SystemTrash;
use cli::Cli;
use session::{App, StdinPrompt};

/// Run the application with parsed CLI arguments.
///
/// # Errors
///
/// Fails if the root path does not exist or is not a directory. Everything
/// past startup is best-effort: scan, hash, and deletion failures are
/// absorbed per item inside the interactive loop.
pub fn run_app(cli: Cli) -> Result<()> {
    let root = cli
        .path
        .canonicalize()
        .with_context(|| format!("cannot resolve path: {}", cli.path.display()))?;
    ensure!(root.is_dir(), "not a directory: {}", root.display());

    let mut app = App::new(root, cli.recursive, SystemTrash, StdinPrompt);
    app.run()
}
