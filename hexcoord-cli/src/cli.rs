//! CLI definition and argument parsing for hexcoord-cli.

use clap::{Parser, Subcommand};
use hexcoord::{Database, HexcoordOptions, ShapeService};
use std::path::PathBuf;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "hexcoord", author, version, about = "Hex-grid shape recorder")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(crate::commands::serve::ServeArgs),

    /// Write every shape to an XLSX file
    Export(crate::commands::export::ExportArgs),

    /// Delete all shapes and points
    Clear(crate::commands::clear::ClearArgs),
}

// ============================================================================
// GLOBAL FLAGS
// ============================================================================

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalFlags {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// hexcoord home directory (database, config.json, templates)
    #[arg(long, global = true, env = "HEXCOORD_HOME")]
    pub home: Option<PathBuf>,
}

impl GlobalFlags {
    pub fn home_dir(&self) -> PathBuf {
        self.home
            .clone()
            .unwrap_or_else(|| HexcoordOptions::default().home_dir)
    }

    /// Options from `<home>/config.json`, with the home dir from flags.
    pub fn load_options(&self) -> HexcoordOptions {
        crate::config::load_config(&self.home_dir())
    }

    pub fn open_service(&self, options: &HexcoordOptions) -> anyhow::Result<ShapeService> {
        let db = Database::open(&options.db_path())?;
        Ok(ShapeService::new(db))
    }
}
