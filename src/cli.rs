use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "asyarrange")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sort Asymptote figure sources into size folders")]
#[command(
    long_about = "asyarrange reads the `size(N);` line of every .asy file in a figure folder \
                  and moves the file, together with its rendered .pdf, into a `sizeN` \
                  subfolder. Existing size folders are re-checked so edited figures move \
                  to the folder matching their new size."
)]
#[command(after_help = "EXAMPLES:\n  \
    asyarrange figures\n  \
    asyarrange figures --dry-run\n  \
    asyarrange figures --artifact-ext eps -v\n  \
    asyarrange figures --config my-config.toml --output-format json")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Folder holding the .asy figure sources
    #[arg(required_unless_present = "generate_config")]
    pub folder: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for log lines and the final report
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Source file extension
    #[arg(long, help = "Extension of figure sources (default: asy)")]
    pub source_ext: Option<String>,

    /// Rendered output extension
    #[arg(long, help = "Extension of rendered outputs moved alongside (default: pdf)")]
    pub artifact_ext: Option<String>,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be moved without moving anything)
    #[arg(long, help = "Show what would be moved without touching any file")]
    pub dry_run: bool,

    /// Do not print the start banner
    #[arg(long)]
    pub no_banner: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_source_extension(self.source_ext.clone())
            .with_artifact_extension(self.artifact_ext.clone())
            .with_dry_run(self.dry_run.then_some(true))
            .with_banner(self.no_banner.then_some(false))
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
