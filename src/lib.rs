pub mod arranger;
pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, NamingConfig, OutputConfig};
pub use error::{ArrangeError, Result, UserFriendlyError};

// Core functionality re-exports
pub use arranger::{
    ArrangeReport, ArrangeStatus, Arranger, Categorizer, FileMover, MoveKind, MoveRecord,
    SizeGroups,
};
pub use scanner::{CandidateFile, Discovery, FolderScanner, NamingRules, SizeToken};
pub use ui::{LogLevel, LogSink, MemorySink, NullSink, OutputFormatter, OutputMode};

use std::path::Path;

/// Main library interface: configuration plus the console sink.
pub struct AsyArrange {
    config: Config,
    output_mode: OutputMode,
    verbose: u8,
    quiet: bool,
}

impl AsyArrange {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            output_mode,
            verbose,
            quiet,
        })
    }

    /// Create an AsyArrange instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        )
    }

    /// Arrange `folder`, logging every step to the terminal.
    pub fn arrange_folder<P: AsRef<Path>>(&self, folder: P) -> Result<ArrangeReport> {
        let arranger =
            Arranger::new(folder.as_ref(), &self.config)?.with_sink(self.output_formatter());
        Ok(arranger.arrange())
    }

    pub fn output_formatter(&self) -> OutputFormatter {
        OutputFormatter::new(self.output_mode, self.verbose, self.quiet)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn handle_error(&self, error: &ArrangeError) {
        self.output_formatter().print_user_friendly_error(error);
    }
}

/// Arrange `folder` with default naming rules, logging into `sink`.
pub fn arrange_folder_simple<P, S>(folder: P, sink: S) -> Result<ArrangeReport>
where
    P: AsRef<Path>,
    S: LogSink + 'static,
{
    let arranger = Arranger::new(folder.as_ref(), &Config::default())?.with_sink(sink);
    Ok(arranger.arrange())
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_asyarrange_creation() {
        let app = AsyArrange::new(Config::default(), OutputMode::Plain, 0, true);
        assert!(app.is_ok());
        assert_eq!(app.unwrap().config().naming.source_extension, "asy");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.naming.source_extension.clear();

        let result = AsyArrange::new(config, OutputMode::Plain, 0, true);
        assert!(matches!(result, Err(ArrangeError::Config { .. })));
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        AsyArrange::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[naming]"));
        assert!(content.contains("[output]"));
    }

    #[test]
    fn test_arrange_folder_simple() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.asy"), "size(5);\n").unwrap();

        let sink = MemorySink::new();
        let report = arrange_folder_simple(temp_dir.path(), sink.clone()).unwrap();

        assert_eq!(report.source_moves(), 1);
        assert!(temp_dir.path().join("size5").join("a.asy").exists());
        assert!(sink.contains("Moved file: a.asy"));
    }

    #[test]
    fn test_from_cli_uses_verbosity_level() {
        let cli = Cli::try_parse_from(["asyarrange", "figs", "-vv", "--output-format", "plain"])
            .unwrap();
        let app = AsyArrange::from_cli(&cli).unwrap();
        assert_eq!(app.verbose, 2);
        assert!(matches!(app.output_mode, OutputMode::Plain));

        let cli = Cli::try_parse_from(["asyarrange", "figs", "-q"]).unwrap();
        let app = AsyArrange::from_cli(&cli).unwrap();
        assert_eq!(app.verbose, 0);
        assert!(app.quiet);
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }
}
