use crate::error::{ArrangeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NamingConfig {
    pub source_extension: String,
    pub artifact_extension: String,
    pub folder_prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub banner: bool,
    pub dry_run: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            source_extension: "asy".to_string(),
            artifact_extension: "pdf".to_string(),
            folder_prefix: "size".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            banner: true,
            dry_run: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ArrangeError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ArrangeError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ArrangeError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["asyarrange.toml", ".asyarrange.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref ext) = cli_args.source_extension {
            self.naming.source_extension = normalize_extension(ext);
        }

        if let Some(ref ext) = cli_args.artifact_extension {
            self.naming.artifact_extension = normalize_extension(ext);
        }

        if let Some(dry_run) = cli_args.dry_run {
            self.output.dry_run = dry_run;
        }

        if let Some(banner) = cli_args.banner {
            self.output.banner = banner;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ArrangeError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ArrangeError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let naming = &self.naming;

        for (label, ext) in [
            ("Source extension", &naming.source_extension),
            ("Artifact extension", &naming.artifact_extension),
        ] {
            if ext.is_empty() {
                return Err(ArrangeError::Config {
                    message: format!("{} must not be empty", label),
                });
            }
            if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(ArrangeError::Config {
                    message: format!("{} must be alphanumeric: {}", label, ext),
                });
            }
        }

        if naming.source_extension == naming.artifact_extension {
            return Err(ArrangeError::Config {
                message: "Source and artifact extensions must differ".to_string(),
            });
        }

        // Digits directly after the prefix belong to the size token.
        if naming.folder_prefix.is_empty()
            || !naming.folder_prefix.chars().all(|c| c.is_ascii_alphabetic() || c == '_' || c == '-')
        {
            return Err(ArrangeError::Config {
                message: format!(
                    "Folder prefix must be non-empty letters, '_' or '-': {:?}",
                    naming.folder_prefix
                ),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_string()
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub source_extension: Option<String>,
    pub artifact_extension: Option<String>,
    pub dry_run: Option<bool>,
    pub banner: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_extension(mut self, ext: Option<String>) -> Self {
        self.source_extension = ext;
        self
    }

    pub fn with_artifact_extension(mut self, ext: Option<String>) -> Self {
        self.artifact_extension = ext;
        self
    }

    pub fn with_dry_run(mut self, dry_run: Option<bool>) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_banner(mut self, banner: Option<bool>) -> Self {
        self.banner = banner;
        self
    }
}
