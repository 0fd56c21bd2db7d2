use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArrangeError {
    #[error("Figure folder does not exist or is empty: {}", path.display())]
    FolderUnavailable { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No size declaration found in {}", path.display())]
    NoSizeDeclared { path: PathBuf },

    #[error("Failed to move {} to {}: {source}", path.display(), destination.display())]
    MoveFailed {
        path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid naming pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ArrangeError {
    fn user_message(&self) -> String {
        match self {
            ArrangeError::FolderUnavailable { path } => {
                format!(
                    "Figure folder: {} does not exist or is empty.",
                    path.display()
                )
            }
            ArrangeError::FileUnreadable { path, source } => {
                format!("Could not read {}: {}", path.display(), source)
            }
            ArrangeError::NoSizeDeclared { path } => {
                format!(
                    "Asy file: {} does not contain size information. This file has been ignored.",
                    path.display()
                )
            }
            ArrangeError::MoveFailed { path, .. } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                format!("Move file: {} failed.", name)
            }
            ArrangeError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ArrangeError::FolderUnavailable { .. } => Some(
                "Check the folder path and make sure it contains your .asy figure sources.".to_string()
            ),
            ArrangeError::NoSizeDeclared { .. } => Some(
                "Add a line of the form `size(200);` on its own, with no surrounding spaces.".to_string()
            ),
            ArrangeError::MoveFailed { .. } => Some(
                "Make sure the destination does not already contain a file with that name and that you have write permission.".to_string()
            ),
            ArrangeError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            ArrangeError::InvalidPattern(_) => Some(
                "Use plain alphanumeric values for extensions and the folder prefix.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ArrangeError {
    fn from(error: toml::de::Error) -> Self {
        ArrangeError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArrangeError>;
