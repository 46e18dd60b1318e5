//! CLI error handling with user-facing messages.

use outlook_core::CatalogError;
use std::fmt;
use std::path::PathBuf;
use std::process;

#[derive(Debug)]
pub enum CliError {
    /// Logging could not be started.
    LoggingInit(String),
    /// An input file could not be read.
    Read { path: PathBuf, error: std::io::Error },
    /// The overlay bundle is not valid loader JSON.
    Bundle {
        path: PathBuf,
        error: serde_json::Error,
    },
    /// The severity catalog failed validation.
    Catalog(CatalogError),
    /// The run report could not be serialized.
    Output(serde_json::Error),
}

impl CliError {
    /// Prints the error and exits with status 1.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {self}");
        if let CliError::Bundle { .. } = self {
            eprintln!();
            eprintln!("Expected a JSON array of overlays:");
            eprintln!("  [{{\"identifier\": \"... Outlook DDMMYYYY HHMM - DDMMYYYY HHMM\", \"regions\": [...]}}]");
        }
        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {msg}"),
            CliError::Read { path, error } => {
                write!(f, "Failed to read '{}': {error}", path.display())
            }
            CliError::Bundle { path, error } => {
                write!(f, "Invalid overlay bundle '{}': {error}", path.display())
            }
            CliError::Catalog(err) => write!(f, "Invalid severity catalog: {err}"),
            CliError::Output(err) => write!(f, "Failed to render report: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Read { error, .. } => Some(error),
            CliError::Bundle { error, .. } => Some(error),
            CliError::Catalog(err) => Some(err),
            CliError::Output(err) => Some(err),
            CliError::LoggingInit(_) => None,
        }
    }
}

impl From<CatalogError> for CliError {
    fn from(value: CatalogError) -> Self {
        CliError::Catalog(value)
    }
}
