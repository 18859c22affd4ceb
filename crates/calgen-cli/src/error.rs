//! CLI error types.

use std::fmt;

use calgen_core::{SheetError, ValidationError};
use calgen_providers::ProviderError;

/// Result type for command operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur while running a command.
///
/// Commands translate these into a single printed diagnostic line; the
/// variants only exist so each component can keep returning its own typed
/// error.
#[derive(Debug)]
pub enum CliError {
    /// Invalid event request or sheet contents.
    Validation(ValidationError),
    /// The sheet file could not be read.
    Sheet(SheetError),
    /// The provider rejected or failed a remote call (including
    /// authentication).
    Provider(ProviderError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{}", err),
            Self::Sheet(err) => write!(f, "{}", err),
            Self::Provider(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Sheet(err) => Some(err),
            Self::Provider(err) => Some(err),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<SheetError> for CliError {
    fn from(err: SheetError) -> Self {
        Self::Sheet(err)
    }
}

impl From<ProviderError> for CliError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}
