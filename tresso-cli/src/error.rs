use thiserror::Error;
use tresso_config::ConfigError;
use tresso_kanban::TressoError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tresso(#[from] TressoError),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Text for stderr; storage details stay in the log
    pub fn display_message(&self) -> String {
        match self {
            Self::Tresso(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}
