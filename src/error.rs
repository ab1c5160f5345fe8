//! Errors for input the library parses from outside (key names, toolbar
//! action names, replay scripts).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown key `{0}`")]
    UnknownKey(String),

    #[error("unknown syntax action `{0}`")]
    UnknownSyntax(String),

    #[error("invalid replay script: {0}")]
    Script(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
