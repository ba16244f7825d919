use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowsetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL '{0}': {1}")]
    InvalidUrl(String, url::ParseError),

    /// Non-2xx response from the controller API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("controller configuration missing from response")]
    MissingConfig,

    #[error("type '{0}' not found in catalog")]
    TypeNotFound(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FlowsetError>;
