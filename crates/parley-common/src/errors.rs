use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    /// A standard directory or file location could not be resolved, created or written.
    #[error("config path error: {0}")]
    PathError(String),

    #[error("unknown backend '{0}' (supported: gpt-4o, gemini-flash)")]
    UnknownBackend(String),

    /// The selected backend needs a credential that is not available.
    #[error("missing credential for backend '{backend}': set {env_var}")]
    MissingCredential { backend: String, env_var: String },

    #[error("failed to initialize backend client: {0}")]
    ClientInit(String),
}

/// Failures of the durable message log.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage corrupt: {0}")]
    Corrupt(String),

    #[error("storage query failed: {0}")]
    Query(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ParleyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
