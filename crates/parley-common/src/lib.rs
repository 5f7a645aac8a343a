pub mod errors;
pub mod types;

pub use errors::{ConfigError, ParleyError, StorageError};
pub use types::BackendKind;

pub type Result<T> = std::result::Result<T, ParleyError>;
