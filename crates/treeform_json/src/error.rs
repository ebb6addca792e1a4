use alloc::string::{String, ToString};

use thiserror::Error;
use treeform_codec::{DeserializeError, SerializeError};

/// Anything that can go wrong between a runtime value and JSON text.
#[derive(Debug, Error)]
pub enum JsonError {
    /// The value could not be converted into a tree.
    #[error(transparent)]
    Serialize(#[from] SerializeError),

    /// The tree could not be converted into the requested target.
    #[error(transparent)]
    Deserialize(#[from] DeserializeError),

    /// The input text is not valid JSON.
    #[error("malformed JSON: {message}")]
    Syntax { message: String },
}

// `serde_json::Error` does not implement `core::error::Error` without `std`,
// so only its rendered message is kept.
impl From<serde_json::Error> for JsonError {
    fn from(error: serde_json::Error) -> Self {
        JsonError::Syntax {
            message: error.to_string(),
        }
    }
}
