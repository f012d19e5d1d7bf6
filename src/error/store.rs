use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot persist {class} without an identity")]
    MissingIdentity { class: String },

    #[error("store backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn missing_identity(class: impl Into<String>) -> Self {
        Self::MissingIdentity {
            class: class.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
