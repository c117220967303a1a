pub type LanescanResult<T> = Result<T, LanescanError>;

#[derive(thiserror::Error, Debug)]
pub enum LanescanError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LanescanError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            LanescanError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(LanescanError::encode("x").to_string().contains("encode error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = LanescanError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
