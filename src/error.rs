pub type VariatoResult<T> = Result<T, VariatoError>;

#[derive(thiserror::Error, Debug)]
pub enum VariatoError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("measurement error: {0}")]
    Measurement(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VariatoError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            VariatoError::configuration("x")
                .to_string()
                .contains("configuration error:")
        );
        assert!(
            VariatoError::measurement("x")
                .to_string()
                .contains("measurement error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = VariatoError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
