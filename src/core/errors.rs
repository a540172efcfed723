use thiserror::Error;

pub type Result<T> = std::result::Result<T, DtreeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    InvalidModel,
    InvalidData,
    Io,
    Json,
    Csv,
}

/// Errors raised by training, prediction, validation and the file collaborators.
#[derive(Debug, Error)]
pub enum DtreeError {
    /// Caller supplied data or configuration that cannot be trained or predicted on.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The model is missing its root or violates a structural invariant.
    #[error("invalid model: {0}")]
    InvalidModel(String),
    /// An input file parsed but its contents cannot become records.
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl DtreeError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        DtreeError::InvalidInput(msg.into())
    }

    pub fn invalid_model(msg: impl Into<String>) -> Self {
        DtreeError::InvalidModel(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DtreeError::InvalidInput(_) => ErrorKind::InvalidInput,
            DtreeError::InvalidModel(_) => ErrorKind::InvalidModel,
            DtreeError::InvalidData(_) => ErrorKind::InvalidData,
            DtreeError::Io(_) => ErrorKind::Io,
            DtreeError::Json(_) => ErrorKind::Json,
            DtreeError::Csv(_) => ErrorKind::Csv,
        }
    }

    /// Message without the kind prefix added by `Display`.
    pub fn detail(&self) -> String {
        match self {
            DtreeError::InvalidInput(m) | DtreeError::InvalidModel(m) | DtreeError::InvalidData(m) => {
                m.clone()
            }
            DtreeError::Io(e) => e.to_string(),
            DtreeError::Json(e) => e.to_string(),
            DtreeError::Csv(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            DtreeError::invalid_input("x").kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            DtreeError::invalid_model("x").kind(),
            ErrorKind::InvalidModel
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(DtreeError::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn display_prefixes_kind_but_detail_does_not() {
        let err = DtreeError::invalid_model("model has no root node");
        assert_eq!(err.to_string(), "invalid model: model has no root node");
        assert_eq!(err.detail(), "model has no root node");
    }
}
