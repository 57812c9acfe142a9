use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by data readers.
///
/// Absent data is never an error: readers return an empty row set or `None`.
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    #[error("Snapshot unreadable: {0}")]
    Unreadable(String),

    #[error("Malformed data: {0}")]
    Malformed(String),
}

impl From<ReaderError> for DomainError {
    fn from(err: ReaderError) -> Self {
        let code = match &err {
            ReaderError::Unavailable(_) => ErrorCode::DataSourceUnavailable,
            ReaderError::Unreadable(_) | ReaderError::Malformed(_) => ErrorCode::SnapshotUnreadable,
        };
        DomainError::new(code, err.to_string())
    }
}

impl From<std::io::Error> for ReaderError {
    fn from(err: std::io::Error) -> Self {
        ReaderError::Unreadable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_domain_error_codes() {
        let err: DomainError = ReaderError::Unavailable("offline".into()).into();
        assert_eq!(err.code, ErrorCode::DataSourceUnavailable);

        let err: DomainError = ReaderError::Malformed("bad row".into()).into();
        assert_eq!(err.code, ErrorCode::SnapshotUnreadable);
        assert!(err.message.contains("bad row"));
    }
}
