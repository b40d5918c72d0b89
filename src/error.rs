use std::{collections::BTreeMap, convert::Infallible, io, path::PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Numeric code of [`CsvWriterError::InvalidEnclosureRule`].
pub const INVALID_ENCLOSURE_RULE: u16 = 1;
/// Numeric code of [`CsvWriterError::UnsupportedEncoding`].
pub const UNSUPPORTED_ENCODING: u16 = 2;
/// Numeric code of [`CsvWriterError::FlushFailed`].
pub const ERROR_WHILE_SAVING_TO_FILE: u16 = 3;

#[derive(Error, Debug)]
/// CSV writer error
pub enum CsvWriterError {
    #[error("Invalid enclosure rule: {value}")]
    InvalidEnclosureRule { value: String },

    #[error("Unsupported encoding: {encoding}")]
    UnsupportedEncoding { encoding: String },

    #[error("Error during saving to the file to clear the buffer. File: {}", path.display())]
    FlushFailed {
        path: PathBuf,
        buffered_rows: usize,
        #[source]
        source: io::Error,
    },
}

/// A single supplementary detail attached to an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Detail {
    Text(String),
    Number(u64),
}

impl CsvWriterError {
    /// Kind code of this error, stable across releases.
    pub fn code(&self) -> u16 {
        match self {
            CsvWriterError::InvalidEnclosureRule { .. } => INVALID_ENCLOSURE_RULE,
            CsvWriterError::UnsupportedEncoding { .. } => UNSUPPORTED_ENCODING,
            CsvWriterError::FlushFailed { .. } => ERROR_WHILE_SAVING_TO_FILE,
        }
    }

    /// Supplementary details relevant to the error kind.
    ///
    /// Keys are fixed per variant:
    /// - `value` for an invalid enclosure rule,
    /// - `encoding` for an unsupported encoding,
    /// - `path`, `buffered_rows` and `reason` for a failed flush.
    pub fn details(&self) -> BTreeMap<&'static str, Detail> {
        let mut details = BTreeMap::new();
        match self {
            CsvWriterError::InvalidEnclosureRule { value } => {
                details.insert("value", Detail::Text(value.clone()));
            }
            CsvWriterError::UnsupportedEncoding { encoding } => {
                details.insert("encoding", Detail::Text(encoding.clone()));
            }
            CsvWriterError::FlushFailed {
                path,
                buffered_rows,
                source,
            } => {
                details.insert("path", Detail::Text(path.display().to_string()));
                details.insert("buffered_rows", Detail::Number(*buffered_rows as u64));
                details.insert("reason", Detail::Text(source.to_string()));
            }
        }
        details
    }
}

impl From<Infallible> for CsvWriterError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use super::*;

    #[test]
    fn codes_should_match_error_kinds() {
        let invalid = CsvWriterError::InvalidEnclosureRule {
            value: "3".to_string(),
        };
        let unsupported = CsvWriterError::UnsupportedEncoding {
            encoding: "BOGUS-ENCODING".to_string(),
        };
        let flush = CsvWriterError::FlushFailed {
            path: PathBuf::from("/tmp/out.csv"),
            buffered_rows: 2,
            source: io::Error::new(ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(invalid.code(), INVALID_ENCLOSURE_RULE);
        assert_eq!(unsupported.code(), UNSUPPORTED_ENCODING);
        assert_eq!(flush.code(), ERROR_WHILE_SAVING_TO_FILE);
    }

    #[test]
    fn flush_failed_should_name_the_path() {
        let error = CsvWriterError::FlushFailed {
            path: PathBuf::from("/tmp/out.csv"),
            buffered_rows: 2,
            source: io::Error::new(ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(
            error.to_string(),
            "Error during saving to the file to clear the buffer. File: /tmp/out.csv"
        );

        let details = error.details();
        assert_eq!(
            details.get("path"),
            Some(&Detail::Text("/tmp/out.csv".to_string()))
        );
        assert_eq!(details.get("buffered_rows"), Some(&Detail::Number(2)));
        assert_eq!(details.get("reason"), Some(&Detail::Text("denied".to_string())));
    }

    #[test]
    fn details_should_serialize_as_plain_values() {
        let error = CsvWriterError::UnsupportedEncoding {
            encoding: "BOGUS-ENCODING".to_string(),
        };

        let json = serde_json::to_string(&error.details()).unwrap();
        assert_eq!(json, r#"{"encoding":"BOGUS-ENCODING"}"#);
    }
}
