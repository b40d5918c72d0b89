use std::{fmt, io::Read, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{encoding::EncodingPair, error::CsvWriterError};

/// Default column delimiter.
pub const DEFAULT_COLUMN_DELIMITER: &str = ",";
/// Default line delimiter.
pub const DEFAULT_LINE_DELIMITER: &str = "\n";

/// Rule deciding whether rendered values are wrapped in double quotes.
///
/// The numeric codes (`1` for [`EnclosureRule::None`], `2` for [`EnclosureRule::All`])
/// are accepted through [`TryFrom<i64>`]; any other code is rejected with
/// [`CsvWriterError::InvalidEnclosureRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnclosureRule {
    /// Values are joined with the column delimiter as-is.
    None = 1,
    /// Every value is wrapped in `"`.
    #[default]
    All = 2,
}

impl EnclosureRule {
    pub fn code(self) -> i64 {
        self as i64
    }
}

impl fmt::Display for EnclosureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnclosureRule::None => f.write_str("none"),
            EnclosureRule::All => f.write_str("all"),
        }
    }
}

impl TryFrom<i64> for EnclosureRule {
    type Error = CsvWriterError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(EnclosureRule::None),
            2 => Ok(EnclosureRule::All),
            other => Err(CsvWriterError::InvalidEnclosureRule {
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for EnclosureRule {
    type Err = CsvWriterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(EnclosureRule::None),
            "all" => Ok(EnclosureRule::All),
            _ => Err(CsvWriterError::InvalidEnclosureRule {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<&str> for EnclosureRule {
    type Error = CsvWriterError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Formatting and flushing options of a [`CsvWriter`](crate::csv::csv_writer::CsvWriter).
///
/// Missing fields take their default when deserialized:
///
/// ```
/// use buffered_csv_writer::core::config::{CsvWriterConfig, EnclosureRule};
///
/// let config = CsvWriterConfig::from_json_str(r#"{ "column_delimiter": ";", "enclosure_rule": "none" }"#).unwrap();
///
/// assert_eq!(config.column_delimiter, ";");
/// assert_eq!(config.line_delimiter, "\n");
/// assert_eq!(config.enclosure_rule, EnclosureRule::None);
/// assert_eq!(config.max_buffered_rows, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvWriterConfig {
    pub column_delimiter: String,
    pub line_delimiter: String,
    pub enclosure_rule: EnclosureRule,
    /// Row count triggering an automatic flush, `0` disables it.
    pub max_buffered_rows: usize,
    pub output_path: Option<PathBuf>,
    pub encodings: Option<EncodingPair>,
}

impl Default for CsvWriterConfig {
    fn default() -> Self {
        CsvWriterConfig {
            column_delimiter: DEFAULT_COLUMN_DELIMITER.to_string(),
            line_delimiter: DEFAULT_LINE_DELIMITER.to_string(),
            enclosure_rule: EnclosureRule::All,
            max_buffered_rows: 0,
            output_path: None,
            encodings: None,
        }
    }
}

impl CsvWriterConfig {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_json_reader<R: Read>(rdr: R) -> serde_json::Result<Self> {
        serde_json::from_reader(rdr)
    }
}
