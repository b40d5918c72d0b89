use std::{
    fmt,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, error, info, warn};

use crate::{
    core::{
        config::{CsvWriterConfig, EnclosureRule},
        field::{Field, Row},
        opener::{FileOpener, FsFileOpener},
    },
    encoding::EncodingPair,
    error::CsvWriterError,
};

/// Buffers rows in memory and renders them as CSV text.
///
/// Configuration setters return the writer so calls can be chained. Setters
/// that validate their input return a `Result` and fail fast.
///
/// Rows are flushed to the output path in append mode as soon as the buffer
/// reaches [`max_buffered_rows`](CsvWriter::max_buffered_rows), when both are
/// set. [`save`](CsvWriter::save) on the other hand never fails loudly: it
/// reports the outcome as a `bool`.
///
/// Enclosed values are not escaped: a value containing `"` or the column
/// delimiter renders ambiguously.
pub struct CsvWriter {
    rows: Vec<Row>,
    config: CsvWriterConfig,
    opener: Box<dyn FileOpener>,
}

impl fmt::Debug for CsvWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvWriter")
            .field("rows", &self.rows.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        CsvWriter::new()
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        CsvWriter::with_config(CsvWriterConfig::default())
    }

    /// Creates a writer flushing to `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let mut writer = CsvWriter::new();
        writer.set_output_path(Some(path));
        writer
    }

    /// Creates a writer from an already validated configuration.
    pub fn with_config(config: CsvWriterConfig) -> Self {
        CsvWriter {
            rows: Vec::new(),
            config,
            opener: Box::new(FsFileOpener),
        }
    }

    pub fn config(&self) -> &CsvWriterConfig {
        &self.config
    }

    /// Replaces the whole configuration, buffered rows are kept.
    pub fn set_config(&mut self, config: CsvWriterConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Replaces the file system used by [`save`](CsvWriter::save) and automatic flushes.
    pub fn set_file_opener<O: FileOpener + 'static>(&mut self, opener: O) -> &mut Self {
        self.opener = Box::new(opener);
        self
    }

    /// Sets the enclosure rule.
    ///
    /// Accepts an [`EnclosureRule`], its numeric code (`1` or `2`) or its name
    /// (`"none"` or `"all"`).
    ///
    /// # Errors
    ///
    /// [`CsvWriterError::InvalidEnclosureRule`] when the value names no rule,
    /// in which case the current rule is kept.
    pub fn set_enclosure_rule<R>(&mut self, rule: R) -> Result<&mut Self, CsvWriterError>
    where
        R: TryInto<EnclosureRule>,
        CsvWriterError: From<R::Error>,
    {
        self.config.enclosure_rule = rule.try_into()?;
        Ok(self)
    }

    pub fn enclosure_rule(&self) -> EnclosureRule {
        self.config.enclosure_rule
    }

    pub fn set_column_delimiter<S: Into<String>>(&mut self, delimiter: S) -> &mut Self {
        self.config.column_delimiter = delimiter.into();
        self
    }

    pub fn column_delimiter(&self) -> &str {
        &self.config.column_delimiter
    }

    pub fn set_line_delimiter<S: Into<String>>(&mut self, delimiter: S) -> &mut Self {
        self.config.line_delimiter = delimiter.into();
        self
    }

    pub fn line_delimiter(&self) -> &str {
        &self.config.line_delimiter
    }

    /// Sets the row count triggering an automatic flush, `0` meaning no limit.
    pub fn set_max_buffered_rows(&mut self, max: usize) -> &mut Self {
        self.config.max_buffered_rows = max;
        self
    }

    pub fn max_buffered_rows(&self) -> usize {
        self.config.max_buffered_rows
    }

    /// Sets or clears (`None`) the output path.
    pub fn set_output_path<P: AsRef<Path>>(&mut self, path: Option<P>) -> &mut Self {
        self.config.output_path = path.map(|path| path.as_ref().to_path_buf());
        self
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.config.output_path.as_deref()
    }

    /// Enables conversion of rendered text from `source` to `target`.
    ///
    /// # Errors
    ///
    /// [`CsvWriterError::UnsupportedEncoding`] naming the first unknown label,
    /// in which case the current encodings are kept.
    pub fn set_encodings(&mut self, source: &str, target: &str) -> Result<&mut Self, CsvWriterError> {
        self.config.encodings = Some(EncodingPair::new(source, target)?);
        Ok(self)
    }

    pub fn encodings(&self) -> Option<&EncodingPair> {
        self.config.encodings.as_ref()
    }

    pub fn source_encoding(&self) -> Option<&str> {
        self.encodings().map(EncodingPair::source_name)
    }

    pub fn target_encoding(&self) -> Option<&str> {
        self.encodings().map(EncodingPair::target_name)
    }

    /// Restores the default configuration, buffered rows are kept.
    pub fn reset_config(&mut self) -> &mut Self {
        self.config = CsvWriterConfig::default();
        self
    }

    /// Drops every buffered row, the configuration is kept.
    pub fn clear_buffer(&mut self) -> &mut Self {
        self.rows.clear();
        self
    }

    /// Restores the default configuration and drops every buffered row.
    pub fn reset(&mut self) -> &mut Self {
        self.reset_config().clear_buffer()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row to the buffer.
    ///
    /// When a buffer limit and an output path are both configured and the
    /// buffer reaches the limit, every buffered row is appended to the output
    /// file and the buffer is cleared.
    ///
    /// # Errors
    ///
    /// [`CsvWriterError::FlushFailed`] when that flush fails. The buffer,
    /// including the row just added, is left untouched.
    pub fn add_line<I, V>(&mut self, values: I) -> Result<&mut Self, CsvWriterError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Field>,
    {
        let row: Row = values.into_iter().map(Into::into).collect();
        debug!("Buffering row with {} values", row.len());
        self.rows.push(row);
        self.flush_if_full()?;
        Ok(self)
    }

    /// Appends rows one by one, with the same flush check as
    /// [`add_line`](CsvWriter::add_line) after each of them.
    ///
    /// Stops at the first failing flush, later rows are not buffered.
    pub fn add_lines<R, I, V>(&mut self, rows: R) -> Result<&mut Self, CsvWriterError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Field>,
    {
        for row in rows {
            self.add_line(row)?;
        }
        Ok(self)
    }

    fn flush_if_full(&mut self) -> Result<(), CsvWriterError> {
        let max = self.config.max_buffered_rows;
        if max == 0 || self.rows.len() < max {
            return Ok(());
        }
        let Some(path) = self.config.output_path.clone() else {
            return Ok(());
        };

        match self.write_to(&path, true) {
            Ok(()) => {
                info!("Flushed {} rows to {}", self.rows.len(), path.display());
                self.clear_buffer();
                Ok(())
            }
            Err(source) => {
                error!("Failed to flush buffer to {}: {}", path.display(), source);
                Err(CsvWriterError::FlushFailed {
                    path,
                    buffered_rows: self.rows.len(),
                    source,
                })
            }
        }
    }

    /// Renders the buffered rows as CSV.
    ///
    /// Rows are joined with the line delimiter, without a trailing one. When
    /// encodings are configured, the text is converted from the source to the
    /// target encoding unless it already reads as the target encoding.
    ///
    /// ```
    /// use buffered_csv_writer::csv::csv_writer::CsvWriter;
    ///
    /// let mut writer = CsvWriter::new();
    /// writer.add_line(["a", "b"]).unwrap();
    /// writer.add_line(["c", "d"]).unwrap();
    ///
    /// assert_eq!(writer.render_csv(), b"\"a\",\"b\"\n\"c\",\"d\"");
    ///
    /// writer.set_enclosure_rule("none").unwrap();
    /// assert_eq!(writer.render_csv(), b"a,b\nc,d");
    /// ```
    pub fn render_csv(&self) -> Vec<u8> {
        let csv = self.join_rows();
        match &self.config.encodings {
            Some(encodings) => encodings.convert(&csv).into_owned(),
            None => csv,
        }
    }

    fn join_rows(&self) -> Vec<u8> {
        let delimiter = self.config.column_delimiter.as_bytes();
        let line_delimiter = self.config.line_delimiter.as_bytes();
        let enclose = self.config.enclosure_rule == EnclosureRule::All;

        let mut csv = Vec::new();
        for (index, row) in self.rows.iter().enumerate() {
            if index > 0 {
                csv.extend_from_slice(line_delimiter);
            }
            if enclose {
                csv.push(b'"');
            }
            for (column, field) in row.iter().enumerate() {
                if column > 0 {
                    if enclose {
                        csv.push(b'"');
                    }
                    csv.extend_from_slice(delimiter);
                    if enclose {
                        csv.push(b'"');
                    }
                }
                csv.extend_from_slice(field.as_bytes());
            }
            if enclose {
                csv.push(b'"');
            }
        }
        csv
    }

    /// Writes the rendered CSV followed by one line delimiter.
    ///
    /// Writes to `path` when given, to the configured output path otherwise,
    /// appending to or truncating the file according to `append`. The buffer
    /// is not cleared.
    ///
    /// Returns `false`, without raising, when no path is available or when the
    /// file cannot be opened or written.
    pub fn save(&self, path: Option<&Path>, append: bool) -> bool {
        let Some(path) = path.or(self.output_path()) else {
            warn!("No output path to save the CSV to");
            return false;
        };

        match self.write_to(path, append) {
            Ok(()) => {
                debug!("Saved {} rows to {}", self.rows.len(), path.display());
                true
            }
            Err(error) => {
                warn!("Failed to save CSV to {}: {}", path.display(), error);
                false
            }
        }
    }

    fn write_to(&self, path: &Path, append: bool) -> io::Result<()> {
        let mut file = self.opener.open(path, append)?;
        let mut content = self.render_csv();
        content.extend_from_slice(self.config.line_delimiter.as_bytes());
        file.write_all(&content)?;
        file.flush()
    }
}

/// Builds a [`CsvWriter`], validating the configuration once in [`build`](CsvWriterBuilder::build).
///
/// ```
/// use buffered_csv_writer::csv::csv_writer::CsvWriterBuilder;
/// use buffered_csv_writer::core::config::EnclosureRule;
///
/// let mut writer = CsvWriterBuilder::new()
///     .delimiter(";")
///     .line_delimiter("\r\n")
///     .enclosure_rule(EnclosureRule::None)
///     .build()
///     .unwrap();
///
/// writer.add_line(["1", "Boston"]).unwrap();
/// writer.add_line(["2", "Concord"]).unwrap();
///
/// assert_eq!(writer.render_csv(), b"1;Boston\r\n2;Concord");
/// ```
#[derive(Default)]
pub struct CsvWriterBuilder {
    config: CsvWriterConfig,
    encodings: Option<(String, String)>,
    opener: Option<Box<dyn FileOpener>>,
}

impl CsvWriterBuilder {
    pub fn new() -> CsvWriterBuilder {
        CsvWriterBuilder::default()
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: CsvWriterConfig) -> CsvWriterBuilder {
        CsvWriterBuilder {
            config,
            ..CsvWriterBuilder::default()
        }
    }

    pub fn delimiter<S: Into<String>>(mut self, delimiter: S) -> CsvWriterBuilder {
        self.config.column_delimiter = delimiter.into();
        self
    }

    pub fn line_delimiter<S: Into<String>>(mut self, delimiter: S) -> CsvWriterBuilder {
        self.config.line_delimiter = delimiter.into();
        self
    }

    pub fn enclosure_rule(mut self, rule: EnclosureRule) -> CsvWriterBuilder {
        self.config.enclosure_rule = rule;
        self
    }

    pub fn max_buffered_rows(mut self, max: usize) -> CsvWriterBuilder {
        self.config.max_buffered_rows = max;
        self
    }

    pub fn output_path<P: AsRef<Path>>(mut self, path: P) -> CsvWriterBuilder {
        self.config.output_path = Some(PathBuf::from(path.as_ref()));
        self
    }

    pub fn encodings(mut self, source: &str, target: &str) -> CsvWriterBuilder {
        self.encodings = Some((source.to_string(), target.to_string()));
        self
    }

    pub fn file_opener<O: FileOpener + 'static>(mut self, opener: O) -> CsvWriterBuilder {
        self.opener = Some(Box::new(opener));
        self
    }

    /// # Errors
    ///
    /// [`CsvWriterError::UnsupportedEncoding`] when an encoding label is unknown.
    pub fn build(self) -> Result<CsvWriter, CsvWriterError> {
        let mut config = self.config;
        if let Some((source, target)) = self.encodings {
            config.encodings = Some(EncodingPair::new(&source, &target)?);
        }

        let mut writer = CsvWriter::with_config(config);
        if let Some(opener) = self.opener {
            writer.opener = opener;
        }
        Ok(writer)
    }
}
