/// CSV rendering with a row buffer flushed to disk.
///
/// The writer does not rely on a CSV library: values are joined with caller-provided
/// delimiters, optionally wrapped in double quotes, and never escaped.
///
/// # Examples
///
/// ## Flushing every 2 rows
///
/// ```
/// use buffered_csv_writer::csv::csv_writer::CsvWriterBuilder;
/// use std::fs;
///
/// let dir = std::env::temp_dir().join("buffered_csv_writer_doc");
/// fs::create_dir_all(&dir).unwrap();
/// let path = dir.join("flushed.csv");
/// let _ = fs::remove_file(&path);
///
/// let mut writer = CsvWriterBuilder::new()
///     .output_path(&path)
///     .max_buffered_rows(2)
///     .build()
///     .unwrap();
///
/// writer.add_line(["1", "Boston"]).unwrap();
/// writer.add_line(["2", "Concord"]).unwrap();
/// writer.add_line(["3", "Salem"]).unwrap();
///
/// // The first two rows were appended to the file, the third is still buffered.
/// assert_eq!(writer.len(), 1);
/// assert_eq!(
///     fs::read_to_string(&path).unwrap(),
///     "\"1\",\"Boston\"\n\"2\",\"Concord\"\n"
/// );
/// ```

/// A module providing the buffered CSV writer.
pub mod csv_writer;
