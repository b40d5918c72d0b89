#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # Buffered CSV writer

 Accumulates rows of values in memory, renders them as CSV text and writes them
 to a file, either on demand or automatically once the buffer reaches a given
 number of rows.

 ## Core Concepts

- **CsvWriter:** owns the buffered rows and the formatting options. Setters return the
  writer so configuration calls can be chained.
- **EnclosureRule:** `All` wraps every value in double quotes, `None` writes values as-is.
  Values are never escaped.
- **Buffer threshold:** with `max_buffered_rows > 0` and an output path configured,
  `add_line` appends the buffer to the file and clears it as soon as the threshold is
  reached. A failing flush raises `CsvWriterError::FlushFailed` and keeps the rows.
- **Encodings:** with a source and a target encoding configured, rendered text that does
  not already read as the target encoding is converted to it.
- **save:** writes the rendered text plus one line delimiter, appending or truncating, and
  reports the outcome as a `bool` instead of an error.

 ## Getting Started

```rust
# use buffered_csv_writer::{csv::csv_writer::CsvWriter, error::CsvWriterError};
# use std::env::temp_dir;
fn main() -> Result<(), CsvWriterError> {
    let path = temp_dir().join("cities.csv");

    let mut writer = CsvWriter::from_path(&path);
    writer.set_column_delimiter(";").set_max_buffered_rows(1000);

    writer.add_line(["city", "country", "pop"])?;
    writer.add_line(["Boston", "United States", "4628910"])?;
    writer.add_line(["Concord", "United States", "42695"])?;

    assert_eq!(
        writer.render_csv(),
        b"\"city\";\"country\";\"pop\"\n\"Boston\";\"United States\";\"4628910\"\n\"Concord\";\"United States\";\"42695\""
    );

    // Overwrite the file with what is still buffered.
    assert!(writer.save(None, false));
    writer.clear_buffer();

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

/// Configuration, values and file system seam shared by writers
pub mod core;

/// Error types for writer operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Encodings supported for conversion of rendered text
pub mod encoding;

/// CSV rendering and buffering
pub mod csv;
