//! Writes a small sales report, flushing to disk every 2 rows.
//!
//! Run with `RUST_LOG=debug cargo run --example write_report` to follow the flushes.

use std::env::temp_dir;

use buffered_csv_writer::{
    core::config::EnclosureRule, csv::csv_writer::CsvWriterBuilder, error::CsvWriterError,
};
use log::info;

fn main() -> Result<(), CsvWriterError> {
    env_logger::init();

    let path = temp_dir().join("sales_report.csv");

    let mut writer = CsvWriterBuilder::new()
        .output_path(&path)
        .delimiter(";")
        .enclosure_rule(EnclosureRule::All)
        .max_buffered_rows(2)
        .build()?;

    // Start from an empty file, the automatic flushes append to it.
    writer.add_line(["region", "product", "units"])?;
    if !writer.save(None, false) {
        info!("Unable to create {}", path.display());
        return Ok(());
    }
    writer.clear_buffer();

    writer.add_lines([
        ["North", "Widget", "120"],
        ["North", "Gadget", "75"],
        ["South", "Widget", "98"],
    ])?;

    if !writer.is_empty() && writer.save(None, true) {
        writer.clear_buffer();
    }

    info!("Report written to {}", path.display());
    Ok(())
}
