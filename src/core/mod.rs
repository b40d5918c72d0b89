/// Formatting options and their defaults.
pub mod config;

/// Values held by the row buffer.
pub mod field;

/// File system access used when saving.
pub mod opener;
