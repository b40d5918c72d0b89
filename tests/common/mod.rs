#![allow(dead_code)]

pub mod mocks;

pub use mocks::{MockFile, MockOpener};

/// A file that fails on every write, as a full disk would.
pub fn failing_file() -> MockFile {
    let mut file = MockFile::new();
    file.expect_write()
        .returning(|_| Err(std::io::Error::other("no space left on device")));
    file.expect_flush().returning(|| Ok(()));
    file
}

/// An opener handing out a single [`failing_file`].
pub fn opener_with_failing_file() -> MockOpener {
    let mut opener = MockOpener::new();
    let file = failing_file();
    opener
        .expect_open()
        .times(1)
        .return_once(move |_, _| Ok(Box::new(file)));
    opener
}
