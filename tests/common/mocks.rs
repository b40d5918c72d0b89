//! Mock versions of std::fs::File and of the writer's file opener.
use mockall::mock;

use buffered_csv_writer::core::opener::FileOpener;
use std::{
    io::{self, Write},
    path::Path,
};

mock! {
    pub File {}
    impl Write for File {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
        fn flush(&mut self) -> io::Result<()>;
    }
}

mock! {
    pub Opener {}
    impl FileOpener for Opener {
        fn open(&self, path: &Path, append: bool) -> io::Result<Box<dyn Write>>;
    }
}
