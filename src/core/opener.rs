use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};

/// Opens the destination of a save.
///
/// The returned handle is dropped, and so closed, before the save returns.
#[cfg_attr(test, mockall::automock)]
pub trait FileOpener {
    fn open(&self, path: &Path, append: bool) -> io::Result<Box<dyn Write>>;
}

/// Opens files on the local file system, creating them when missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFileOpener;

impl FileOpener for FsFileOpener {
    fn open(&self, path: &Path, append: bool) -> io::Result<Box<dyn Write>> {
        let file = if append {
            File::options().append(true).create(true).open(path)?
        } else {
            File::options()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)?
        };
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn append_should_keep_existing_content() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        fs::write(&path, "first\n")?;

        FsFileOpener.open(&path, true)?.write_all(b"second\n")?;

        assert_eq!(fs::read_to_string(&path)?, "first\nsecond\n");
        Ok(())
    }

    #[test]
    fn overwrite_should_truncate_existing_content() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        fs::write(&path, "a much longer first line\n")?;

        FsFileOpener.open(&path, false)?.write_all(b"second\n")?;

        assert_eq!(fs::read_to_string(&path)?, "second\n");
        Ok(())
    }

    #[test]
    fn missing_directory_should_fail_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        assert!(FsFileOpener.open(&path, true).is_err());
    }
}
