use super::{ContentSource, EntryKind};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl FsSource {
    pub fn new() -> Self {
        Self
    }
}

impl ContentSource for FsSource {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect()
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        let meta = fs::metadata(path)?;
        Ok(if meta.is_dir() {
            EntryKind::Directory
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_and_kinds() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "# A").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let source = FsSource::new();
        let mut names = source.list_dir(dir.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["a.md", "sub"]);

        assert_eq!(
            source.entry_kind(&dir.path().join("a.md")).unwrap(),
            EntryKind::File
        );
        assert_eq!(
            source.entry_kind(&dir.path().join("sub")).unwrap(),
            EntryKind::Directory
        );
        assert_eq!(
            source.read_to_string(&dir.path().join("a.md")).unwrap(),
            "# A"
        );
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let err = FsSource::new()
            .list_dir(&dir.path().join("nope"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
