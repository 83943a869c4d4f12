//! File path helpers.

use std::fs::File;
use std::path::Path;

/// A file path split into directory, base name and extension.
///
/// `path` keeps its trailing `/`; `extension` excludes the dot. Missing parts
/// are empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilePath {
    pub path: String,
    pub basename: String,
    pub extension: String,
}

/// Whether `path` names a file that can be opened for reading.
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    File::open(path).is_ok()
}

/// Split `filepath` at its last `/` and, within the file name, at the last `.`.
///
/// A dot in a directory name is not an extension separator.
pub fn split_filepath(filepath: &str) -> FilePath {
    let (path, filename) = match filepath.rfind('/') {
        Some(pos) => filepath.split_at(pos + 1),
        None => ("", filepath),
    };
    let (basename, extension) = filename.rsplit_once('.').unwrap_or((filename, ""));
    FilePath {
        path: path.to_string(),
        basename: basename.to_string(),
        extension: extension.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn existing_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("TestFile.dat");
        let mut out = File::create(&file).unwrap();
        writeln!(out, "Dummy file for file_exists test").unwrap();
        drop(out);

        assert!(file_exists(&file));
        assert!(!file_exists(dir.path().join("data/ThisWontWork.ini")));
    }

    #[test]
    fn split_paths() {
        let parts = |p: &str| {
            let fp = split_filepath(p);
            (fp.path, fp.basename, fp.extension)
        };
        let owned = |a: &str, b: &str, c: &str| (a.to_string(), b.to_string(), c.to_string());

        assert_eq!(parts("/usr/local/bin/file.txt"), owned("/usr/local/bin/", "file", "txt"));
        assert_eq!(parts("file.txt"), owned("", "file", "txt"));
        assert_eq!(parts("./file"), owned("./", "file", ""));
        assert_eq!(parts("file"), owned("", "file", ""));
        assert_eq!(parts(""), owned("", "", ""));
        assert_eq!(parts("/usr/local.dir/file.txt"), owned("/usr/local.dir/", "file", "txt"));
        assert_eq!(parts("archive.tar.gz"), owned("", "archive.tar", "gz"));
        assert_eq!(parts("dir/"), owned("dir/", "", ""));
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(split_filepath(""), FilePath::default());
    }
}
