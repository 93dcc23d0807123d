//! Output targets: the console stream or an open log file.
//!
//! This module owns path decomposition, collision-free naming of rolled
//! files and the opening of the file handles themselves.

use std::fs::{DirBuilder, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// A log file path split into directory, base name and extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilePath {
    dir: PathBuf,
    name: String,
    ext: String,
}

impl LogFilePath {
    /// Splits `path` into its components.
    ///
    /// A path without a directory part lives in `.`. The extension is
    /// everything from the last `.` of the file name and may be empty.
    ///
    /// ```rust
    /// use rolling_log::LogFilePath;
    ///
    /// let p = LogFilePath::parse("./tmp/test.log").unwrap();
    /// assert_eq!(p.name(), "test");
    /// assert_eq!(p.ext(), ".log");
    /// assert!(LogFilePath::parse("logs/.log").is_err());
    /// ```
    pub fn parse(path: &str) -> Result<Self> {
        let p = Path::new(path);
        let file = p.file_name().and_then(|f| f.to_str()).unwrap_or_default();
        if file.is_empty() {
            return Err(ConfigError::EmptyFileName(path.to_string()));
        }
        if file.contains(['/', '\\']) {
            return Err(ConfigError::InvalidFileName(path.to_string()));
        }
        let dir = match p.parent() {
            Some(d) if d.as_os_str().is_empty() => PathBuf::from("."),
            Some(d) => d.to_path_buf(),
            None => return Err(ConfigError::EmptyDirectory(path.to_string())),
        };
        let (name, ext) = match file.rfind('.') {
            Some(idx) => file.split_at(idx),
            None => (file, ""),
        };
        if name.is_empty() {
            return Err(ConfigError::EmptyFileName(path.to_string()));
        }
        Ok(Self {
            dir,
            name: name.to_string(),
            ext: ext.to_string(),
        })
    }

    /// Directory holding the log files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name without extension.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extension including the leading dot, or empty.
    #[must_use]
    pub fn ext(&self) -> &str {
        &self.ext
    }

    /// `<dir>/<name><ext>`.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}{}", self.name, self.ext))
    }

    /// `<dir>/<name>_<n><ext>`.
    #[must_use]
    pub fn numbered(&self, n: u32) -> PathBuf {
        self.dir.join(format!("{}_{n}{}", self.name, self.ext))
    }

    /// The first of `<name><ext>`, `<name>_1<ext>`, `<name>_2<ext>`, … that
    /// does not exist yet.
    #[must_use]
    pub fn next_free(&self) -> PathBuf {
        let mut candidate = self.path();
        let mut n = 1;
        while candidate.exists() {
            candidate = self.numbered(n);
            n += 1;
        }
        candidate
    }

    /// The path to open: the plain path, or the next free one when rolling.
    #[must_use]
    pub fn resolve(&self, rolling: bool) -> PathBuf {
        if rolling { self.next_free() } else { self.path() }
    }
}

/// A freshly opened log file.
#[derive(Debug)]
pub(crate) struct OpenedFile {
    /// The handle, positioned for appending.
    pub file: File,
    /// Where it lives.
    pub path: PathBuf,
    /// Whether the file existed and is being appended to.
    pub appended: bool,
}

/// Opens `path` for logging.
///
/// An existing file is opened for appending and never truncated. Otherwise
/// all missing parent directories are created and the file is created.
pub(crate) fn open_log_file(path: &Path) -> Result<OpenedFile> {
    if path.exists() {
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|source| ConfigError::OpenFile {
                path: path.to_path_buf(),
                source,
            })?;
        return Ok(OpenedFile {
            file,
            path: path.to_path_buf(),
            appended: true,
        });
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dirs(dir).map_err(|source| ConfigError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| ConfigError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(OpenedFile {
        file,
        path: path.to_path_buf(),
        appended: false,
    })
}

fn create_dirs(dir: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(dir)
}

/// The destination lines are currently written to.
#[derive(Debug, Default)]
pub(crate) enum Target {
    /// The logger's console stream (standard output unless replaced).
    #[default]
    Console,
    /// An open log file.
    File {
        /// The handle.
        file: File,
        /// Its path.
        path: PathBuf,
    },
}

impl Target {
    /// Path of the open file, if the target is a file.
    #[must_use]
    pub(crate) fn path(&self) -> Option<&Path> {
        match self {
            Self::Console => None,
            Self::File { path, .. } => Some(path),
        }
    }

    /// Writes one complete line.
    pub(crate) fn write_line(&mut self, console: &mut dyn Write, line: &[u8]) -> io::Result<()> {
        match self {
            Self::Console => {
                console.write_all(line)?;
                console.flush()
            }
            Self::File { file, .. } => file.write_all(line),
        }
    }
}

impl From<OpenedFile> for Target {
    fn from(opened: OpenedFile) -> Self {
        Self::File {
            file: opened.file,
            path: opened.path,
        }
    }
}
