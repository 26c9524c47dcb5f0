use std::io;
use std::path::{Path, PathBuf};

/// An in-flight file payload received from a caller.
///
/// Carries the client-supplied display name and extension plus a one-time
/// capability to relocate the payload's bytes into a destination directory.
/// The display name may contain characters that are unsafe in file names.
pub trait Upload {
    fn original_name(&self) -> &str;

    /// Original extension, without the leading dot.
    fn extension(&self) -> &str;

    /// Move the payload to `dir/file_name`.
    fn persist_into(&self, dir: &Path, file_name: &str) -> io::Result<()>;
}

/// An upload spooled to a temporary file on disk.
#[derive(Debug)]
pub struct DiskUpload {
    spool_path: PathBuf,
    original_name: String,
    extension: String,
}

impl DiskUpload {
    pub fn new(spool_path: impl Into<PathBuf>, original_name: impl Into<String>) -> Self {
        let original_name = original_name.into();
        let extension = Path::new(&original_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        Self {
            spool_path: spool_path.into(),
            original_name,
            extension,
        }
    }
}

impl Upload for DiskUpload {
    fn original_name(&self) -> &str {
        &self.original_name
    }

    fn extension(&self) -> &str {
        &self.extension
    }

    fn persist_into(&self, dir: &Path, file_name: &str) -> io::Result<()> {
        std::fs::rename(&self.spool_path, dir.join(file_name))
    }
}
