use anyhow::{bail, Context, Result};
use std::path::{Component, Path, PathBuf};

use crate::config::Config;
use crate::fs::Filesystem;
use crate::services::slug;
use crate::upload::Upload;

/// File and directory helpers rooted at a single storage directory.
///
/// Every route is resolved against the configured root. Destructive
/// operations are existence-guarded, so calling them twice in a row is safe
/// and leaves the same end state; targets that do not exist are a no-op.
/// Failures from the underlying filesystem propagate to the caller.
pub struct Storage<F: Filesystem> {
    root: PathBuf,
    fs: F,
    dir_mode: u32,
}

impl<F: Filesystem> Storage<F> {
    pub fn new(root: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            root: root.into(),
            fs,
            dir_mode: 0o775,
        }
    }

    pub fn from_config(config: &Config, fs: F) -> Self {
        Self {
            root: PathBuf::from(&config.storage.root),
            fs,
            dir_mode: config.storage.dir_mode,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// If the directory exists, remove its contents but keep it; otherwise
    /// create it. Either way it ends up existing and empty.
    pub fn reset_directory(&self, route: &str) -> Result<()> {
        let dir = self.resolve(route)?;
        if self.fs.exists(&dir) {
            self.fs
                .clean_dir(&dir)
                .with_context(|| format!("Failed to clean {}", dir.display()))?;
            tracing::debug!("Cleaned directory: {}", dir.display());
        } else {
            self.create_dir(&dir)?;
        }
        Ok(())
    }

    /// Create the directory if it does not exist yet; no-op otherwise.
    pub fn ensure_directory(&self, route: &str) -> Result<()> {
        let dir = self.resolve(route)?;
        if !self.fs.exists(&dir) {
            self.create_dir(&dir)?;
        }
        Ok(())
    }

    /// Store an upload under `route`, named after its slugged original name.
    /// The full original name goes through the slugger, extension text
    /// included: `Q1 Report.pdf` lands as `q1-report-pdf.pdf`.
    pub fn store_upload(&self, route: &str, upload: &impl Upload) -> Result<()> {
        let file_name = slug::slug_file_name(upload.original_name(), upload.extension());
        let dir = self.resolve(route)?;
        if !self.fs.exists(&dir) {
            self.create_dir(&dir)?;
        }
        self.move_upload(upload, &dir, &file_name)?;
        Ok(())
    }

    /// Store an upload under the lowercased `route`, resolving the final file
    /// name from the optional explicit name and slug flag. Returns the file
    /// name so callers can persist it. Pass `None, true` for the default
    /// behavior of slugging the upload's own base name.
    ///
    /// With `should_slug` false the name reaches the filesystem untouched;
    /// callers relying on safe names must keep the flag set.
    pub fn store_named_upload(
        &self,
        route: &str,
        upload: &impl Upload,
        explicit_name: Option<&str>,
        should_slug: bool,
    ) -> Result<String> {
        let file_name = slug::resolve_file_name(upload, explicit_name, should_slug);
        let dir = self.resolve(&route.to_lowercase())?;
        if !self.fs.exists(&dir) {
            self.create_dir(&dir)?;
        }
        self.move_upload(upload, &dir, &file_name)?;
        Ok(file_name)
    }

    /// Delete the file at the lowercased route; absent targets are a no-op.
    pub fn delete_file(&self, file_route: &str) -> Result<()> {
        let path = self.resolve(&file_route.to_lowercase())?;
        if self.fs.exists(&path) {
            self.fs
                .remove_file(&path)
                .with_context(|| format!("Failed to delete {}", path.display()))?;
            tracing::debug!("Deleted file: {}", path.display());
        }
        Ok(())
    }

    /// Recursively delete the directory; absent targets are a no-op.
    pub fn delete_directory_tree(&self, route: &str) -> Result<()> {
        let dir = self.resolve(route)?;
        if self.fs.exists(&dir) {
            self.fs
                .remove_dir_all(&dir)
                .with_context(|| format!("Failed to delete {}", dir.display()))?;
            tracing::debug!("Deleted directory tree: {}", dir.display());
        }
        Ok(())
    }

    /// Remove the directory's contents but keep the directory itself; absent
    /// targets are a no-op.
    pub fn clean_directory(&self, route: &str) -> Result<()> {
        let dir = self.resolve(route)?;
        if self.fs.exists(&dir) {
            self.fs
                .clean_dir(&dir)
                .with_context(|| format!("Failed to clean {}", dir.display()))?;
            tracing::debug!("Cleaned directory: {}", dir.display());
        }
        Ok(())
    }

    /// Resolve a root-relative route, rejecting routes that could escape the
    /// root.
    fn resolve(&self, route: &str) -> Result<PathBuf> {
        let relative = Path::new(route);
        if relative.is_absolute() {
            bail!("route '{}' must be relative to the storage root", route);
        }
        for component in relative.components() {
            if matches!(component, Component::ParentDir) {
                bail!("route '{}' escapes the storage root", route);
            }
        }
        Ok(self.root.join(relative))
    }

    fn create_dir(&self, dir: &Path) -> Result<()> {
        self.fs
            .create_dir_all(dir, self.dir_mode)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        tracing::info!("Created directory: {}", dir.display());
        Ok(())
    }

    fn move_upload(&self, upload: &impl Upload, dir: &Path, file_name: &str) -> Result<()> {
        upload.persist_into(dir, file_name).with_context(|| {
            format!("Failed to store upload as {}", dir.join(file_name).display())
        })?;
        tracing::debug!("Stored upload: {}", dir.join(file_name).display());
        Ok(())
    }
}
