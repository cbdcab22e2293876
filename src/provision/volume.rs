//! Optional bind-mount volume.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::ProvisionError;

/// Host directory to bind-mount into a new container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSpec {
    host_path: Utf8PathBuf,
}

impl VolumeSpec {
    /// Build a volume from the operator's path.
    ///
    /// The path is passed to the runtime as-is apart from surrounding
    /// whitespace; the runtime resolves relative paths itself.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::InvalidVolume` for empty or whitespace-only
    /// input.
    pub fn new(host_path: &str) -> Result<Self, ProvisionError> {
        let trimmed = host_path.trim();
        if trimmed.is_empty() {
            return Err(ProvisionError::InvalidVolume {
                reason: String::from("host path is empty"),
            });
        }
        Ok(Self {
            host_path: Utf8PathBuf::from(trimmed),
        })
    }

    /// The host side of the mount.
    #[must_use]
    pub fn host_path(&self) -> &Utf8Path {
        &self.host_path
    }

    /// The `-v` argument value, `<host>:<target>`.
    #[must_use]
    pub fn bind_clause(&self, target: &Utf8Path) -> String {
        format!("{}:{target}", self.host_path)
    }
}
