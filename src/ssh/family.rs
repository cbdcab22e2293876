//! Image family tags.

use std::fmt;
use std::str::FromStr;

use crate::error::SshError;

/// Coarse classification of a base image, used to pick the SSH recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFamily {
    /// Debian and derivatives (`apt`, `service`).
    Debian,
    /// Fedora and RHEL derivatives (`dnf`, `sshd` launched directly).
    Fedora,
}

impl ImageFamily {
    /// Canonical lowercase tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Debian => "debian",
            Self::Fedora => "fedora",
        }
    }
}

impl fmt::Display for ImageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ImageFamily {
    type Err = SshError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "debian" | "ubuntu" => Ok(Self::Debian),
            "fedora" | "rhel" | "rocky" | "rockylinux" => Ok(Self::Fedora),
            _ => Err(SshError::UnsupportedFamily {
                tag: tag.to_owned(),
            }),
        }
    }
}
