//! Host operating system detection.

use std::fmt;

/// The host platform families the tool distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux and every other Unix-like target without a dedicated variant.
    Linux,
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    Darwin,
}

impl Platform {
    /// Detect the platform this binary was compiled for.
    ///
    /// Always resolves to one of the three variants; targets without a
    /// dedicated variant report [`Platform::Linux`].
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Darwin
        } else {
            Self::Linux
        }
    }

    /// Parse an OS name as reported by `std::env::consts::OS` or `uname -s`.
    #[must_use]
    pub fn from_os_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linux" => Some(Self::Linux),
            "windows" => Some(Self::Windows),
            "macos" | "darwin" => Some(Self::Darwin),
            _ => None,
        }
    }

    /// The identifier shown to the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::Windows => "Windows",
            Self::Darwin => "Darwin",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
