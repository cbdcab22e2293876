//! The fixed menu of base images.

use crate::error::ProvisionError;
use crate::ssh::ImageFamily;

/// One entry of the image menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageChoice {
    /// Menu key shown to the operator (1-based).
    pub key: usize,
    /// Image reference passed to the runtime.
    pub image: &'static str,
    /// Family used to pick the SSH recipe.
    pub family: ImageFamily,
}

const CHOICES: &[ImageChoice] = &[
    ImageChoice {
        key: 1,
        image: "ubuntu",
        family: ImageFamily::Debian,
    },
    ImageChoice {
        key: 2,
        image: "fedora",
        family: ImageFamily::Fedora,
    },
    ImageChoice {
        key: 3,
        image: "debian",
        family: ImageFamily::Debian,
    },
    ImageChoice {
        key: 4,
        image: "rockylinux",
        family: ImageFamily::Fedora,
    },
];

/// Ordered, immutable image menu.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCatalog;

impl ImageCatalog {
    /// All entries in menu order.
    #[must_use]
    pub const fn choices(self) -> &'static [ImageChoice] {
        CHOICES
    }

    /// Look up a menu key.
    #[must_use]
    pub fn get(self, key: usize) -> Option<&'static ImageChoice> {
        CHOICES.iter().find(|choice| choice.key == key)
    }

    /// Resolve the operator's raw selection.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::InvalidChoice` for non-numeric input and for
    /// keys outside the menu.
    pub fn choose(self, input: &str) -> Result<&'static ImageChoice, ProvisionError> {
        input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|key| self.get(key))
            .ok_or_else(|| ProvisionError::InvalidChoice {
                input: input.trim().to_owned(),
            })
    }

    /// Menu lines in the form `1. ubuntu`.
    #[must_use]
    pub fn menu_lines(self) -> Vec<String> {
        CHOICES
            .iter()
            .map(|choice| format!("{}. {}", choice.key, choice.image))
            .collect()
    }
}
