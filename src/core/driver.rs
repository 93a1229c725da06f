//! Build mode configuration for production/development builds.

/// Build mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMode {
    /// Whether posts marked `draft: true` are published.
    pub include_drafts: bool,
}

impl BuildMode {
    /// Production mode: drafts are skipped everywhere.
    pub const PRODUCTION: Self = Self {
        include_drafts: false,
    };

    /// Development mode: drafts are listed and searchable.
    pub const DEVELOPMENT: Self = Self {
        include_drafts: true,
    };

    /// Check if this is development mode.
    #[inline]
    pub const fn is_dev(&self) -> bool {
        self.include_drafts
    }

    /// Draft gate: `published = is_dev || !draft`.
    #[inline]
    pub const fn is_published(&self, draft: bool) -> bool {
        self.is_dev() || !draft
    }

    pub const fn from_dev_flag(dev: bool) -> Self {
        if dev { Self::DEVELOPMENT } else { Self::PRODUCTION }
    }
}
