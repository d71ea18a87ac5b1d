//! Responsive breakpoints.

use serde::{Deserialize, Serialize};

/// Width below which a container renders the mobile layout.
const TABLET_MIN_WIDTH: u32 = 768;
/// Width at or above which a container renders the desktop layout.
const DESKTOP_MIN_WIDTH: u32 = 1024;

/// One of the three responsive breakpoints.
///
/// Classification is done from the rendered *container's* own width, not
/// the viewport - embedded previews render narrower than the window they
/// sit in and must pick up the matching layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    /// Classify a container width in CSS pixels.
    #[must_use]
    pub const fn from_width(width: u32) -> Self {
        if width >= DESKTOP_MIN_WIDTH {
            Self::Desktop
        } else if width >= TABLET_MIN_WIDTH {
            Self::Tablet
        } else {
            Self::Mobile
        }
    }

    /// The JSON key used for this breakpoint in responsive value maps.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}
