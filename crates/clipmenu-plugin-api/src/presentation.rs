//! Menu presentation strategies.
//!
//! Native platforms offer several ways to show an edit menu depending on
//! the OS version. The strategy is picked once, when the native backend is
//! built, by walking [`NATIVE_PREFERENCE`] from most to least preferred.

use serde::{Deserialize, Serialize};

/// Host platform version, as reported by the host at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlatformVersion {
    pub major: u32,
    pub minor: u32,
}

impl PlatformVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

/// How a built menu is put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationStrategy {
    /// Edit-menu interaction anchored at the trigger point (platform 16+).
    EditMenuInteraction,
    /// Shared menu controller shown from a zero-size rect (platform 13+).
    MenuController,
    /// Plain popup menu, always available.
    PopupMenu,
    /// Absolutely positioned DOM element (web backend).
    DomOverlay,
}

/// Native strategies, most preferred first.
pub const NATIVE_PREFERENCE: [PresentationStrategy; 3] = [
    PresentationStrategy::EditMenuInteraction,
    PresentationStrategy::MenuController,
    PresentationStrategy::PopupMenu,
];

impl PresentationStrategy {
    /// Config name, e.g. "edit_menu_interaction".
    pub fn name(self) -> &'static str {
        match self {
            PresentationStrategy::EditMenuInteraction => "edit_menu_interaction",
            PresentationStrategy::MenuController => "menu_controller",
            PresentationStrategy::PopupMenu => "popup_menu",
            PresentationStrategy::DomOverlay => "dom_overlay",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            PresentationStrategy::EditMenuInteraction,
            PresentationStrategy::MenuController,
            PresentationStrategy::PopupMenu,
            PresentationStrategy::DomOverlay,
        ]
        .into_iter()
        .find(|s| s.name() == name)
    }

    /// Lowest platform version that supports this strategy natively.
    fn min_platform(self) -> Option<PlatformVersion> {
        match self {
            PresentationStrategy::EditMenuInteraction => Some(PlatformVersion::new(16, 0)),
            PresentationStrategy::MenuController => Some(PlatformVersion::new(13, 0)),
            PresentationStrategy::PopupMenu => Some(PlatformVersion::new(0, 0)),
            PresentationStrategy::DomOverlay => None,
        }
    }

    /// Whether a native platform of `version` can use this strategy.
    pub fn is_supported(self, version: PlatformVersion) -> bool {
        self.min_platform().is_some_and(|min| version >= min)
    }
}

/// Pick the native strategy for `version`.
///
/// A supported `preferred` strategy wins; otherwise the first supported
/// entry of [`NATIVE_PREFERENCE`].
pub fn select_native_strategy(
    version: PlatformVersion,
    preferred: Option<PresentationStrategy>,
) -> PresentationStrategy {
    if let Some(preferred) = preferred {
        if preferred.is_supported(version) {
            return preferred;
        }
        tracing::warn!(
            "Presentation '{}' unsupported on platform {}.{}, falling back",
            preferred.name(),
            version.major,
            version.minor
        );
    }

    NATIVE_PREFERENCE
        .into_iter()
        .find(|s| s.is_supported(version))
        .unwrap_or(PresentationStrategy::PopupMenu)
}
