//! Top-level screen tabs
//!
//! Only the tower tab has gameplay; the rest are placeholders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Tower,
    Upgrades,
    Meta,
    Settings,
}

impl Tab {
    /// Tabs in display order
    pub const ALL: [Tab; 4] = [Tab::Tower, Tab::Upgrades, Tab::Meta, Tab::Settings];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Tower => "tower",
            Tab::Upgrades => "upgrades",
            Tab::Meta => "meta",
            Tab::Settings => "settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Tower => "Tower",
            Tab::Upgrades => "Upgrades",
            Tab::Meta => "Meta",
            Tab::Settings => "Settings",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tower" => Some(Tab::Tower),
            "upgrades" => Some(Tab::Upgrades),
            "meta" => Some(Tab::Meta),
            "settings" => Some(Tab::Settings),
            _ => None,
        }
    }

    /// Text shown in place of a screen that isn't built yet
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Tab::Tower => None,
            Tab::Upgrades => Some("Upgrades coming soon..."),
            Tab::Meta => Some("Meta progression coming soon..."),
            Tab::Settings => Some("Settings coming soon..."),
        }
    }
}
