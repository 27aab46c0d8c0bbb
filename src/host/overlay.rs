use serde::{Deserialize, Serialize};

/// The two overlays the inspector ever draws into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayKind {
    /// Follows the pointer while the picker is armed.
    Picker,
    /// Short-lived highlight shown by `reveal`.
    Reveal,
}

impl std::fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlayKind::Picker => write!(f, "picker"),
            OverlayKind::Reveal => write!(f, "reveal"),
        }
    }
}

/// Visual style of an overlay box. Values are CSS strings handed to the host
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub background: String,
    pub border: String,
    pub box_shadow: Option<String>,
    pub z_index: i32,
}

impl OverlayStyle {
    pub fn picker() -> Self {
        Self {
            background: "rgba(71, 123, 228, 0.3)".into(),
            border: "2px solid #477be4".into(),
            box_shadow: None,
            z_index: 999_999,
        }
    }

    pub fn reveal() -> Self {
        Self {
            box_shadow: Some("0 0 0 3px rgba(71, 123, 228, 0.2)".into()),
            ..Self::picker()
        }
    }
}
