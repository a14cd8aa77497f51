use serde::{Deserialize, Serialize};

pub use menupick_core::{GlyphAssignment, Item, PickerConfig};

/// `assets/menus/<locale>.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuFile {
    #[serde(default)]
    pub locale: Option<String>,
    pub items: Vec<Item>,
}
