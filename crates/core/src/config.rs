use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SELECTION: usize = 3;
pub const CUSTOM_MAX_SELECTION: usize = 1;
pub const DEFAULT_SHUFFLE_STEPS: u8 = 5;
pub const DEFAULT_STEP_MILLIS: u64 = 250;

pub const DEFAULT_GLYPHS: [&str; 12] = [
    "🍽️", "🥢", "🍴", "🥄", "🥡", "🍱", "🥣", "🥗", "🍖", "🍗", "🍔", "🍕",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PickMode {
    Default,
    Custom,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GlyphAssignment {
    #[default]
    Random,
    Cycle,
}

/// Per-session limits derived from [`PickerConfig`] for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRules {
    pub max_selection: usize,
    pub shuffle_steps: u8,
    pub step_millis: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickerConfig {
    #[serde(default = "default_max_selection")]
    pub default_max_selection: usize,
    #[serde(default = "custom_max_selection")]
    pub custom_max_selection: usize,
    #[serde(default = "default_shuffle_steps")]
    pub shuffle_steps: u8,
    #[serde(default = "default_step_millis")]
    pub step_millis: u64,
    #[serde(default = "default_glyphs")]
    pub glyphs: Vec<String>,
    #[serde(default)]
    pub glyph_assignment: GlyphAssignment,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            default_max_selection: DEFAULT_MAX_SELECTION,
            custom_max_selection: CUSTOM_MAX_SELECTION,
            shuffle_steps: DEFAULT_SHUFFLE_STEPS,
            step_millis: DEFAULT_STEP_MILLIS,
            glyphs: default_glyphs(),
            glyph_assignment: GlyphAssignment::Random,
        }
    }
}

impl PickerConfig {
    pub fn max_selection_for(&self, mode: PickMode) -> usize {
        match mode {
            PickMode::Default => self.default_max_selection,
            PickMode::Custom => self.custom_max_selection,
        }
    }

    pub fn rules_for(&self, mode: PickMode) -> SessionRules {
        SessionRules {
            max_selection: self.max_selection_for(mode).max(1),
            shuffle_steps: self.shuffle_steps.max(1),
            step_millis: self.step_millis,
        }
    }
}

fn default_max_selection() -> usize {
    DEFAULT_MAX_SELECTION
}

fn custom_max_selection() -> usize {
    CUSTOM_MAX_SELECTION
}

fn default_shuffle_steps() -> u8 {
    DEFAULT_SHUFFLE_STEPS
}

fn default_step_millis() -> u64 {
    DEFAULT_STEP_MILLIS
}

fn default_glyphs() -> Vec<String> {
    DEFAULT_GLYPHS.iter().map(|glyph| glyph.to_string()).collect()
}
