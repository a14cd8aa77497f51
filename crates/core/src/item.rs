use crate::{GlyphAssignment, RngState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Item {
    pub name: String,
    pub emoji: String,
}

impl Item {
    pub fn new(name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: emoji.into(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.emoji)
    }
}

const DEFAULT_MENU: [(&str, &str); 20] = [
    ("김치찌개", "🥘"),
    ("된장찌개", "🍲"),
    ("비빔밥", "🥗"),
    ("불고기", "🥩"),
    ("삼겹살", "🥓"),
    ("떡볶이", "🍢"),
    ("김밥", "🍙"),
    ("라면", "🍜"),
    ("짜장면", "🥡"),
    ("샤브샤브", "🥗"),
    ("치킨", "🍗"),
    ("피자", "🍕"),
    ("햄버거", "🍔"),
    ("돈까스", "🍛"),
    ("초밥", "🍣"),
    ("순대국", "🥣"),
    ("칼국수", "🥢"),
    ("냉면", "🧊"),
    ("제육볶음", "🍖"),
    ("갈비탕", "🍲"),
];

/// Built-in menu used when no menu asset is available.
pub fn default_menu() -> Vec<Item> {
    DEFAULT_MENU
        .iter()
        .map(|(name, emoji)| Item::new(*name, *emoji))
        .collect()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("no menu items entered")]
    Blank,
    #[error("at least one menu item is required")]
    NoItems,
    #[error("glyph palette is empty")]
    EmptyPalette,
}

/// Splits free text on newlines and commas, dropping blank tokens.
pub fn split_custom_tokens(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_custom_items(
    text: &str,
    palette: &[String],
    assignment: GlyphAssignment,
    rng: &mut RngState,
) -> Result<Vec<Item>, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Blank);
    }
    let names = split_custom_tokens(text);
    if names.is_empty() {
        return Err(InputError::NoItems);
    }
    if palette.is_empty() {
        return Err(InputError::EmptyPalette);
    }
    let items = names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let glyph = match assignment {
                GlyphAssignment::Random => &palette[rng.index(palette.len())],
                GlyphAssignment::Cycle => &palette[idx % palette.len()],
            };
            Item::new(name, glyph.clone())
        })
        .collect();
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_GLYPHS;

    fn palette() -> Vec<String> {
        DEFAULT_GLYPHS.iter().map(|glyph| glyph.to_string()).collect()
    }

    #[test]
    fn splits_on_commas_and_newlines() {
        let tokens = split_custom_tokens("kimchi, rice\nsoup");
        assert_eq!(tokens, vec!["kimchi", "rice", "soup"]);
    }

    #[test]
    fn drops_empty_tokens_and_crlf() {
        let tokens = split_custom_tokens(" ramen ,,\r\n\r\n  udon\r\n,");
        assert_eq!(tokens, vec!["ramen", "udon"]);
    }

    #[test]
    fn blank_submission_is_rejected() {
        let mut rng = RngState::from_seed(1);
        let err = parse_custom_items("   \n ", &palette(), GlyphAssignment::Random, &mut rng);
        assert_eq!(err, Err(InputError::Blank));
    }

    #[test]
    fn separators_only_is_rejected() {
        let mut rng = RngState::from_seed(1);
        let err = parse_custom_items(", ,\n,", &palette(), GlyphAssignment::Random, &mut rng);
        assert_eq!(err, Err(InputError::NoItems));
    }

    #[test]
    fn random_glyphs_come_from_palette() {
        let mut rng = RngState::from_seed(9);
        let palette = palette();
        let items = parse_custom_items("a,b,c,d,e", &palette, GlyphAssignment::Random, &mut rng)
            .expect("items");
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|item| palette.contains(&item.emoji)));
    }

    #[test]
    fn cycle_glyphs_are_deterministic() {
        let mut rng = RngState::from_seed(9);
        let palette = vec!["x".to_string(), "y".to_string()];
        let items = parse_custom_items("a\nb\nc", &palette, GlyphAssignment::Cycle, &mut rng)
            .expect("items");
        let glyphs: Vec<&str> = items.iter().map(|item| item.emoji.as_str()).collect();
        assert_eq!(glyphs, vec!["x", "y", "x"]);
    }

    #[test]
    fn default_menu_has_twenty_dishes() {
        let menu = default_menu();
        assert_eq!(menu.len(), 20);
        assert_eq!(menu[0], Item::new("김치찌개", "🥘"));
    }
}
