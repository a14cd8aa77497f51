use crate::schema::{MenuFile, PickerConfig};
use anyhow::{bail, Context};
use menupick_core::{default_menu, parse_custom_items, Item, RngState};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

const PICKER_CONFIG_FILE: &str = "picker.json";
const MENUS_DIR: &str = "menus";
pub const DEFAULT_LOCALE: &str = "ko_KR";

/// Reads `picker.json` from `dir`, or returns defaults when it is absent.
pub fn load_picker_config(dir: &Path) -> anyhow::Result<PickerConfig> {
    let path = dir.join(PICKER_CONFIG_FILE);
    if !path.exists() {
        tracing::debug!("no picker config at {}, using defaults", path.display());
        return Ok(PickerConfig::default());
    }
    let config: PickerConfig = load_json(&path)?;
    validate_picker_config(&config).with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

pub fn parse_picker_config(raw: &str) -> anyhow::Result<PickerConfig> {
    let config: PickerConfig = serde_json::from_str(raw).context("parse picker config")?;
    validate_picker_config(&config)?;
    Ok(config)
}

pub fn validate_picker_config(config: &PickerConfig) -> anyhow::Result<()> {
    if config.default_max_selection == 0 {
        bail!("default_max_selection must be at least 1");
    }
    if config.custom_max_selection == 0 {
        bail!("custom_max_selection must be at least 1");
    }
    if config.shuffle_steps == 0 {
        bail!("shuffle_steps must be at least 1");
    }
    if config.glyphs.is_empty() {
        bail!("glyph palette must not be empty");
    }
    if let Some(idx) = config.glyphs.iter().position(|glyph| glyph.trim().is_empty()) {
        bail!("glyph {idx} is blank");
    }
    Ok(())
}

/// Loads the default menu for `locale`, falling back to the bundled
/// locale file and then to the built-in list.
pub fn load_menu(dir: &Path, locale: Option<&str>) -> anyhow::Result<Vec<Item>> {
    let locale = normalize_locale(locale);
    let menus = dir.join(MENUS_DIR);
    for candidate in [locale.as_str(), DEFAULT_LOCALE] {
        let path = menus.join(format!("{candidate}.json"));
        if !path.exists() {
            continue;
        }
        let menu: MenuFile = load_json(&path)?;
        validate_menu(&menu.items).with_context(|| format!("validate {}", path.display()))?;
        if candidate != locale {
            tracing::warn!("no menu for {locale}, using {candidate}");
        }
        return Ok(menu.items);
    }
    tracing::warn!(
        "no menu files under {}, using built-in menu",
        menus.display()
    );
    Ok(default_menu())
}

fn validate_menu(items: &[Item]) -> anyhow::Result<()> {
    for (idx, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            bail!("menu item {idx} has an empty name");
        }
    }
    Ok(())
}

/// Reads free-text custom items from a file using the same rules as typed input.
pub fn load_custom_items(
    path: &Path,
    config: &PickerConfig,
    rng: &mut RngState,
) -> anyhow::Result<Vec<Item>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let items = parse_custom_items(&raw, &config.glyphs, config.glyph_assignment, rng)
        .with_context(|| format!("parse {}", path.display()))?;
    tracing::debug!("loaded {} custom items from {}", items.len(), path.display());
    Ok(items)
}

pub fn normalize_locale(locale: Option<&str>) -> String {
    let raw = locale.unwrap_or(DEFAULT_LOCALE).trim();
    if raw.is_empty() {
        return DEFAULT_LOCALE.to_string();
    }
    let lowered = raw.replace('-', "_").to_ascii_lowercase();
    match lowered.as_str() {
        "ko" | "ko_kr" | "kr" => "ko_KR".to_string(),
        "en" | "en_us" => "en_US".to_string(),
        _ => raw.replace('-', "_"),
    }
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
