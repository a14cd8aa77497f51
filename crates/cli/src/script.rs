use anyhow::{bail, Context};
use menupick_core::{
    parse_custom_items, Event, EventBus, Item, PickMode, PickerConfig, RngState,
    SelectionSession,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptAction {
    pub action: String,
    #[serde(default)]
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct Script {
    pub seed: Option<u64>,
    pub mode: Option<PickMode>,
    pub custom: Option<String>,
    pub actions: Vec<ScriptAction>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    mode: Option<PickMode>,
    #[serde(default)]
    custom: Option<String>,
    #[serde(default)]
    actions: Vec<ScriptAction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ScriptPayload {
    Script(ScriptFile),
    Actions(Vec<ScriptAction>),
}

pub struct ScriptRun {
    pub session: SelectionSession,
    pub events: Vec<Event>,
    pub seed: u64,
}

pub fn load_script(path: &Path) -> anyhow::Result<Script> {
    let body = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_script(&body).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_script(body: &str) -> anyhow::Result<Script> {
    let payload: ScriptPayload = serde_json::from_str(body)?;
    let script = match payload {
        ScriptPayload::Script(file) => Script {
            seed: file.seed,
            mode: file.mode,
            custom: file.custom,
            actions: file.actions,
        },
        ScriptPayload::Actions(actions) => Script {
            actions,
            ..Script::default()
        },
    };
    Ok(script)
}

/// Plays `script` against a fresh session. `custom` text switches the
/// default mode to custom unless the script names a mode.
pub fn apply_script(
    script: &Script,
    config: &PickerConfig,
    menu: &[Item],
    default_seed: u64,
) -> anyhow::Result<ScriptRun> {
    let seed = script.seed.unwrap_or(default_seed);
    let mut rng = RngState::from_seed(seed);
    let mut events = EventBus::default();
    let mode = script.mode.unwrap_or(if script.custom.is_some() {
        PickMode::Custom
    } else {
        PickMode::Default
    });
    let items = match (mode, script.custom.as_deref()) {
        (PickMode::Custom, Some(text)) => {
            parse_custom_items(text, &config.glyphs, config.glyph_assignment, &mut rng)?
        }
        (PickMode::Custom, None) => bail!("custom mode needs a `custom` item list"),
        (PickMode::Default, _) => menu.to_vec(),
    };
    let mut session = SelectionSession::start(mode, config, items, &mut events)?;
    for (idx, action) in script.actions.iter().enumerate() {
        match action.action.as_str() {
            "shuffle" => {
                session.shuffle(&mut rng, &mut events);
            }
            "select" | "pick" => {
                if action.indices.is_empty() {
                    bail!("action {idx}: select needs at least one index");
                }
                for slot in &action.indices {
                    session
                        .select_at(*slot, &mut events)
                        .with_context(|| format!("action {idx}: select slot {slot}"))?;
                }
            }
            "reset" => session.reset(&mut events),
            other => bail!("action {idx}: unknown action `{other}`"),
        }
    }
    tracing::debug!(seed, actions = script.actions.len(), "script applied");
    Ok(ScriptRun {
        session,
        events: events.drain().collect(),
        seed,
    })
}
