use crate::locale::{
    format_event, input_error_message, instruction, session_error_message, shuffle_label,
    UiLocale,
};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use menupick_core::{
    parse_custom_items, EventBus, Item, Phase, PickMode, PickerConfig, RngState,
    SelectionSession, SessionError,
};
use menupick_data::{load_menu, load_picker_config};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const GRID_COLUMNS: usize = 5;
const MAX_EVENT_LOG: usize = 200;
const HOME_OPTIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Input,
    Game,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
}

pub struct App {
    pub locale: UiLocale,
    pub seed: u64,
    pub assets: PathBuf,
    pub config: PickerConfig,
    pub menu: Vec<Item>,
    pub rng: RngState,
    pub events: EventBus,
    pub screen: Screen,
    pub session: Option<SelectionSession>,
    pub home_cursor: usize,
    pub card_cursor: usize,
    pub input_buffer: String,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
    last_step: Option<Instant>,
}

impl App {
    pub fn new(locale: UiLocale, seed: u64, config: PickerConfig, menu: Vec<Item>) -> Self {
        Self {
            locale,
            seed,
            assets: PathBuf::from("assets"),
            config,
            menu,
            rng: RngState::from_seed(seed),
            events: EventBus::default(),
            screen: Screen::Home,
            session: None,
            home_cursor: 0,
            card_cursor: 0,
            input_buffer: String::new(),
            event_log: VecDeque::new(),
            status_line: locale.text("ready", "준비 완료").to_string(),
            show_help: false,
            should_quit: false,
            last_step: None,
        }
    }

    pub fn bootstrap(locale: UiLocale, seed: u64, assets: &Path) -> Result<Self> {
        let config = load_picker_config(assets).context("load picker config")?;
        let menu = load_menu(assets, Some(locale.code())).context("load menu")?;
        tracing::debug!(seed, items = menu.len(), "cui bootstrapped");
        let mut app = Self::new(locale, seed, config, menu);
        app.assets = assets.to_path_buf();
        Ok(app)
    }

    pub fn on_tick(&mut self) {
        let shuffling = self
            .session
            .as_ref()
            .map(|session| session.is_shuffling())
            .unwrap_or(false);
        if !shuffling {
            return;
        }
        let step_time = Duration::from_millis(self.config.step_millis);
        if let Some(last) = self.last_step {
            if last.elapsed() < step_time {
                return;
            }
        }
        self.advance_shuffle();
    }

    /// Runs the next shuffle step regardless of timing.
    pub fn advance_shuffle(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(step) = session.shuffle_step(&mut self.rng, &mut self.events) else {
            return false;
        };
        self.last_step = Some(Instant::now());
        if step.is_last() {
            let label = shuffle_label(self.locale, session.phase(), session.max_selection());
            self.push_status(label);
        }
        self.flush_events();
        true
    }

    pub fn start_default_game(&mut self) {
        let items = self.menu.clone();
        self.enter_game(PickMode::Default, items);
    }

    pub fn open_custom_input(&mut self) {
        self.screen = Screen::Input;
        self.input_buffer.clear();
        self.push_status(self.locale.text(
            "type menu items separated by commas",
            "메뉴를 쉼표로 구분해 입력하세요",
        ));
    }

    pub fn submit_custom_input(&mut self) {
        let parsed = parse_custom_items(
            &self.input_buffer,
            &self.config.glyphs,
            self.config.glyph_assignment,
            &mut self.rng,
        );
        match parsed {
            Ok(items) => self.enter_game(PickMode::Custom, items),
            Err(err) => self.push_status(input_error_message(self.locale, &err)),
        }
    }

    fn enter_game(&mut self, mode: PickMode, items: Vec<Item>) {
        match SelectionSession::start(mode, &self.config, items, &mut self.events) {
            Ok(session) => {
                self.push_status(instruction(self.locale, session.max_selection()));
                self.session = Some(session);
                self.screen = Screen::Game;
                self.card_cursor = 0;
                self.last_step = None;
            }
            Err(err) => self.push_error(err),
        }
        self.flush_events();
    }

    pub fn go_home(&mut self) {
        self.screen = Screen::Home;
        self.session = None;
        self.input_buffer.clear();
        self.show_help = false;
    }

    pub fn shuffle(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.begin_shuffle(&mut self.events) {
            return;
        }
        let label = shuffle_label(self.locale, session.phase(), session.max_selection());
        self.push_status(label);
        self.advance_shuffle();
    }

    pub fn pick_at_cursor(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let result = session.select_at(self.card_cursor, &mut self.events);
        match result {
            Ok(item) => {
                let status = format!("{} {}", self.locale.text("picked", "뽑음:"), item.label());
                self.push_status(status);
            }
            Err(err) => self.push_error(err),
        }
        self.flush_events();
    }

    pub fn reset(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.reset(&mut self.events);
        let max_selection = session.max_selection();
        self.card_cursor = 0;
        self.last_step = None;
        self.push_status(instruction(self.locale, max_selection));
        self.flush_events();
    }

    pub fn activate_primary(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.screen {
            Screen::Home => {
                if self.home_cursor == 0 {
                    self.start_default_game();
                } else {
                    self.open_custom_input();
                }
            }
            Screen::Input => self.submit_custom_input(),
            Screen::Game => match self.session.as_ref().map(|session| session.phase()) {
                Some(Phase::Idle) => self.shuffle(),
                Some(Phase::Shuffled) | Some(Phase::Complete) => self.pick_at_cursor(),
                Some(Phase::Shuffling) | None => {}
            },
        }
    }

    pub fn back(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.screen != Screen::Home {
            self.go_home();
        }
    }

    pub fn move_cursor(&mut self, direction: CursorMove) {
        match self.screen {
            Screen::Home => {
                let down = matches!(direction, CursorMove::Down | CursorMove::Right);
                move_index(&mut self.home_cursor, HOME_OPTIONS, down);
            }
            Screen::Game => {
                let len = self.deck_len();
                move_grid(&mut self.card_cursor, len, GRID_COLUMNS, direction);
            }
            Screen::Input => {}
        }
    }

    pub fn toggle_locale(&mut self) {
        self.locale = self.locale.toggled();
        match load_menu(&self.assets, Some(self.locale.code())) {
            Ok(menu) => self.menu = menu,
            Err(err) => tracing::warn!("menu reload failed: {err:#}"),
        }
        self.push_status(format!(
            "{}: {}",
            self.locale.text("language", "언어"),
            self.locale.code()
        ));
    }

    /// Consumes key presses while the custom input view is open.
    pub fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        if self.screen != Screen::Input || self.show_help {
            return false;
        }
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.go_home(),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.input_buffer.push('\n')
            }
            KeyCode::Enter => self.submit_custom_input(),
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char('c') if control => self.should_quit = true,
            KeyCode::Char('n') if control => self.input_buffer.push('\n'),
            KeyCode::Char(ch) => {
                if !control && !key.modifiers.contains(KeyModifiers::ALT) {
                    self.input_buffer.push(ch);
                }
            }
            _ => {}
        }
        true
    }

    pub fn deck_len(&self) -> usize {
        self.session
            .as_ref()
            .map(|session| session.deck().len())
            .unwrap_or(0)
    }

    pub fn next_hint(&self) -> String {
        match self.screen {
            Screen::Home => self
                .locale
                .text("enter: start  c: custom  q: quit", "enter: 시작  c: 직접 입력  q: 종료")
                .to_string(),
            Screen::Input => self
                .locale
                .text(
                    "enter: start  ctrl+n: new line  esc: back",
                    "enter: 시작  ctrl+n: 줄바꿈  esc: 뒤로",
                )
                .to_string(),
            Screen::Game => match self.session.as_ref().map(|session| session.phase()) {
                Some(Phase::Idle) => self.locale.text("s: shuffle", "s: 카드 섞기").to_string(),
                Some(Phase::Shuffling) => self.locale.text("shuffling...", "섞는 중...").to_string(),
                Some(Phase::Shuffled) => self
                    .locale
                    .text("arrows + space: pick a card", "방향키 + space: 카드 뽑기")
                    .to_string(),
                Some(Phase::Complete) | None => self
                    .locale
                    .text("r: play again  H: home", "r: 다시 하기  H: 처음으로")
                    .to_string(),
            },
        }
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    pub fn push_error(&mut self, err: SessionError) {
        self.status_line = session_error_message(self.locale, &err);
    }

    fn flush_events(&mut self) {
        let lines: Vec<String> = self
            .events
            .drain()
            .map(|event| format_event(self.locale, &event))
            .collect();
        for line in lines {
            self.push_event_line(line);
        }
    }

    fn push_event_line(&mut self, line: String) {
        self.event_log.push_back(line);
        while self.event_log.len() > MAX_EVENT_LOG {
            self.event_log.pop_front();
        }
    }
}

fn move_index(value: &mut usize, len: usize, down: bool) {
    if len == 0 {
        *value = 0;
        return;
    }
    if down {
        *value = (*value + 1) % len;
    } else if *value == 0 {
        *value = len - 1;
    } else {
        *value -= 1;
    }
}

fn move_grid(value: &mut usize, len: usize, columns: usize, direction: CursorMove) {
    if len == 0 {
        *value = 0;
        return;
    }
    let current = (*value).min(len - 1);
    *value = match direction {
        CursorMove::Left => current.saturating_sub(1),
        CursorMove::Right => (current + 1).min(len - 1),
        CursorMove::Up => current.checked_sub(columns).unwrap_or(current),
        CursorMove::Down => {
            if current + columns < len {
                current + columns
            } else {
                current
            }
        }
    };
}
