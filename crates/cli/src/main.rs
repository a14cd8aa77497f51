mod render;
mod script;

use anyhow::Context;
use menupick_core::{
    parse_custom_items, play_select, play_shuffle, EventBus, Item, PickMode, PickerConfig,
    RngState, SelectionSession, TableRenderer, DEFAULT_SEED,
};
use menupick_cui::locale::{
    format_event, home_option, input_error_message, instruction, mode_label,
    session_error_message, UiLocale,
};
use menupick_data::{load_custom_items, load_menu, load_picker_config};
use render::TextRenderer;
use script::{apply_script, load_script};
use std::io::{self, BufRead, Stdout, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone)]
struct CliOptions {
    cui: bool,
    json: bool,
    fast: bool,
    random_seed: bool,
    seed: Option<u64>,
    locale: UiLocale,
    assets: PathBuf,
    custom: Option<String>,
    custom_file: Option<PathBuf>,
    script: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Empty,
    Help,
    Start,
    Custom(Option<String>),
    Shuffle,
    Pick(Vec<usize>),
    Reset,
    Show,
    Home,
    Lang(String),
    Quit,
}

/// REPL state: one optional session plus everything needed to start another.
struct Table {
    locale: UiLocale,
    assets: PathBuf,
    config: PickerConfig,
    menu: Vec<Item>,
    rng: RngState,
    events: EventBus,
    session: Option<SelectionSession>,
    renderer: TextRenderer<Stdout>,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    if options.cui {
        let launch = menupick_cui::LaunchOptions {
            locale: Some(options.locale.code().to_string()),
            seed: options.seed,
            random_seed: options.random_seed,
            assets: Some(options.assets.clone()),
        };
        if let Err(err) = menupick_cui::run(launch) {
            eprintln!("cui launch error: {err:#}");
            std::process::exit(1);
        }
        return;
    }
    if let Err(err) = run(options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(options: CliOptions) -> anyhow::Result<()> {
    let config = load_picker_config(&options.assets).context("load picker config")?;
    let menu = load_menu(&options.assets, Some(options.locale.code())).context("load menu")?;
    let seed = match options.seed {
        Some(seed) => seed,
        None if options.random_seed => RngState::from_entropy().seed(),
        None => DEFAULT_SEED,
    };
    tracing::debug!(seed, locale = options.locale.code(), "starting menupick");

    if let Some(path) = options.script.as_ref() {
        return run_script_file(&options, path, &config, &menu, seed);
    }

    let mut table = Table {
        locale: options.locale,
        assets: options.assets.clone(),
        config,
        menu,
        rng: RngState::from_seed(seed),
        events: EventBus::default(),
        session: None,
        renderer: TextRenderer::new(io::stdout(), options.locale, !options.fast),
    };
    println!(
        "{}: {} | {}: {}",
        table.locale.text("locale", "언어"),
        table.locale.code(),
        table.locale.text("seed", "시드"),
        seed
    );
    if let Some(path) = options.custom_file.as_ref() {
        let items = load_custom_items(path, &table.config, &mut table.rng)?;
        table.enter_game(PickMode::Custom, items);
    } else if let Some(text) = options.custom.as_deref() {
        table.start_custom(text);
    } else {
        print_home(table.locale, &table.config);
    }
    repl(&mut table)
}

fn run_script_file(
    options: &CliOptions,
    path: &Path,
    config: &PickerConfig,
    menu: &[Item],
    seed: u64,
) -> anyhow::Result<()> {
    let script = load_script(path)?;
    let run = apply_script(&script, config, menu, seed)
        .with_context(|| format!("run script {}", path.display()))?;
    let view = run.session.view();
    if options.json {
        let body = serde_json::to_string_pretty(&view).context("serialize session view")?;
        println!("{body}");
        return Ok(());
    }
    println!("{}: {}", options.locale.text("seed", "시드"), run.seed);
    for event in &run.events {
        println!(
            "{}: {}",
            options.locale.text("event", "이벤트"),
            format_event(options.locale, event)
        );
    }
    let mut renderer = TextRenderer::new(io::stdout(), options.locale, false);
    renderer.render_deck(&view);
    Ok(())
}

fn repl(table: &mut Table) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", table.prompt());
        io::stdout().flush().context("flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read stdin")?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match command {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => print_help(table.locale),
            Command::Home => {
                table.session = None;
                print_home(table.locale, &table.config);
            }
            Command::Start => {
                let items = table.menu.clone();
                table.enter_game(PickMode::Default, items);
            }
            Command::Custom(Some(text)) => table.start_custom(&text),
            Command::Custom(None) => {
                println!(
                    "{}",
                    table.locale.text(
                        "enter menu items, one per line; finish with an empty line",
                        "메뉴를 한 줄에 하나씩 입력하고 빈 줄로 마치세요",
                    )
                );
                let mut text = String::new();
                for line in lines.by_ref() {
                    let line = line.context("read stdin")?;
                    if line.trim().is_empty() {
                        break;
                    }
                    text.push_str(&line);
                    text.push('\n');
                }
                table.start_custom(&text);
            }
            Command::Shuffle => table.shuffle(),
            Command::Pick(slots) => table.pick(&slots),
            Command::Reset => table.reset(),
            Command::Show => table.show(),
            Command::Lang(code) => table.set_locale(UiLocale::from_opt(Some(&code))),
        }
        table.drain_events();
    }
    Ok(())
}

impl Table {
    fn prompt(&self) -> String {
        match self.session.as_ref() {
            Some(session) => format!(
                "[{} {}/{}]> ",
                mode_label(self.locale, session.mode()),
                session.selected_count(),
                session.max_selection()
            ),
            None => "> ".to_string(),
        }
    }

    fn start_custom(&mut self, text: &str) {
        match parse_custom_items(
            text,
            &self.config.glyphs,
            self.config.glyph_assignment,
            &mut self.rng,
        ) {
            Ok(items) => self.enter_game(PickMode::Custom, items),
            Err(err) => println!("{}", input_error_message(self.locale, &err)),
        }
    }

    fn enter_game(&mut self, mode: PickMode, items: Vec<Item>) {
        match SelectionSession::start(mode, &self.config, items, &mut self.events) {
            Ok(session) => {
                self.renderer
                    .line(&instruction(self.locale, session.max_selection()));
                self.renderer.render_deck_of(&session);
                self.session = Some(session);
            }
            Err(err) => println!("{}", session_error_message(self.locale, &err)),
        }
    }

    fn shuffle(&mut self) {
        let Some(session) = self.session.as_mut() else {
            println!("{}", self.locale.text("start a game first", "먼저 게임을 시작하세요"));
            return;
        };
        if !play_shuffle(session, &mut self.rng, &mut self.events, &mut self.renderer) {
            println!(
                "{}",
                self.locale.text("already shuffled", "이미 카드를 섞었습니다")
            );
        }
    }

    fn pick(&mut self, slots: &[usize]) {
        let Some(session) = self.session.as_mut() else {
            println!("{}", self.locale.text("start a game first", "먼저 게임을 시작하세요"));
            return;
        };
        for slot in slots {
            if let Err(err) = play_select(session, *slot, &mut self.events, &mut self.renderer) {
                println!("{}", session_error_message(self.locale, &err));
                break;
            }
        }
    }

    fn reset(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.reset(&mut self.events);
        self.renderer
            .line(&instruction(self.locale, session.max_selection()));
        self.renderer.render_deck_of(session);
    }

    fn show(&mut self) {
        match self.session.as_ref() {
            Some(session) => self.renderer.render_deck_of(session),
            None => print_home(self.locale, &self.config),
        }
    }

    fn set_locale(&mut self, locale: UiLocale) {
        self.locale = locale;
        self.renderer.locale = locale;
        match load_menu(&self.assets, Some(locale.code())) {
            Ok(menu) => self.menu = menu,
            Err(err) => tracing::warn!("menu reload failed: {err:#}"),
        }
        println!("{}: {}", locale.text("locale", "언어"), locale.code());
    }

    fn drain_events(&mut self) {
        self.renderer.print_events(self.events.drain());
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let input = line.trim();
    if input.is_empty() {
        return Ok(Command::Empty);
    }
    let (cmd, rest) = match input.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input, ""),
    };
    let command = match cmd {
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "start" | "random" | "1" => Command::Start,
        "custom" | "c" | "2" => {
            if rest.is_empty() {
                Command::Custom(None)
            } else {
                Command::Custom(Some(rest.replace("\\n", "\n")))
            }
        }
        "shuffle" | "s" => Command::Shuffle,
        "pick" | "p" | "select" => {
            let slots = rest
                .split(|ch: char| ch == ',' || ch.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(|token| {
                    token
                        .parse::<usize>()
                        .map_err(|_| format!("invalid slot: {token}"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            if slots.is_empty() {
                return Err("usage: pick <slot> [slot...]".to_string());
            }
            Command::Pick(slots)
        }
        "reset" | "r" => Command::Reset,
        "show" | "ls" => Command::Show,
        "home" => Command::Home,
        "lang" | "l" => {
            if rest.is_empty() {
                return Err("usage: lang <ko|en>".to_string());
            }
            Command::Lang(rest.to_string())
        }
        other => return Err(format!("unknown command: {other} (try help)")),
    };
    Ok(command)
}

fn parse_cli_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        cui: false,
        json: false,
        fast: false,
        random_seed: false,
        seed: None,
        locale: UiLocale::from_opt(std::env::var("MENUPICK_LANG").ok().as_deref()),
        assets: PathBuf::from("assets"),
        custom: None,
        custom_file: None,
        script: None,
    };
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        let mut value = || {
            idx += 1;
            args.get(idx)
                .cloned()
                .ok_or_else(|| format!("{flag} needs a value"))
        };
        match flag {
            "--cui" => options.cui = true,
            "--json" => options.json = true,
            "--fast" => options.fast = true,
            "--random-seed" => options.random_seed = true,
            "--lang" | "-l" => options.locale = UiLocale::from_opt(Some(&value()?)),
            "--seed" => {
                let raw = value()?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed: {raw}"))?;
                options.seed = Some(seed);
            }
            "--assets" => options.assets = PathBuf::from(value()?),
            "--custom" => options.custom = Some(value()?),
            "--custom-file" => options.custom_file = Some(PathBuf::from(value()?)),
            "--script" => options.script = Some(PathBuf::from(value()?)),
            other => return Err(format!("unknown option: {other}")),
        }
        idx += 1;
    }
    Ok(options)
}

fn print_home(locale: UiLocale, config: &PickerConfig) {
    println!(
        "{}",
        locale.text("== What should we eat today? ==", "== 오늘 뭐 먹지? ==")
    );
    for (command, mode) in [("start", PickMode::Default), ("custom", PickMode::Custom)] {
        println!(
            "  {command:<7} {}",
            home_option(locale, mode, config.max_selection_for(mode))
        );
    }
    println!("  help    {}", locale.text("all commands", "전체 명령어"));
}

fn print_help(locale: UiLocale) {
    println!("{}", locale.text("commands:", "명령어:"));
    println!(
        "  start | custom [a, b, c] | shuffle | pick <slot>... | reset | show | home | lang <ko|en> | quit"
    );
    println!(
        "{}",
        locale.text(
            "custom without items reads one item per line until an empty line",
            "custom 뒤에 메뉴가 없으면 빈 줄이 나올 때까지 한 줄씩 읽습니다",
        )
    );
}
