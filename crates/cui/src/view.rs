use crate::app::{App, Screen, GRID_COLUMNS};
use crate::locale::{home_option, instruction, mode_label, shuffle_label};
use menupick_core::{Phase, PickMode, SelectionSession};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Span, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(8),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);
    match app.screen {
        Screen::Home => draw_home(frame, root[1], app),
        Screen::Input => draw_input(frame, root[1], app),
        Screen::Game => draw_game(frame, root[1], app),
    }
    draw_events(frame, root[2], app);

    if app.show_help {
        draw_help_popup(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "{} | {}: {} | {}: {}",
        app.locale.text("Menu Picker", "오늘 뭐 먹지?"),
        app.locale.text("Seed", "시드"),
        app.seed,
        app.locale.text("Lang", "언어"),
        app.locale.code(),
    );
    let lines = vec![
        Line::from(title.bold()),
        Line::from(format!(
            "{}: {} | {}",
            app.locale.text("Status", "상태"),
            app.status_line,
            app.next_hint()
        )),
    ];
    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn draw_home(frame: &mut Frame, area: Rect, app: &App) {
    let options = [PickMode::Default, PickMode::Custom]
        .map(|mode| home_option(app.locale, mode, app.config.max_selection_for(mode)));
    let mut lines = vec![
        Line::from(""),
        Line::from(
            app.locale
                .text("What should we eat today?", "오늘 뭐 먹을지 카드로 골라보세요!")
                .bold(),
        ),
        Line::from(""),
    ];
    for (idx, label) in options.iter().enumerate() {
        let style = if idx == app.home_cursor {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("  {label}  "), style)));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Home", "홈"));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(app.locale.text(
            "Separate items with commas or new lines.",
            "메뉴를 쉼표나 줄바꿈으로 구분해 입력하세요.",
        )),
        Line::from(""),
    ];
    let mut buffer_lines = app.input_buffer.split('\n').peekable();
    while let Some(line) = buffer_lines.next() {
        let cursor = if buffer_lines.peek().is_none() { "_" } else { "" };
        lines.push(Line::from(format!("> {line}{cursor}")));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(app.locale.text("Custom menu", "직접 입력"));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_game(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let controls = Line::from(vec![
        Span::raw(format!("{}  ", instruction(app.locale, session.max_selection()))),
        Span::styled(
            format!(
                "[{}]",
                shuffle_label(app.locale, session.phase(), session.max_selection())
            ),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]);
    let title = format!(
        "{} {}/{}",
        mode_label(app.locale, session.mode()),
        session.selected_count(),
        session.max_selection()
    );
    frame.render_widget(
        Paragraph::new(controls).block(Block::default().borders(Borders::ALL).title(title)),
        parts[0],
    );

    let table_block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Cards", "카드"))
        .border_style(if session.is_shuffling() {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default()
        });
    frame.render_widget(
        Paragraph::new(card_rows(session, app.card_cursor)).block(table_block),
        parts[1],
    );

    let revealed: Vec<String> = session.revealed().iter().map(|item| item.label()).collect();
    let result = if revealed.is_empty() {
        "-".to_string()
    } else {
        revealed.join("   ")
    };
    frame.render_widget(
        Paragraph::new(Line::from(result.bold()))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(app.locale.text("Result", "결과")),
            ),
        parts[2],
    );
}

fn card_rows(session: &SelectionSession, cursor: usize) -> Vec<Line<'static>> {
    let entries = session.deck().entries();
    let mut rows = Vec::new();
    for (row_idx, row) in entries.chunks(GRID_COLUMNS).enumerate() {
        let mut spans = Vec::with_capacity(row.len());
        for (col_idx, entry) in row.iter().enumerate() {
            let slot = row_idx * GRID_COLUMNS + col_idx;
            let label = match session.item_for(entry) {
                Some(item) if entry.selected => format!("[{} {}]", item.emoji, item.name),
                _ => format!("[ ?? {slot:>2} ]"),
            };
            let mut style = if entry.selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if session.phase() == Phase::Shuffling {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default()
            };
            if slot == cursor && session.phase() != Phase::Shuffling {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        rows.push(Line::from(spans));
        rows.push(Line::from(""));
    }
    rows
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default()
        .title(app.locale.text("Events", "기록"))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(app.locale.text(
            "q quit | ? help | L language | esc back",
            "q 종료 | ? 도움말 | L 언어 | esc 뒤로",
        )),
        Line::from(app.locale.text(
            "home: enter start | 1 random menu | 2/c custom menu",
            "홈: enter 시작 | 1 랜덤 메뉴 | 2/c 직접 입력",
        )),
        Line::from(app.locale.text(
            "input: enter start | ctrl+n new line | backspace delete",
            "입력: enter 시작 | ctrl+n 줄바꿈 | backspace 지우기",
        )),
        Line::from(app.locale.text(
            "game: s shuffle | arrows/hjkl move | space pick | r reset | H home",
            "게임: s 섞기 | 방향키/hjkl 이동 | space 뽑기 | r 다시 | H 홈",
        )),
    ];
    let block = Block::default()
        .title(app.locale.text("Help", "도움말"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
