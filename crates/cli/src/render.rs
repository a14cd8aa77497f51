use menupick_core::{
    EntryId, Event, Item, Phase, SelectionSession, SessionView, ShuffleStep, TableRenderer,
};
use menupick_cui::locale::{format_event, shuffle_label, UiLocale};
use std::io::Write;
use std::thread;
use std::time::Duration;

const ROW_WIDTH: usize = 5;

/// Prints the table as plain text. Write errors are ignored; a closed
/// stdout ends the REPL on the next read anyway.
pub struct TextRenderer<W: Write> {
    out: W,
    pub locale: UiLocale,
    pub animate: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, locale: UiLocale, animate: bool) -> Self {
        Self {
            out,
            locale,
            animate,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_results(&mut self, view: &SessionView) {
        let picks: Vec<String> = view.revealed.iter().map(Item::label).collect();
        let _ = writeln!(
            self.out,
            "{} ({}/{}): {}",
            self.locale.text("result", "결과"),
            view.selected_count,
            view.max_selection,
            if picks.is_empty() {
                "-".to_string()
            } else {
                picks.join(", ")
            }
        );
    }

    pub fn render_deck_of(&mut self, session: &SelectionSession) {
        self.render_deck(&session.view());
    }

    pub fn print_events(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            let _ = writeln!(
                self.out,
                "{}: {}",
                self.locale.text("event", "이벤트"),
                format_event(self.locale, &event)
            );
        }
    }

    pub fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn print_grid(&mut self, view: &SessionView) {
        for row in view.cards.chunks(ROW_WIDTH) {
            let cells: Vec<String> = row
                .iter()
                .map(|card| match &card.item {
                    Some(item) => format!("{:>2}:[{} {}]", card.slot, item.emoji, item.name),
                    None => format!("{:>2}:[ ?? ]", card.slot),
                })
                .collect();
            let _ = writeln!(self.out, "  {}", cells.join(" "));
        }
    }
}

impl<W: Write> TableRenderer for TextRenderer<W> {
    fn render_deck(&mut self, view: &SessionView) {
        let _ = writeln!(
            self.out,
            "[{}] {}/{}",
            shuffle_label(self.locale, view.phase, view.max_selection),
            view.selected_count,
            view.max_selection
        );
        self.print_grid(view);
        if view.phase != Phase::Idle {
            self.print_results(view);
        }
    }

    fn shuffle_step(&mut self, step: ShuffleStep, _view: &SessionView, duration: Duration) {
        let bar: String = (0..step.steps)
            .map(|idx| if idx < step.step { '#' } else { '.' })
            .collect();
        let _ = writeln!(
            self.out,
            "{} [{bar}] {}/{}",
            self.locale.text("shuffling", "섞는 중"),
            step.step,
            step.steps
        );
        let _ = self.out.flush();
        if self.animate && !duration.is_zero() {
            thread::sleep(duration);
        }
    }

    fn reveal(&mut self, entry: EntryId, item: &Item, view: &SessionView) {
        let slot = view
            .cards
            .iter()
            .find(|card| card.id == entry)
            .map(|card| card.slot)
            .unwrap_or_default();
        let _ = writeln!(
            self.out,
            "{} {slot} -> {} {}",
            self.locale.text("card", "카드"),
            item.name,
            item.emoji
        );
        self.print_results(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menupick_core::{
        default_menu, play_select, play_shuffle, EventBus, PickMode, PickerConfig, RngState,
        SelectionSession,
    };

    #[test]
    fn renders_shuffle_and_reveal() {
        let config = PickerConfig::default();
        let mut events = EventBus::default();
        let mut session =
            SelectionSession::start(PickMode::Default, &config, default_menu(), &mut events)
                .expect("start");
        let mut renderer = TextRenderer::new(Vec::new(), UiLocale::EnUs, false);
        play_shuffle(
            &mut session,
            &mut RngState::from_seed(3),
            &mut events,
            &mut renderer,
        );
        let item = play_select(&mut session, 2, &mut events, &mut renderer).expect("pick");
        let text = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert!(text.contains("shuffling [#....] 1/5"));
        assert!(text.contains("shuffling [#####] 5/5"));
        assert!(text.contains(&format!("card 2 -> {}", item.name)));
        assert!(text.contains("result (1/3)"));
    }

    #[test]
    fn prints_drained_events() {
        let config = PickerConfig::default();
        let mut events = EventBus::default();
        let mut session =
            SelectionSession::start(PickMode::Default, &config, default_menu(), &mut events)
                .expect("start");
        let mut renderer = TextRenderer::new(Vec::new(), UiLocale::EnUs, false);
        renderer.print_events(events.drain());
        play_shuffle(
            &mut session,
            &mut RngState::from_seed(3),
            &mut events,
            &mut renderer,
        );
        let item = play_select(&mut session, 0, &mut events, &mut renderer).expect("pick");
        let drained: Vec<Event> = events.drain().collect();
        let expected: Vec<String> = drained
            .iter()
            .map(|event| format!("event: {}", format_event(UiLocale::EnUs, event)))
            .collect();
        renderer.print_events(drained);
        assert!(events.is_empty());
        let text = String::from_utf8(renderer.into_inner()).expect("utf8");
        let built = format!(
            "event: {}",
            format_event(
                UiLocale::EnUs,
                &Event::DeckBuilt {
                    mode: PickMode::Default,
                    entries: 20,
                    max_selection: 3,
                }
            )
        );
        assert!(text.contains(&built));
        assert!(expected.len() >= 3);
        for line in &expected {
            assert!(text.contains(line.as_str()), "missing {line}");
        }
        assert!(text.contains(&item.name));
    }
}
