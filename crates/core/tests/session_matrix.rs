use menupick_core::{
    default_menu, parse_custom_items, play_select, play_shuffle, EntryId, Event, EventBus,
    GlyphAssignment, Item, PickMode, PickerConfig, Phase, RngState, SelectionSession,
    SessionError, SessionView, ShuffleStep, TableRenderer, DEFAULT_GLYPHS,
};
use std::time::Duration;

fn numbered_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|idx| Item::new(format!("item-{idx}"), "🍽️"))
        .collect()
}

fn default_session(items: Vec<Item>) -> (SelectionSession, EventBus) {
    let mut events = EventBus::default();
    let session = SelectionSession::start(
        PickMode::Default,
        &PickerConfig::default(),
        items,
        &mut events,
    )
    .expect("start session");
    (session, events)
}

fn sorted_sources(session: &SelectionSession) -> Vec<usize> {
    let mut sources = session.deck().sources();
    sources.sort_unstable();
    sources
}

macro_rules! permutation_case {
    ($name:ident, $size:expr, $seed:expr) => {
        #[test]
        fn $name() {
            let (mut session, mut events) = default_session(numbered_items($size));
            let mut rng = RngState::from_seed($seed);
            assert!(session.shuffle(&mut rng, &mut events));
            assert_eq!(session.phase(), Phase::Shuffled);
            assert_eq!(sorted_sources(&session), (0..$size).collect::<Vec<_>>());
        }
    };
}

permutation_case!(permutation_of_empty_deck, 0, 1);
permutation_case!(permutation_of_single_card, 1, 2);
permutation_case!(permutation_of_two_cards, 2, 3);
permutation_case!(permutation_of_default_sized_deck, 20, 4);
permutation_case!(permutation_of_large_deck, 257, 5);

#[test]
fn select_before_shuffle_fails_without_mutation() {
    let (mut session, mut events) = default_session(default_menu());
    let before = session.view();
    let _ = events.drain().count();
    assert_eq!(
        session.select(EntryId(0), &mut events),
        Err(SessionError::NotShuffled)
    );
    assert_eq!(
        session.select_at(3, &mut events),
        Err(SessionError::NotShuffled)
    );
    assert_eq!(session.view(), before);
    assert!(events.is_empty());
}

#[test]
fn select_while_shuffling_is_rejected() {
    let (mut session, mut events) = default_session(default_menu());
    let mut rng = RngState::from_seed(11);
    assert!(session.begin_shuffle(&mut events));
    session.shuffle_step(&mut rng, &mut events).expect("first step");
    assert_eq!(
        session.select_at(0, &mut events),
        Err(SessionError::ShuffleInProgress)
    );
    assert_eq!(session.selected_count(), 0);
    assert_eq!(
        session.shuffle_progress(),
        Some(ShuffleStep { step: 1, steps: 5 })
    );
}

#[test]
fn shuffle_runs_configured_steps_then_stops() {
    let (mut session, mut events) = default_session(default_menu());
    let _ = events.drain().count();
    let mut rng = RngState::from_seed(5);
    assert!(session.begin_shuffle(&mut events));
    assert!(!session.begin_shuffle(&mut events));
    let mut steps = Vec::new();
    while let Some(step) = session.shuffle_step(&mut rng, &mut events) {
        steps.push(step.step);
    }
    assert_eq!(steps, vec![1, 2, 3, 4, 5]);
    assert_eq!(session.phase(), Phase::Shuffled);
    let drained: Vec<Event> = events.drain().collect();
    assert_eq!(drained.first(), Some(&Event::ShuffleStarted { steps: 5 }));
    assert_eq!(drained.last(), Some(&Event::ShuffleFinished));
}

#[test]
fn shuffle_again_is_noop() {
    let (mut session, mut events) = default_session(default_menu());
    let mut rng = RngState::from_seed(8);
    assert!(session.shuffle(&mut rng, &mut events));
    let order = session.deck().sources();
    assert!(!session.shuffle(&mut rng, &mut events));
    assert_eq!(session.deck().sources(), order);
    assert_eq!(session.phase(), Phase::Shuffled);
}

#[test]
fn same_seed_gives_same_order() {
    let (mut left, mut left_events) = default_session(default_menu());
    let (mut right, mut right_events) = default_session(default_menu());
    left.shuffle(&mut RngState::from_seed(77), &mut left_events);
    right.shuffle(&mut RngState::from_seed(77), &mut right_events);
    assert_eq!(left.deck().sources(), right.deck().sources());
}

#[test]
fn default_mode_picks_three_in_click_order() {
    let (mut session, mut events) = default_session(default_menu());
    let mut rng = RngState::from_seed(2024);
    session.shuffle(&mut rng, &mut events);

    let mut expected = Vec::new();
    for slot in [7, 0, 13] {
        let item = session.select_at(slot, &mut events).expect("pick");
        expected.push(item);
    }
    assert_eq!(session.phase(), Phase::Complete);
    let revealed: Vec<Item> = session.revealed().into_iter().cloned().collect();
    assert_eq!(revealed, expected);
    assert_eq!(
        session.select_at(4, &mut events),
        Err(SessionError::LimitReached { max: 3 })
    );
    assert_eq!(session.selected_count(), 3);
}

#[test]
fn selected_item_matches_slot_source() {
    let (mut session, mut events) = default_session(default_menu());
    session.shuffle(&mut RngState::from_seed(3), &mut events);
    let entry = *session.deck().at(9).expect("slot");
    let item = session.select_at(9, &mut events).expect("pick");
    assert_eq!(&item, &default_menu()[entry.source]);
    assert!(session.is_selected(entry.id));
}

#[test]
fn repeated_select_records_once() {
    let (mut session, mut events) = default_session(default_menu());
    session.shuffle(&mut RngState::from_seed(12), &mut events);
    let id = session.deck().at(2).expect("slot").id;
    session.select(id, &mut events).expect("first pick");
    assert_eq!(
        session.select(id, &mut events),
        Err(SessionError::AlreadySelected(id))
    );
    assert_eq!(session.selected_count(), 1);
    assert_eq!(session.picks(), &[id]);
    assert_eq!(session.phase(), Phase::Shuffled);
}

#[test]
fn unknown_entries_are_rejected() {
    let (mut session, mut events) = default_session(numbered_items(4));
    session.shuffle(&mut RngState::from_seed(1), &mut events);
    assert_eq!(
        session.select(EntryId(99), &mut events),
        Err(SessionError::UnknownEntry(EntryId(99)))
    );
    assert_eq!(
        session.select_at(4, &mut events),
        Err(SessionError::UnknownSlot(4))
    );
    assert_eq!(session.selected_count(), 0);
}

#[test]
fn custom_mode_allows_a_single_pick() {
    let config = PickerConfig::default();
    let mut rng = RngState::from_seed(31);
    let items = parse_custom_items(
        "kimchi, rice\nsoup",
        &config.glyphs,
        config.glyph_assignment,
        &mut rng,
    )
    .expect("custom items");
    assert_eq!(items.len(), 3);

    let mut events = EventBus::default();
    let mut session =
        SelectionSession::start(PickMode::Custom, &config, items, &mut events).expect("start");
    assert_eq!(session.max_selection(), 1);
    session.shuffle(&mut rng, &mut events);
    session.select_at(1, &mut events).expect("pick");
    assert_eq!(session.phase(), Phase::Complete);
    assert_eq!(
        session.select_at(0, &mut events),
        Err(SessionError::LimitReached { max: 1 })
    );
}

#[test]
fn custom_mode_rejects_empty_items() {
    let config = PickerConfig::default();
    let mut events = EventBus::default();
    assert_eq!(
        SelectionSession::start(PickMode::Custom, &config, Vec::new(), &mut events).err(),
        Some(SessionError::EmptyItems)
    );

    let mut session =
        SelectionSession::start(PickMode::Custom, &config, numbered_items(2), &mut events)
            .expect("start");
    assert_eq!(
        session.build_deck(Vec::new(), &mut events),
        Err(SessionError::EmptyItems)
    );
    assert_eq!(session.items().len(), 2);
    assert_eq!(session.deck().len(), 2);
}

#[test]
fn default_mode_accepts_empty_items() {
    let (mut session, mut events) = default_session(Vec::new());
    assert_eq!(session.phase(), Phase::Idle);
    assert!(session.deck().is_empty());
    assert!(session.shuffle(&mut RngState::from_seed(1), &mut events));
    assert_eq!(
        session.select_at(0, &mut events),
        Err(SessionError::UnknownSlot(0))
    );
}

#[test]
fn small_deck_completes_when_exhausted() {
    let (mut session, mut events) = default_session(numbered_items(2));
    session.shuffle(&mut RngState::from_seed(6), &mut events);
    session.select_at(0, &mut events).expect("first");
    assert_eq!(session.phase(), Phase::Shuffled);
    session.select_at(1, &mut events).expect("second");
    assert_eq!(session.phase(), Phase::Complete);
}

#[test]
fn reset_then_build_returns_to_idle() {
    let (mut session, mut events) = default_session(default_menu());
    session.shuffle(&mut RngState::from_seed(4), &mut events);
    session.select_at(0, &mut events).expect("pick");
    session.reset(&mut events);
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.selected_count(), 0);
    assert_eq!(session.deck().sources(), (0..20).collect::<Vec<_>>());

    session
        .build_deck(default_menu(), &mut events)
        .expect("rebuild");
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.selected_count(), 0);
    assert!(session.revealed().is_empty());
    assert_eq!(
        session.select_at(0, &mut events),
        Err(SessionError::NotShuffled)
    );
}

#[test]
fn replacing_items_clears_selection() {
    let (mut session, mut events) = default_session(default_menu());
    session.shuffle(&mut RngState::from_seed(4), &mut events);
    session.select_at(0, &mut events).expect("pick");
    session
        .build_deck(numbered_items(5), &mut events)
        .expect("replace");
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.deck().len(), 5);
    assert!(session.picks().is_empty());
}

#[test]
fn view_hides_unpicked_items() {
    let (mut session, mut events) = default_session(default_menu());
    session.shuffle(&mut RngState::from_seed(10), &mut events);
    session.select_at(5, &mut events).expect("pick");
    let view = session.view();
    assert_eq!(view.selected_count, 1);
    assert_eq!(view.cards.len(), 20);
    for card in &view.cards {
        assert_eq!(card.item.is_some(), card.selected);
    }
    assert!(view.cards[5].item.is_some());
    assert_eq!(view.revealed.len(), 1);
}

#[test]
fn events_describe_the_play_through() {
    let (mut session, mut events) = default_session(numbered_items(3));
    session.shuffle(&mut RngState::from_seed(1), &mut events);
    for slot in 0..3 {
        session.select_at(slot, &mut events).expect("pick");
    }
    let drained: Vec<Event> = events.drain().collect();
    assert!(matches!(
        drained[0],
        Event::DeckBuilt {
            mode: PickMode::Default,
            entries: 3,
            max_selection: 3
        }
    ));
    let revealed = drained
        .iter()
        .filter(|event| matches!(event, Event::EntryRevealed { .. }))
        .count();
    assert_eq!(revealed, 3);
    match drained.last() {
        Some(Event::SelectionComplete { picks }) => assert_eq!(picks.len(), 3),
        other => panic!("unexpected last event {other:?}"),
    }
}

#[derive(Default)]
struct RecordingRenderer {
    decks: usize,
    steps: Vec<ShuffleStep>,
    durations: Vec<Duration>,
    reveals: Vec<(EntryId, String)>,
}

impl TableRenderer for RecordingRenderer {
    fn render_deck(&mut self, _view: &SessionView) {
        self.decks += 1;
    }

    fn shuffle_step(&mut self, step: ShuffleStep, _view: &SessionView, duration: Duration) {
        self.steps.push(step);
        self.durations.push(duration);
    }

    fn reveal(&mut self, entry: EntryId, item: &Item, view: &SessionView) {
        assert!(view.cards.iter().any(|card| card.id == entry && card.selected));
        self.reveals.push((entry, item.name.clone()));
    }
}

#[test]
fn renderer_sees_every_step_and_reveal() {
    let (mut session, mut events) = default_session(default_menu());
    let mut rng = RngState::from_seed(99);
    let mut renderer = RecordingRenderer::default();
    assert!(play_shuffle(&mut session, &mut rng, &mut events, &mut renderer));
    assert_eq!(renderer.steps.len(), 5);
    assert!(renderer
        .durations
        .iter()
        .all(|duration| *duration == Duration::from_millis(250)));
    assert_eq!(renderer.decks, 1);
    assert!(!play_shuffle(&mut session, &mut rng, &mut events, &mut renderer));
    assert_eq!(renderer.steps.len(), 5);

    let item = play_select(&mut session, 0, &mut events, &mut renderer).expect("pick");
    assert_eq!(renderer.reveals.len(), 1);
    assert_eq!(renderer.reveals[0].1, item.name);
    assert!(play_select(&mut session, 0, &mut events, &mut renderer).is_err());
    assert_eq!(renderer.reveals.len(), 1);
}

#[test]
fn cycle_assignment_is_repeatable() {
    let palette: Vec<String> = DEFAULT_GLYPHS.iter().map(|g| g.to_string()).collect();
    let first = parse_custom_items(
        "a,b,c",
        &palette,
        GlyphAssignment::Cycle,
        &mut RngState::from_seed(1),
    )
    .expect("first");
    let second = parse_custom_items(
        "a,b,c",
        &palette,
        GlyphAssignment::Cycle,
        &mut RngState::from_seed(2),
    )
    .expect("second");
    assert_eq!(first, second);
}
