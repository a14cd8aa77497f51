use crate::{
    EntryId, EventBus, Item, RngState, SelectionSession, SessionError, SessionView, ShuffleStep,
};
use std::time::Duration;

/// Presentation side of a session. Implementations own layout, timing and
/// any position bookkeeping the shuffle animation needs.
pub trait TableRenderer {
    fn render_deck(&mut self, view: &SessionView);

    /// Called after each shuffle permutation; `duration` is the time the
    /// step is meant to stay on screen.
    fn shuffle_step(&mut self, step: ShuffleStep, view: &SessionView, duration: Duration);

    fn reveal(&mut self, entry: EntryId, item: &Item, view: &SessionView);
}

/// Shuffles step by step, handing each intermediate order to `renderer`.
pub fn play_shuffle(
    session: &mut SelectionSession,
    rng: &mut RngState,
    events: &mut EventBus,
    renderer: &mut dyn TableRenderer,
) -> bool {
    if !session.begin_shuffle(events) {
        return false;
    }
    let duration = Duration::from_millis(session.rules().step_millis);
    while let Some(step) = session.shuffle_step(rng, events) {
        renderer.shuffle_step(step, &session.view(), duration);
    }
    renderer.render_deck(&session.view());
    true
}

pub fn play_select(
    session: &mut SelectionSession,
    position: usize,
    events: &mut EventBus,
    renderer: &mut dyn TableRenderer,
) -> Result<Item, SessionError> {
    let item = session.select_at(position, events)?;
    if let Some(id) = session.picks().last().copied() {
        renderer.reveal(id, &item, &session.view());
    }
    Ok(item)
}
