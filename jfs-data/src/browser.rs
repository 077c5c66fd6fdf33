//! Paged incident browser.
//!
//! A session is just `(selected_factor, cursor)`. Each input event maps to
//! a pure transition through [`DISPATCH`]; the view handed to the
//! presentation layer is recomputed from the new state every time.

use crate::context::DataContext;
use crate::factors::ExplodedIncident;
use serde::Serialize;

pub const NO_INCIDENTS: &str = "No incidents available.";
pub const NO_DESCRIPTION: &str = "No description available for this incident.";
pub const MEMORIAL_PREFIX: &str = "In Memory of ";

/// Which control fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSource {
    FactorSelector,
    PreviousButton,
    NextButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    FactorChanged(String),
    Previous,
    Next,
}

impl BrowserEvent {
    pub fn source(&self) -> EventSource {
        match self {
            BrowserEvent::FactorChanged(_) => EventSource::FactorSelector,
            BrowserEvent::Previous => EventSource::PreviousButton,
            BrowserEvent::Next => EventSource::NextButton,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserState {
    pub selected_factor: String,
    pub cursor: usize,
}

/// Everything the presentation layer needs after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowserView {
    pub cursor: usize,
    pub previous_disabled: bool,
    pub next_disabled: bool,
    pub description: String,
    pub display_name: String,
}

/// New cursor from (old cursor, subset length).
pub type Transition = fn(usize, usize) -> usize;

fn reset_cursor(_cursor: usize, _len: usize) -> usize {
    0
}

fn step_back(cursor: usize, len: usize) -> usize {
    clamp(cursor, len).saturating_sub(1)
}

fn step_forward(cursor: usize, len: usize) -> usize {
    let cursor = clamp(cursor, len);
    if cursor + 1 < len {
        cursor + 1
    } else {
        cursor
    }
}

fn clamp(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

/// Event identity to transition.
pub const DISPATCH: [(EventSource, Transition); 3] = [
    (EventSource::FactorSelector, reset_cursor),
    (EventSource::PreviousButton, step_back),
    (EventSource::NextButton, step_forward),
];

fn transition_for(source: EventSource) -> Transition {
    DISPATCH
        .iter()
        .find(|(s, _)| *s == source)
        .map(|(_, t)| *t)
        .unwrap_or(reset_cursor)
}

/// Pick the event that drives this evaluation when several fired together.
///
/// A factor change always wins (the latest one if there are several).
/// Navigation is honoured only when exactly one kind of button fired;
/// previous and next together are ambiguous and yield `None`.
pub fn resolve_trigger(events: &[BrowserEvent]) -> Option<&BrowserEvent> {
    if let Some(factor_change) = events
        .iter()
        .rev()
        .find(|e| e.source() == EventSource::FactorSelector)
    {
        return Some(factor_change);
    }
    let first = events.first()?;
    if events.iter().all(|e| e.source() == first.source()) {
        Some(first)
    } else {
        None
    }
}

/// Derive the view for a cursor within a subset.
pub fn render(subset: &[&ExplodedIncident], cursor: usize) -> BrowserView {
    if subset.is_empty() {
        return BrowserView {
            cursor: 0,
            previous_disabled: true,
            next_disabled: true,
            description: NO_INCIDENTS.to_string(),
            display_name: String::new(),
        };
    }
    let cursor = clamp(cursor, subset.len());
    let record = &subset[cursor].incident;
    // Unreachable while the subset filter drops empty narratives.
    let description = if record.description.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        record.description.clone()
    };
    BrowserView {
        cursor,
        previous_disabled: cursor == 0,
        next_disabled: cursor == subset.len() - 1,
        description,
        display_name: format!("{}{}", MEMORIAL_PREFIX, record.name),
    }
}

/// Apply one event to a state.
pub fn transition(
    ctx: &DataContext,
    state: &BrowserState,
    event: &BrowserEvent,
) -> (BrowserState, BrowserView) {
    let selected_factor = match event {
        BrowserEvent::FactorChanged(factor) => factor.clone(),
        _ => state.selected_factor.clone(),
    };
    let subset = ctx.incident_subset(&selected_factor);
    let cursor = transition_for(event.source())(state.cursor, subset.len());
    let view = render(&subset, cursor);
    log::debug!(
        "[JFS] browser: {:?} on {:?} -> cursor {} of {}",
        event.source(),
        selected_factor,
        view.cursor,
        subset.len()
    );
    (
        BrowserState {
            selected_factor,
            cursor: view.cursor,
        },
        view,
    )
}

/// Apply whatever fired in one evaluation; see [`resolve_trigger`].
///
/// When nothing actionable fired the state is kept and the view re-derived.
pub fn handle(
    ctx: &DataContext,
    state: &BrowserState,
    events: &[BrowserEvent],
) -> (BrowserState, BrowserView) {
    match resolve_trigger(events) {
        Some(event) => transition(ctx, state, event),
        None => {
            let subset = ctx.incident_subset(&state.selected_factor);
            let view = render(&subset, state.cursor);
            (
                BrowserState {
                    selected_factor: state.selected_factor.clone(),
                    cursor: view.cursor,
                },
                view,
            )
        }
    }
}

/// One user's browsing session over a shared context.
pub struct BrowserSession<'a> {
    ctx: &'a DataContext,
    state: BrowserState,
    view: BrowserView,
}

impl<'a> BrowserSession<'a> {
    /// Open a session on the configured default factor.
    pub fn start(ctx: &'a DataContext) -> Self {
        let factor = ctx.config().default_factor.clone();
        Self::start_with(ctx, factor)
    }

    pub fn start_with(ctx: &'a DataContext, factor: String) -> Self {
        let initial = BrowserState {
            selected_factor: factor.clone(),
            cursor: 0,
        };
        let (state, view) = transition(ctx, &initial, &BrowserEvent::FactorChanged(factor));
        Self { ctx, state, view }
    }

    pub fn apply(&mut self, event: &BrowserEvent) -> &BrowserView {
        let (state, view) = transition(self.ctx, &self.state, event);
        self.state = state;
        self.view = view;
        &self.view
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn view(&self) -> &BrowserView {
        &self.view
    }
}
