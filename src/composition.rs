use crate::vocabulary::{code2midi, event_name, is_sounded, EventCode, MidiByte};

/// The events emitted so far in one episode, together with the beat counter.
/// Events are only ever appended; `clear` starts a new episode.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Composition {
    events: Vec<EventCode>,
    beat: usize,
}

impl Composition {
    pub fn new() -> Self {
        Composition {events: vec![], beat: 0}
    }

    pub fn push(&mut self, code: EventCode) {
        self.events.push(code);
        self.beat += 1;
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.beat = 0;
    }

    pub fn beat(&self) -> usize {self.beat}

    pub fn len(&self) -> usize {self.events.len()}

    pub fn is_empty(&self) -> bool {self.events.is_empty()}

    pub fn events(&self) -> &[EventCode] {&self.events}

    pub fn last(&self) -> Option<EventCode> {self.events.last().copied()}

    pub fn iter(&self) -> impl Iterator<Item = &EventCode> {
        self.events.iter()
    }

    /// The most recent sounded note strictly before position `end`.
    pub fn last_sounded_before(&self, end: usize) -> Option<EventCode> {
        last_sounded_before(&self.events, end)
    }

    /// Sounded notes as MIDI pitches, with `None` standing in for holds and rests.
    pub fn midi_notes(&self) -> Vec<Option<MidiByte>> {
        self.events.iter().map(|code| code2midi(*code)).collect()
    }

    pub fn view_events(&self) -> String {
        self.events
            .iter()
            .map(|code| event_name(*code))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn last_sounded_before(events: &[EventCode], end: usize) -> Option<EventCode> {
    events[..end.min(events.len())]
        .iter()
        .rev()
        .find(|code| is_sounded(**code))
        .copied()
}

impl From<Vec<EventCode>> for Composition {
    fn from(events: Vec<EventCode>) -> Self {
        let beat = events.len();
        Composition {events, beat}
    }
}

impl std::ops::Index<usize> for Composition {
    type Output = EventCode;

    fn index(&self, index: usize) -> &Self::Output {
        &self.events[index]
    }
}
