use std::collections::BTreeSet;
use bare_metal_modulo::{MNum, ModNumC};

pub type EventCode = usize;
pub type MidiByte = i16;

pub const USIZE_NOTES_PER_OCTAVE: usize = 12;
pub type PitchClass = ModNumC<usize, USIZE_NOTES_PER_OCTAVE>;

pub const NOTE_OFF: EventCode = 0;
pub const NO_EVENT: EventCode = 1;
pub const NUM_SPECIAL_EVENTS: usize = 2;
pub const FIRST_PITCH_CODE: EventCode = NUM_SPECIAL_EVENTS;
pub const INITIAL_MIDI_VALUE: MidiByte = 48;
pub const NUM_OCTAVES: usize = 3;
pub const NUM_CLASSES: usize = NUM_SPECIAL_EVENTS + NUM_OCTAVES * USIZE_NOTES_PER_OCTAVE;

pub const BEATS_PER_BAR: usize = 8;
pub const DEFAULT_COMPOSITION_LENGTH: usize = 64;

/// Middle C.
pub const C_MAJOR_TONIC: EventCode = 14;

const DIATONIC_SCALE_SIZE: usize = 7;
const DIATONIC_SCALE_HOPS: [usize; DIATONIC_SCALE_SIZE] = [2, 2, 1, 2, 2, 2, 1];
const MEDIANT_OFFSET: usize = 4;
const DOMINANT_OFFSET: usize = 7;
const NOTE_NAMES: [&str; USIZE_NOTES_PER_OCTAVE] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

pub fn is_rest(code: EventCode) -> bool {code == NOTE_OFF}

pub fn is_hold(code: EventCode) -> bool {code == NO_EVENT}

/// True for every code that starts a new pitch, i.e. anything but a hold or a rest.
pub fn is_sounded(code: EventCode) -> bool {
    !is_rest(code) && !is_hold(code)
}

pub fn code2midi(code: EventCode) -> Option<MidiByte> {
    if is_sounded(code) {
        Some(INITIAL_MIDI_VALUE + (code - FIRST_PITCH_CODE) as MidiByte)
    } else {
        None
    }
}

pub fn midi2code(pitch: MidiByte) -> Option<EventCode> {
    if pitch < INITIAL_MIDI_VALUE {
        None
    } else {
        Some((pitch - INITIAL_MIDI_VALUE) as EventCode + FIRST_PITCH_CODE)
    }
}

pub fn pitch_class(code: EventCode) -> Option<PitchClass> {
    code2midi(code).map(|pitch| PitchClass::new(pitch as usize))
}

pub fn event_name(code: EventCode) -> String {
    match code2midi(code) {
        None => if is_hold(code) {"-".to_string()} else {"r".to_string()},
        Some(pitch) => {
            let octave = pitch / USIZE_NOTES_PER_OCTAVE as MidiByte - 1;
            format!("{}{}", NOTE_NAMES[pitch as usize % USIZE_NOTES_PER_OCTAVE], octave)
        }
    }
}

fn major_scale(tonic: PitchClass) -> [PitchClass; DIATONIC_SCALE_SIZE] {
    let mut scale = [tonic; DIATONIC_SCALE_SIZE];
    let mut offset = 0;
    for i in 1..DIATONIC_SCALE_SIZE {
        offset += DIATONIC_SCALE_HOPS[i - 1];
        scale[i] = tonic + offset;
    }
    scale
}

/// The set of codes that count as "in key", plus the scale-degree roles
/// (tonic, mediant, dominant) derived from the tonic pitch class.
/// Rests and holds are always members so that silence is never out of key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Key {
    tonic: PitchClass,
    members: BTreeSet<EventCode>,
}

impl Key {
    pub fn major(tonic: PitchClass) -> Self {
        Self::major_over(tonic, NUM_CLASSES)
    }

    pub fn major_over(tonic: PitchClass, num_classes: usize) -> Self {
        let scale = major_scale(tonic);
        let members = (0..num_classes)
            .filter(|code| pitch_class(*code).map_or(true, |pc| scale.contains(&pc)))
            .collect();
        Key {tonic, members}
    }

    pub fn c_major() -> Self {
        Self::major(PitchClass::new(0))
    }

    pub fn from_members<I: IntoIterator<Item = EventCode>>(tonic: PitchClass, members: I) -> Self {
        Key {tonic, members: members.into_iter().collect()}
    }

    pub fn contains(&self, code: EventCode) -> bool {
        self.members.contains(&code)
    }

    pub fn members(&self) -> impl Iterator<Item = EventCode> + '_ {
        self.members.iter().copied()
    }

    pub fn max_member(&self) -> Option<EventCode> {
        self.members.last().copied()
    }

    pub fn tonic(&self) -> PitchClass {self.tonic}

    pub fn mediant(&self) -> PitchClass {self.tonic + MEDIANT_OFFSET}

    pub fn dominant(&self) -> PitchClass {self.tonic + DOMINANT_OFFSET}

    pub fn is_tonic(&self, code: EventCode) -> bool {
        pitch_class(code) == Some(self.tonic())
    }

    pub fn is_mediant(&self, code: EventCode) -> bool {
        pitch_class(code) == Some(self.mediant())
    }

    pub fn is_dominant(&self, code: EventCode) -> bool {
        pitch_class(code) == Some(self.dominant())
    }

    pub fn is_strong_degree(&self, code: EventCode) -> bool {
        self.is_tonic(code) || self.is_dominant(code)
    }

    pub fn name(&self) -> String {
        format!("{} major", NOTE_NAMES[self.tonic.a()])
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::c_major()
    }
}
