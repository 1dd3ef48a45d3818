use enum_iterator::Sequence;
use tracing::debug;
use crate::composition::last_sounded_before;
use crate::vocabulary::{is_hold, is_rest, EventCode, Key};

pub const HALFSTEP: usize = 1;
pub const SECOND: usize = 2;
pub const MINOR_THIRD: usize = 3;
pub const THIRD: usize = 4;
pub const FOURTH: usize = 5;
pub const TRITONE: usize = 6;
pub const FIFTH: usize = 7;
pub const MINOR_SIXTH: usize = 8;
pub const SIXTH: usize = 9;
pub const MINOR_SEVENTH: usize = 10;
pub const SEVENTH: usize = 11;
pub const OCTAVE: usize = 12;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Sequence, Hash, Ord, PartialOrd)]
pub enum NamedInterval {
    HalfStep, Second, MinorThird, Third, Fourth, Tritone,
    Fifth, MinorSixth, Sixth, MinorSeventh, Seventh, Octave,
    BeyondOctave,
}

impl NamedInterval {
    /// `None` for a unison.
    pub fn from_semitones(semitones: usize) -> Option<Self> {
        match semitones {
            0 => None,
            HALFSTEP => Some(NamedInterval::HalfStep),
            SECOND => Some(NamedInterval::Second),
            MINOR_THIRD => Some(NamedInterval::MinorThird),
            THIRD => Some(NamedInterval::Third),
            FOURTH => Some(NamedInterval::Fourth),
            TRITONE => Some(NamedInterval::Tritone),
            FIFTH => Some(NamedInterval::Fifth),
            MINOR_SIXTH => Some(NamedInterval::MinorSixth),
            SIXTH => Some(NamedInterval::Sixth),
            MINOR_SEVENTH => Some(NamedInterval::MinorSeventh),
            SEVENTH => Some(NamedInterval::Seventh),
            OCTAVE => Some(NamedInterval::Octave),
            _ => Some(NamedInterval::BeyondOctave),
        }
    }

    pub fn base_reward(&self) -> f64 {
        match self {
            NamedInterval::Seventh => -0.3,
            NamedInterval::BeyondOctave => -1.0,
            NamedInterval::Third => 0.09,
            NamedInterval::Second => 0.08,
            NamedInterval::Fourth => 0.07,
            NamedInterval::Sixth => 0.05,
            NamedInterval::Fifth => 0.02,
            _ => 0.0,
        }
    }
}

/// What kind of melodic motion an action makes relative to the previous
/// sounded note.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Sequence, Hash, Ord, PartialOrd)]
pub enum IntervalCategory {
    NoInterval,
    Unison,
    Rest,
    Hold,
    RestAfterStrongDegree,
    HoldAfterStrongDegree,
    InKeyThird,
    InKeyFifth,
    Melodic(NamedInterval),
}

impl IntervalCategory {
    /// Categories that the interval reward skips entirely.
    pub fn is_uninteresting(&self) -> bool {
        matches!(self, IntervalCategory::NoInterval | IntervalCategory::Unison)
    }

    pub fn base_reward(&self) -> f64 {
        match self {
            IntervalCategory::NoInterval | IntervalCategory::Unison => 0.0,
            IntervalCategory::Rest => 0.05,
            IntervalCategory::Hold => 0.075,
            IntervalCategory::RestAfterStrongDegree => 0.15,
            IntervalCategory::HoldAfterStrongDegree => 0.3,
            IntervalCategory::InKeyFifth => 0.1,
            IntervalCategory::InKeyThird => 0.15,
            IntervalCategory::Melodic(interval) => interval.base_reward(),
        }
    }
}

/// Classifies `action` against the latest sounded note before it. The
/// composition is expected to end with `action` already.
pub fn classify_interval(composition: &[EventCode], action: EventCode, key: &Key) -> IntervalCategory {
    let end = composition.len().saturating_sub(1);
    let Some(prev_note) = last_sounded_before(composition, end) else {
        debug!(action, "no sounded note before action");
        return IntervalCategory::NoInterval;
    };

    let category = if is_hold(action) {
        if key.is_strong_degree(prev_note) {IntervalCategory::HoldAfterStrongDegree} else {IntervalCategory::Hold}
    } else if is_rest(action) {
        if key.is_strong_degree(prev_note) {IntervalCategory::RestAfterStrongDegree} else {IntervalCategory::Rest}
    } else {
        let semitones = action.abs_diff(prev_note);
        if semitones == FIFTH && (key.is_tonic(prev_note) || key.is_dominant(prev_note)) {
            IntervalCategory::InKeyFifth
        } else if semitones == THIRD && (key.is_tonic(prev_note) || key.is_mediant(prev_note)) {
            IntervalCategory::InKeyThird
        } else {
            NamedInterval::from_semitones(semitones).map_or(IntervalCategory::Unison, IntervalCategory::Melodic)
        }
    };
    debug!(action, prev_note, ?category, "classified interval");
    category
}
