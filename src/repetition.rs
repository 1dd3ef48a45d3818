use crate::vocabulary::{is_hold, is_rest, EventCode};

const MAX_REPEATED_RESTS: usize = 1;
const MAX_PLAIN_REPEATS: usize = 4;
const MAX_INTERLEAVED_REPEATS: usize = 6;

/// How the run of repeats in front of the newest event was broken up.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct RepeatRun {
    pub num_repeated: usize,
    pub contains_held_notes: bool,
    pub contains_breaks: bool,
}

/// Scans backward from the event before the last one. `composition` already
/// ends with `action`, which is not counted itself. Holds and rests may be
/// interleaved with the repeats; any other event ends the run.
pub fn repeat_run(composition: &[EventCode], action: EventCode) -> RepeatRun {
    let mut run = RepeatRun::default();
    let end = composition.len().saturating_sub(1);
    for code in composition[..end].iter().rev().copied() {
        if code == action {
            run.num_repeated += 1;
        } else if is_rest(code) {
            run.contains_breaks = true;
        } else if is_hold(code) {
            run.contains_held_notes = true;
        } else {
            break;
        }
    }
    run
}

/// True when `action` repeats the preceding events excessively. More repeats
/// are tolerated when holds or rests break up the run.
pub fn detect_repeating_notes(composition: &[EventCode], action: EventCode) -> bool {
    let run = repeat_run(composition, action);
    if is_rest(action) && run.num_repeated > MAX_REPEATED_RESTS {
        return true;
    }
    if run.contains_held_notes || run.contains_breaks {
        run.num_repeated > MAX_INTERLEAVED_REPEATS
    } else {
        run.num_repeated > MAX_PLAIN_REPEATS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{NOTE_OFF, NO_EVENT};

    #[test]
    fn test_plain_repeat_threshold() {
        // Four repeats before the action are fine, five are not.
        assert!(!detect_repeating_notes(&[5, 5, 5, 5, 5], 5));
        assert!(detect_repeating_notes(&[5, 5, 5, 5, 5, 5], 5));
        assert!(!detect_repeating_notes(&[7, 5, 5, 5, 5, 5], 5));
        assert!(!detect_repeating_notes(&[5], 5));
        assert!(!detect_repeating_notes(&[], 5));
    }

    #[test]
    fn test_run_stops_at_other_pitch() {
        let composition = [5, 5, 5, 9, 5, 5, 5, 5];
        let run = repeat_run(&composition, 5);
        assert_eq!(run.num_repeated, 3);
        assert!(!detect_repeating_notes(&composition, 5));
    }

    #[test]
    fn test_interleaved_threshold() {
        let six = [5, NO_EVENT, 5, 5, NO_EVENT, 5, 5, 5, 5];
        let run = repeat_run(&six, 5);
        assert_eq!(run, RepeatRun {num_repeated: 6, contains_held_notes: true, contains_breaks: false});
        assert!(!detect_repeating_notes(&six, 5));

        let seven = [5, NOTE_OFF, 5, 5, 5, 5, 5, 5, 5];
        let run = repeat_run(&seven, 5);
        assert_eq!(run, RepeatRun {num_repeated: 7, contains_held_notes: false, contains_breaks: true});
        assert!(detect_repeating_notes(&seven, 5));

        let both = [5, NOTE_OFF, 5, NO_EVENT, 5, 5, 5, 5, 5, 5];
        assert!(detect_repeating_notes(&both, 5));
    }

    #[test]
    fn test_repeated_rests() {
        assert!(!detect_repeating_notes(&[NOTE_OFF, NOTE_OFF], NOTE_OFF));
        assert!(detect_repeating_notes(&[NOTE_OFF, NOTE_OFF, NOTE_OFF], NOTE_OFF));
        // Rests equal to the action count as repeats, not as breaks.
        let run = repeat_run(&[NOTE_OFF, NO_EVENT, NOTE_OFF, NOTE_OFF], NOTE_OFF);
        assert_eq!(run, RepeatRun {num_repeated: 2, contains_held_notes: true, contains_breaks: false});
    }

    #[test]
    fn test_holds_alone() {
        let holds = [14, NO_EVENT, NO_EVENT, NO_EVENT, NO_EVENT, NO_EVENT, NO_EVENT];
        let run = repeat_run(&holds, NO_EVENT);
        assert_eq!(run.num_repeated, 5);
        assert!(detect_repeating_notes(&holds, NO_EVENT));
    }

    #[test]
    fn test_no_side_effects() {
        let composition = vec![5, 5, 5, 5, 5, 5];
        let before = composition.clone();
        assert_eq!(detect_repeating_notes(&composition, 5), detect_repeating_notes(&composition, 5));
        assert_eq!(composition, before);
    }
}
