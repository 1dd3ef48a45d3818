use tracing::warn;
use crate::error::{TheoryError, TheoryResult};
use crate::vocabulary::{
    is_sounded, pitch_class, EventCode, Key, BEATS_PER_BAR, C_MAJOR_TONIC,
    DEFAULT_COMPOSITION_LENGTH, NUM_CLASSES,
};

/// Offset from the end of the composition at which the closing tonic is expected.
const FINAL_BAR_OFFSET: usize = 4;

/// Amounts handed out by each reward component.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardWeights {
    pub key_penalty: f64,
    pub non_repeating: f64,
    pub tonic: f64,
    pub motif: f64,
    pub motif_complexity: f64,
    pub repeated_motif: f64,
    pub interval_scaler: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        RewardWeights {
            key_penalty: -1.0,
            non_repeating: 0.1,
            tonic: 3.0,
            motif: 3.0,
            motif_complexity: 0.3,
            repeated_motif: 4.0,
            interval_scaler: 5.0,
        }
    }
}

/// Everything the scorer and the environment need to know about a run.
/// Built once, validated, then shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct TheoryConfig {
    composition_length: usize,
    bar_length: usize,
    num_classes: usize,
    key: Key,
    tonic: EventCode,
    include_intervals: bool,
    weights: RewardWeights,
}

impl Default for TheoryConfig {
    fn default() -> Self {
        TheoryConfig {
            composition_length: DEFAULT_COMPOSITION_LENGTH,
            bar_length: BEATS_PER_BAR,
            num_classes: NUM_CLASSES,
            key: Key::c_major(),
            tonic: C_MAJOR_TONIC,
            include_intervals: false,
            weights: RewardWeights::default(),
        }
    }
}

impl TheoryConfig {
    pub fn with_composition_length(mut self, composition_length: usize) -> Self {
        self.composition_length = composition_length;
        self
    }

    pub fn with_bar_length(mut self, bar_length: usize) -> Self {
        self.bar_length = bar_length;
        self
    }

    pub fn with_num_classes(mut self, num_classes: usize) -> Self {
        self.num_classes = num_classes;
        self
    }

    pub fn with_key(mut self, key: Key, tonic: EventCode) -> Self {
        self.key = key;
        self.tonic = tonic;
        self
    }

    /// Adds the interval reward to every step total, scaled by `scaler`.
    pub fn with_intervals(mut self, scaler: f64) -> Self {
        self.include_intervals = true;
        self.weights.interval_scaler = scaler;
        self
    }

    pub fn with_weights(mut self, weights: RewardWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn composition_length(&self) -> usize {self.composition_length}

    pub fn bar_length(&self) -> usize {self.bar_length}

    pub fn num_classes(&self) -> usize {self.num_classes}

    pub fn key(&self) -> &Key {&self.key}

    pub fn tonic(&self) -> EventCode {self.tonic}

    pub fn include_intervals(&self) -> bool {self.include_intervals}

    pub fn weights(&self) -> &RewardWeights {&self.weights}

    pub fn first_note_of_final_bar(&self) -> usize {
        self.composition_length.saturating_sub(FINAL_BAR_OFFSET)
    }

    pub fn validate(&self) -> TheoryResult<()> {
        if self.bar_length == 0 {
            return invalid("bar length must be positive".to_string());
        }
        if self.composition_length < self.bar_length.max(FINAL_BAR_OFFSET) {
            return invalid(format!(
                "composition length {} must cover a bar of {} and the final {} beats",
                self.composition_length, self.bar_length, FINAL_BAR_OFFSET
            ));
        }
        if self.tonic >= self.num_classes || !is_sounded(self.tonic) {
            return invalid(format!("tonic {} is not a pitch in a vocabulary of {}", self.tonic, self.num_classes));
        }
        if let Some(max) = self.key.max_member() {
            if max >= self.num_classes {
                return invalid(format!("key member {max} is outside a vocabulary of {}", self.num_classes));
            }
        }
        if pitch_class(self.tonic) != Some(self.key.tonic()) {
            warn!(tonic = self.tonic, key = %self.key.name(), "tonic is not the first degree of the key");
        }
        Ok(())
    }
}

fn invalid(msg: String) -> TheoryResult<()> {
    Err(TheoryError::InvalidConfig(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::{PitchClass, NOTE_OFF};

    #[test]
    fn test_defaults() {
        let config = TheoryConfig::default();
        assert_eq!(config.composition_length(), 64);
        assert_eq!(config.bar_length(), 8);
        assert_eq!(config.num_classes(), 38);
        assert_eq!(config.tonic(), 14);
        assert_eq!(config.first_note_of_final_bar(), 60);
        assert!(!config.include_intervals());
        assert_eq!(config.weights(), &RewardWeights::default());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_builders() {
        let config = TheoryConfig::default()
            .with_composition_length(32)
            .with_bar_length(4)
            .with_intervals(2.0)
            .with_key(Key::major(PitchClass::new(7)), 21);
        assert_eq!(config.first_note_of_final_bar(), 28);
        assert!(config.include_intervals());
        assert_eq!(config.weights().interval_scaler, 2.0);
        assert_eq!(config.key().name(), "G major");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_configs() {
        let bad = [
            TheoryConfig::default().with_bar_length(0),
            TheoryConfig::default().with_composition_length(6),
            TheoryConfig::default().with_composition_length(3).with_bar_length(2),
            TheoryConfig::default().with_key(Key::c_major(), NOTE_OFF),
            TheoryConfig::default().with_key(Key::c_major(), 40),
            TheoryConfig::default().with_num_classes(20),
        ];
        for config in bad.iter() {
            assert!(matches!(config.validate(), Err(TheoryError::InvalidConfig(_))), "{config:?}");
        }
    }
}
