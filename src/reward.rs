use std::collections::BTreeMap;
use tracing::debug;
use crate::composition::Composition;
use crate::config::TheoryConfig;
use crate::error::TheoryResult;
use crate::interval::classify_interval;
use crate::motif::{detect_last_motif, detect_repeated_motif, MIN_MOTIF_NOTES};
use crate::repetition::detect_repeating_notes;
use crate::vocabulary::{is_hold, is_rest, EventCode};

/// Named reward components reported alongside a step.
pub type StepInfo = BTreeMap<&'static str, f64>;

/// Scores the newest action. `composition` already ends with `action`, and
/// its beat counter has already advanced.
pub trait RewardStrategy {
    fn evaluate(&self, composition: &Composition, action: EventCode) -> (f64, StepInfo);
}

/// Hands out nothing; the environment with this strategy only tracks the composition.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoReward;

impl RewardStrategy for NoReward {
    fn evaluate(&self, _composition: &Composition, _action: EventCode) -> (f64, StepInfo) {
        (0.0, StepInfo::new())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RewardBreakdown {
    pub key: f64,
    pub non_repeating: f64,
    pub tonic: f64,
    pub motif: f64,
    pub repeated_motif: f64,
    pub preferred_intervals: Option<f64>,
}

impl RewardBreakdown {
    pub fn total(&self) -> f64 {
        self.key + self.non_repeating + self.tonic + self.motif + self.repeated_motif
            + self.preferred_intervals.unwrap_or(0.0)
    }

    pub fn components(&self) -> StepInfo {
        let mut info = StepInfo::from([
            ("key", self.key),
            ("non_repeating", self.non_repeating),
            ("tonic", self.tonic),
            ("motif", self.motif),
            ("repeated_motif", self.repeated_motif),
        ]);
        if let Some(intervals) = self.preferred_intervals {
            info.insert("preferred_intervals", intervals);
        }
        info
    }
}

/// Rewards an action for following simple rules of melody writing: stay in
/// key, avoid monotony, open and close on the tonic, play and repeat motifs.
#[derive(Clone, Debug)]
pub struct MusicTheoryReward {
    config: TheoryConfig,
}

impl MusicTheoryReward {
    pub fn new(config: TheoryConfig) -> TheoryResult<Self> {
        config.validate()?;
        Ok(MusicTheoryReward {config})
    }

    pub fn config(&self) -> &TheoryConfig {&self.config}

    pub fn reward_key(&self, action: EventCode) -> f64 {
        if self.config.key().contains(action) {0.0} else {self.config.weights().key_penalty}
    }

    pub fn reward_non_repeating(&self, composition: &[EventCode], action: EventCode) -> f64 {
        if detect_repeating_notes(composition, action) {0.0} else {self.config.weights().non_repeating}
    }

    /// Tonic on the first beat and on the first beat of the final stretch,
    /// then a hold right after it, then only holds or rests.
    pub fn reward_tonic(&self, beat: usize, action: EventCode) -> f64 {
        let final_bar = self.config.first_note_of_final_bar();
        let amount = self.config.weights().tonic;
        let rewarded = if beat == 0 || beat == final_bar {
            action == self.config.tonic()
        } else if beat == final_bar + 1 {
            is_hold(action)
        } else if beat > final_bar + 1 {
            is_hold(action) || is_rest(action)
        } else {
            false
        };
        if rewarded {amount} else {0.0}
    }

    pub fn reward_motif(&self, composition: &[EventCode]) -> f64 {
        let weights = self.config.weights();
        match detect_last_motif(composition, self.config.bar_length()) {
            (Some(_), num_distinct) => {
                let complexity = (num_distinct as f64 - MIN_MOTIF_NOTES as f64) * weights.motif_complexity;
                weights.motif + complexity.max(0.0)
            }
            (None, _) => 0.0,
        }
    }

    pub fn reward_repeated_motif(&self, composition: &[EventCode]) -> f64 {
        match detect_repeated_motif(composition, self.config.bar_length()) {
            Some(motif) => {
                self.config.weights().repeated_motif + motif.num_distinct().saturating_sub(MIN_MOTIF_NOTES) as f64
            }
            None => 0.0,
        }
    }

    pub fn reward_preferred_intervals(&self, composition: &[EventCode], action: EventCode, scaler: f64) -> f64 {
        let category = classify_interval(composition, action, self.config.key());
        if category.is_uninteresting() {
            debug!("no interval or uninteresting");
            return 0.0;
        }
        let reward = category.base_reward() * scaler;
        debug!(?category, reward, "interval reward");
        reward
    }

    pub fn breakdown(&self, composition: &Composition, action: EventCode) -> RewardBreakdown {
        let events = composition.events();
        RewardBreakdown {
            key: self.reward_key(action),
            non_repeating: self.reward_non_repeating(events, action),
            tonic: self.reward_tonic(composition.beat(), action),
            motif: self.reward_motif(events),
            repeated_motif: self.reward_repeated_motif(events),
            preferred_intervals: if self.config.include_intervals() {
                Some(self.reward_preferred_intervals(events, action, self.config.weights().interval_scaler))
            } else {
                None
            },
        }
    }

    pub fn score(&self, composition: &Composition, action: EventCode) -> f64 {
        self.breakdown(composition, action).total()
    }
}

impl RewardStrategy for MusicTheoryReward {
    fn evaluate(&self, composition: &Composition, action: EventCode) -> (f64, StepInfo) {
        let breakdown = self.breakdown(composition, action);
        (breakdown.total(), breakdown.components())
    }
}
