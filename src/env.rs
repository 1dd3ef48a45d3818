use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, trace};
use crate::composition::Composition;
use crate::config::TheoryConfig;
use crate::error::{TheoryError, TheoryResult};
use crate::reward::{MusicTheoryReward, RewardStrategy, StepInfo};
use crate::vocabulary::EventCode;

/// Outcome of one environment step.
#[derive(Clone, Debug, PartialEq)]
pub struct Step<O> {
    pub observation: O,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

/// A finite, discrete-time episode driven by an agent's actions.
pub trait Environment {
    type Observation;
    type Action;

    /// Starts a new episode and returns the first observation.
    fn reset(&mut self) -> Self::Observation;

    fn step(&mut self, action: Self::Action) -> TheoryResult<Step<Self::Observation>>;
}

/// Builds a composition one event per step and scores each event with `S`.
pub struct MusicEnv<S: RewardStrategy> {
    composition: Composition,
    composition_length: usize,
    num_classes: usize,
    strategy: S,
    rng: StdRng,
    episode_reward: f64,
}

impl MusicEnv<MusicTheoryReward> {
    pub fn music_theory(config: TheoryConfig) -> TheoryResult<Self> {
        let composition_length = config.composition_length();
        let num_classes = config.num_classes();
        Self::new(composition_length, num_classes, MusicTheoryReward::new(config)?)
    }
}

impl<S: RewardStrategy> MusicEnv<S> {
    pub fn new(composition_length: usize, num_classes: usize, strategy: S) -> TheoryResult<Self> {
        if composition_length == 0 || num_classes == 0 {
            return Err(TheoryError::InvalidConfig(format!(
                "composition length {composition_length} and vocabulary size {num_classes} must be positive"
            )));
        }
        Ok(MusicEnv {
            composition: Composition::new(),
            composition_length,
            num_classes,
            strategy,
            rng: StdRng::from_entropy(),
            episode_reward: 0.0,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn composition(&self) -> &Composition {&self.composition}

    pub fn beat(&self) -> usize {self.composition.beat()}

    pub fn strategy(&self) -> &S {&self.strategy}

    pub fn episode_reward(&self) -> f64 {self.episode_reward}

    pub fn is_done(&self) -> bool {
        self.composition.beat() >= self.composition_length
    }
}

impl<S: RewardStrategy> Environment for MusicEnv<S> {
    type Observation = EventCode;
    type Action = EventCode;

    /// Any code may come back, holds and rests included.
    fn reset(&mut self) -> EventCode {
        self.composition.clear();
        self.episode_reward = 0.0;
        let start = self.rng.gen_range(0..self.num_classes);
        info!(start, "new composition");
        start
    }

    fn step(&mut self, action: EventCode) -> TheoryResult<Step<EventCode>> {
        if action >= self.num_classes {
            return Err(TheoryError::EventOutOfRange {code: action, num_classes: self.num_classes});
        }
        if self.is_done() {
            return Err(TheoryError::EpisodeFinished {length: self.composition_length});
        }
        self.composition.push(action);
        let (reward, info) = self.strategy.evaluate(&self.composition, action);
        self.episode_reward += reward;
        let done = self.composition.beat() == self.composition_length;
        trace!(beat = self.composition.beat(), action, reward, done, "step");
        if done {
            info!(total = self.episode_reward, "composition finished");
        }
        Ok(Step {observation: action, reward, done, info})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use crate::reward::NoReward;
    use crate::vocabulary::{C_MAJOR_TONIC, NOTE_OFF, NO_EVENT, NUM_CLASSES};

    const NUM_RANDOM_TESTS: usize = 20;
    const C4: EventCode = C_MAJOR_TONIC;
    const G4: EventCode = C4 + 7;

    #[test]
    fn test_terminates_on_final_beat() {
        let mut env = MusicEnv::music_theory(TheoryConfig::default()).unwrap().with_seed(7);
        env.reset();
        for i in 0..64 {
            let action = if i % 2 == 0 {C4} else {G4};
            let step = env.step(action).unwrap();
            assert_eq!(step.observation, action);
            assert_eq!(step.done, i == 63, "beat {}", i + 1);
        }
        assert_eq!(env.beat(), 64);
        assert_eq!(env.step(C4), Err(TheoryError::EpisodeFinished {length: 64}));
    }

    #[test]
    fn test_tonic_fifth_rewards() {
        let mut env = MusicEnv::music_theory(TheoryConfig::default()).unwrap();
        env.reset();
        let mut rewards = vec![];
        for i in 0..64 {
            rewards.push(env.step(if i % 2 == 0 {C4} else {G4}).unwrap().reward);
        }
        // Two pitches never make a motif, and beat 60 lands on the fifth.
        for (i, reward) in rewards.iter().enumerate() {
            assert!(approx_eq!(f64, *reward, 0.1), "beat {}: {reward}", i + 1);
        }
        let total: f64 = rewards.iter().sum();
        assert!(approx_eq!(f64, env.episode_reward(), total));
    }

    #[test]
    fn test_closing_tonic_rewarded() {
        let mut env = MusicEnv::music_theory(TheoryConfig::default().with_composition_length(8).with_bar_length(4)).unwrap();
        env.reset();
        let steps = [C4, C4 + 2, C4 + 4, C4].map(|action| env.step(action).unwrap());
        let info = &steps[3].info;
        assert_eq!(env.beat(), 4);
        assert_eq!(info["tonic"], 3.0);
        assert_eq!(info["motif"], 3.0);
    }

    #[test]
    fn test_reset_clears_composition() {
        let mut env = MusicEnv::music_theory(TheoryConfig::default()).unwrap();
        env.reset();
        env.step(C4).unwrap();
        env.step(G4).unwrap();
        assert_eq!(env.composition().len(), 2);
        env.reset();
        assert!(env.composition().is_empty());
        assert_eq!(env.beat(), 0);
        assert_eq!(env.episode_reward(), 0.0);
    }

    #[test]
    fn test_reset_samples_whole_vocabulary() {
        let mut env = MusicEnv::new(64, NUM_CLASSES, NoReward).unwrap().with_seed(42);
        let starts = (0..NUM_RANDOM_TESTS * 50).map(|_| env.reset()).collect::<Vec<_>>();
        assert!(starts.iter().all(|s| *s < NUM_CLASSES));
        assert!(starts.contains(&NOTE_OFF) && starts.contains(&NO_EVENT));
        let mut a = MusicEnv::new(64, NUM_CLASSES, NoReward).unwrap().with_seed(3);
        let mut b = MusicEnv::new(64, NUM_CLASSES, NoReward).unwrap().with_seed(3);
        for _ in 0..NUM_RANDOM_TESTS {
            assert_eq!(a.reset(), b.reset());
        }
    }

    #[test]
    fn test_rejects_out_of_range_actions() {
        let mut env = MusicEnv::music_theory(TheoryConfig::default()).unwrap();
        env.reset();
        assert_eq!(env.step(NUM_CLASSES), Err(TheoryError::EventOutOfRange {code: NUM_CLASSES, num_classes: NUM_CLASSES}));
        assert!(env.composition().is_empty());
    }

    #[test]
    fn test_base_environment() {
        let mut env = MusicEnv::new(3, NUM_CLASSES, NoReward).unwrap();
        env.reset();
        let steps = [C4, G4, C4].map(|a| env.step(a).unwrap());
        assert!(steps.iter().all(|s| s.reward == 0.0 && s.info.is_empty()));
        assert_eq!(steps.map(|s| s.done), [false, false, true]);
        assert!(MusicEnv::new(0, NUM_CLASSES, NoReward).is_err());
    }
}
