use crate::alphabet::Alphabet;
use crate::character::Population;
use crate::game::{play_game, GameOutcome};
use crate::stats::{mean, std_dev, Histogram};
use crate::strategy::Strategy;
use log::debug;
use rand::RngCore;
use serde::Serialize;

/// Outcomes of a batch of independent games played with one strategy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialResults {
    pub strategy: Strategy,
    pub outcomes: Vec<GameOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialSummary {
    pub strategy: Strategy,
    pub trials: usize,
    pub solved: usize,
    pub exhausted: usize,
    pub stalled: usize,
    pub mean_questions: Option<f64>,
    pub std_dev_questions: Option<f64>,
    pub min_questions: Option<usize>,
    pub max_questions: Option<usize>,
}

impl TrialResults {
    /// Question counts of solved games, in trial order
    pub fn question_counts(&self) -> Vec<usize> {
        self.outcomes.iter().filter_map(GameOutcome::questions).collect()
    }

    pub fn exhausted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, GameOutcome::Exhausted { .. }))
            .count()
    }

    pub fn stalled(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, GameOutcome::Stalled { .. }))
            .count()
    }

    pub fn histogram(&self) -> Histogram {
        Histogram::from_values(self.question_counts())
    }

    pub fn summary(&self) -> TrialSummary {
        let counts = self.question_counts();
        let as_f64: Vec<f64> = counts.iter().map(|&n| n as f64).collect();
        TrialSummary {
            strategy: self.strategy,
            trials: self.outcomes.len(),
            solved: counts.len(),
            exhausted: self.exhausted(),
            stalled: self.stalled(),
            mean_questions: mean(&as_f64),
            std_dev_questions: std_dev(&as_f64),
            min_questions: counts.iter().min().copied(),
            max_questions: counts.iter().max().copied(),
        }
    }
}

/// Play `n_trials` games against targets drawn uniformly, with replacement,
/// from `population`. Every game starts from the full population.
pub fn run_trials(
    population: &Population,
    n_trials: usize,
    strategy: Strategy,
    alphabet: &Alphabet,
    rng: &mut dyn RngCore,
) -> TrialResults {
    let mut outcomes = Vec::with_capacity(n_trials);
    for trial in 0..n_trials {
        let Some(target) = population.choose(rng) else {
            break;
        };
        let outcome = play_game(population.characters(), target, strategy, alphabet, rng);
        match outcome {
            GameOutcome::Solved { questions } => {
                debug!("{strategy} trial {trial}: {target} found in {questions} questions")
            }
            other => debug!("{strategy} trial {trial}: {target} ended {}", other.label()),
        }
        outcomes.push(outcome);
    }

    TrialResults { strategy, outcomes }
}
