use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Policy for picking the next question from a ranked list of attributes
pub trait QuestionSelector {
    /// `ranked` holds every attribute with its expected information, best
    /// first. Returns `None` only when `ranked` is empty.
    fn select(&self, ranked: &[(char, f64)], rng: &mut dyn RngCore) -> Option<char>;
}

/// Always asks the most informative question
pub struct MaxInfoSelector;

impl QuestionSelector for MaxInfoSelector {
    fn select(&self, ranked: &[(char, f64)], _rng: &mut dyn RngCore) -> Option<char> {
        ranked.first().map(|&(a, _)| a)
    }
}

/// Asks about any attribute with equal probability, informative or not
pub struct RandomSelector;

impl QuestionSelector for RandomSelector {
    fn select(&self, ranked: &[(char, f64)], rng: &mut dyn RngCore) -> Option<char> {
        ranked.choose(rng).map(|&(a, _)| a)
    }
}

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Strategy {
    MaxInfo,
    Random,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::MaxInfo, Strategy::Random];

    pub fn selector(&self) -> Box<dyn QuestionSelector> {
        match self {
            Strategy::MaxInfo => Box::new(MaxInfoSelector),
            Strategy::Random => Box::new(RandomSelector),
        }
    }
}
