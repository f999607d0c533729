use crate::alphabet::Alphabet;
use crate::character::Character;
use crate::information::{
    answer_information, attribute_prevalence, expected_information, uniform_entropy,
};
use crate::strategy::Strategy;
use log::trace;
use rand::RngCore;
use serde::Serialize;

/// How a single game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum GameOutcome {
    /// Exactly one candidate is left
    Solved { questions: usize },
    /// The answers ruled out every candidate, the target was not among them
    Exhausted { questions: usize },
    /// Several candidates are left but no attribute tells them apart
    Stalled { questions: usize, remaining: usize },
}

impl GameOutcome {
    /// Question count of a solved game, `None` otherwise
    pub fn questions(&self) -> Option<usize> {
        match self {
            GameOutcome::Solved { questions } => Some(*questions),
            _ => None,
        }
    }

    /// Questions asked before the game ended, whatever the outcome
    pub fn questions_asked(&self) -> usize {
        match self {
            GameOutcome::Solved { questions }
            | GameOutcome::Exhausted { questions }
            | GameOutcome::Stalled { questions, .. } => *questions,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, GameOutcome::Solved { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameOutcome::Solved { .. } => "solved",
            GameOutcome::Exhausted { .. } => "exhausted",
            GameOutcome::Stalled { .. } => "stalled",
        }
    }
}

/// One question of a traced game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameStep {
    pub question: char,
    pub answer: bool,
    /// Bits gained from the answer given prevalence among the candidates
    pub information_bits: f64,
    pub remaining: usize,
    /// Uncertainty left over the remaining candidates
    pub entropy_bits: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameTrace {
    pub target: Character,
    pub steps: Vec<GameStep>,
    pub outcome: GameOutcome,
}

fn play(
    candidates: &[Character],
    target: &Character,
    strategy: Strategy,
    alphabet: &Alphabet,
    rng: &mut dyn RngCore,
    mut on_step: impl FnMut(GameStep),
) -> GameOutcome {
    let selector = strategy.selector();
    let mut current: Vec<Character> = candidates.to_vec();
    let mut questions = 0;

    loop {
        match current.len() {
            0 => return GameOutcome::Exhausted { questions },
            1 => return GameOutcome::Solved { questions },
            _ => {}
        }

        let ranked = expected_information(&current, alphabet);
        let splits = ranked.first().is_some_and(|&(_, bits)| bits > 0.0);
        let question = if splits {
            selector.select(&ranked, rng)
        } else {
            // candidates agree on every attribute, only a target that
            // disagrees with them can still change the candidate set
            alphabet
                .letters()
                .iter()
                .copied()
                .find(|&a| current[0].has(a) != target.has(a))
        };
        let Some(question) = question else {
            return GameOutcome::Stalled {
                questions,
                remaining: current.len(),
            };
        };

        let answer = target.has(question);
        let p = attribute_prevalence(question, &current);
        current.retain(|c| c.has(question) == answer);
        questions += 1;

        let step = GameStep {
            question,
            answer,
            information_bits: answer_information(p, answer),
            remaining: current.len(),
            entropy_bits: uniform_entropy(current.len()),
        };
        trace!(
            "q{questions} {question}? {} -> {} left ({:.2} bits gained)",
            if answer { "yes" } else { "no" },
            step.remaining,
            step.information_bits
        );
        on_step(step);
    }
}

/// Ask questions chosen by `strategy` until the candidate set is resolved.
///
/// The candidate set shrinks to those characters whose answers match
/// `target`'s. An empty set ends the game as [`GameOutcome::Exhausted`].
/// When no attribute splits the candidates, the first attribute on which the
/// target disagrees with them is asked, which empties the set; if there is
/// none the game ends as [`GameOutcome::Stalled`].
pub fn play_game(
    candidates: &[Character],
    target: &Character,
    strategy: Strategy,
    alphabet: &Alphabet,
    rng: &mut dyn RngCore,
) -> GameOutcome {
    play(candidates, target, strategy, alphabet, rng, |_| {})
}

/// [`play_game`], recording every question asked
pub fn play_game_traced(
    candidates: &[Character],
    target: &Character,
    strategy: Strategy,
    alphabet: &Alphabet,
    rng: &mut dyn RngCore,
) -> GameTrace {
    let mut steps = Vec::new();
    let outcome = play(candidates, target, strategy, alphabet, rng, |s| steps.push(s));
    GameTrace {
        target: target.clone(),
        steps,
        outcome,
    }
}
