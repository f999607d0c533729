//! Data files consumed by the plotting layer.
//!
//! Everything lands in one output directory: a letter table, one question
//! count table per strategy and a JSON summary of the whole run.

use crate::character::Population;
use crate::config::Config;
use crate::corpus::LetterDistribution;
use crate::error::Result;
use crate::game::{GameOutcome, GameTrace};
use crate::information::{empirical_information, expected_information_closed_form};
use crate::stats::Histogram;
use crate::strategy::Strategy;
use crate::trials::{TrialResults, TrialSummary};
use chrono::{DateTime, Local};
use itertools::Itertools;
use log::info;
use rand::Rng;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const LETTERS_FILE: &str = "letters.csv";
pub const SUMMARY_FILE: &str = "summary.json";

pub fn questions_file(strategy: Strategy) -> String {
    format!("questions_{}.csv", strategy.to_string().replace('-', "_"))
}

#[derive(Serialize)]
struct QuestionRow {
    trial: usize,
    outcome: &'static str,
    questions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub summary: TrialSummary,
    pub histogram: Histogram,
}

impl From<&TrialResults> for StrategyReport {
    fn from(results: &TrialResults) -> Self {
        Self {
            summary: results.summary(),
            histogram: results.histogram(),
        }
    }
}

/// Monte-Carlo estimate of one question's information next to its exact value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmpiricalCheck {
    pub attribute: char,
    pub samples: usize,
    pub empirical_bits: f64,
    pub expected_bits: f64,
}

impl EmpiricalCheck {
    /// Estimate the information of `attribute` against `samples` random
    /// targets from the population
    pub fn run<R: Rng + ?Sized>(
        attribute: char,
        population: &Population,
        samples: usize,
        rng: &mut R,
    ) -> Option<Self> {
        let empirical_bits = empirical_information(attribute, population, samples, rng)?;
        Some(Self {
            attribute,
            samples,
            empirical_bits,
            expected_bits: expected_information_closed_form(attribute, population.characters()),
        })
    }
}

/// Everything `summary.json` records about a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Local>,
    pub corpus: String,
    pub seed: u64,
    pub config: Config,
    pub letter_entropy_bits: f64,
    pub population: Population,
    /// Expected information of every attribute over the full population, best first
    pub initial_ranking: Vec<(char, f64)>,
    pub empirical_check: Option<EmpiricalCheck>,
    pub strategies: Vec<StrategyReport>,
    pub example_game: Option<GameTrace>,
}

/// Letters by descending frequency with their self-information.
/// Letters that never occur are left out.
pub fn write_letters<P: AsRef<Path>>(path: P, distribution: &LetterDistribution) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in distribution.ranked().into_iter().filter(|r| r.probability > 0.0) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// One row per game; unsolved games keep the number of questions asked
pub fn write_questions<P: AsRef<Path>>(path: P, results: &TrialResults) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for (trial, outcome) in results.outcomes.iter().enumerate() {
        wtr.serialize(QuestionRow {
            trial,
            outcome: outcome.label(),
            questions: outcome.questions_asked(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_summary<P: AsRef<Path>>(path: P, report: &RunReport) -> Result<()> {
    let data = serde_json::to_vec_pretty(report)?;
    fs::write(path, data)?;
    Ok(())
}

/// Write every output file into `dir`, creating it if needed
pub fn write_all(
    dir: &Path,
    distribution: &LetterDistribution,
    results: &[TrialResults],
    report: &RunReport,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let letters = dir.join(LETTERS_FILE);
    write_letters(&letters, distribution)?;
    written.push(letters);

    for r in results {
        let path = dir.join(questions_file(r.strategy));
        write_questions(&path, r)?;
        written.push(path);
    }

    let summary = dir.join(SUMMARY_FILE);
    write_summary(&summary, report)?;
    written.push(summary);

    info!(
        "wrote {}",
        written.iter().map(|p| p.display()).join(", ")
    );
    Ok(written)
}

/// Short text block printed at the end of a run
pub fn render_summary(summary: &TrialSummary, histogram: &Histogram) -> String {
    let fmt_opt = |v: Option<f64>| v.map_or("-".to_string(), |x| format!("{x:.2}"));
    let mode = histogram
        .mode()
        .map_or("-".to_string(), |m| m.to_string());
    let bins = histogram
        .iter()
        .map(|(questions, games)| format!("{questions}:{games}"))
        .join(" ");
    format!(
        "{:<9} trials={} solved={} exhausted={} stalled={} mean={} sd={} mode={} histogram=[{}]",
        summary.strategy.to_string(),
        summary.trials,
        summary.solved,
        summary.exhausted,
        summary.stalled,
        fmt_opt(summary.mean_questions),
        fmt_opt(summary.std_dev_questions),
        mode,
        bins
    )
}

/// Human readable line for a finished example game
pub fn describe_outcome(outcome: &GameOutcome) -> String {
    match outcome {
        GameOutcome::Solved { questions } => format!("found in {questions} questions"),
        GameOutcome::Exhausted { questions } => {
            format!("no candidate left after {questions} questions")
        }
        GameOutcome::Stalled {
            questions,
            remaining,
        } => format!("{remaining} indistinguishable candidates after {questions} questions"),
    }
}
