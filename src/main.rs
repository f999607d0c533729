use clap::{error::ErrorKind, CommandFactory, Parser};
use guessbits::{
    alphabet::Alphabet,
    character::Population,
    config::{Config, ConfigStore, FileConfigStore},
    corpus::{build_letter_distribution, default_corpus, read_corpus, DEFAULT_CORPUS},
    game::play_game_traced,
    information::expected_information,
    report::{self, EmpiricalCheck, RunReport, StrategyReport},
    strategy::Strategy,
    trials::run_trials,
};
use itertools::Itertools;
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};
use std::{error::Error, path::PathBuf};

/// Targets drawn when measuring the best first question
const EMPIRICAL_SAMPLES: usize = 1000;

/// simulate a letter-attribute guessing game and compare questioning strategies
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Builds a population of characters from the letter frequencies of a text, then plays a guessing game against it with max-information and random questioning, writing csv and json data for plotting."
)]
pub struct Cli {
    /// text file used to derive letter frequencies (default: bundled text)
    #[clap(short = 'c', long)]
    corpus: Option<PathBuf>,

    /// directory receiving the csv and json output
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,

    /// number of characters in the population
    #[clap(short = 'n', long)]
    population_size: Option<usize>,

    /// number of attributes per character
    #[clap(short = 'k', long)]
    attributes: Option<usize>,

    /// number of games played per strategy
    #[clap(short = 't', long)]
    trials: Option<usize>,

    /// seed for the random generator (default: random, recorded in the summary)
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// strategy to simulate, repeat for several (default: all)
    #[clap(long = "strategy", value_enum)]
    strategies: Vec<Strategy>,

    /// settings file to use instead of the platform config location
    #[clap(long)]
    config: Option<PathBuf>,

    /// persist the effective settings to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match self.config {
            Some(ref path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Overlay command line flags on stored settings
    fn apply(&self, mut config: Config) -> Config {
        if let Some(n) = self.population_size {
            config.population_size = n;
        }
        if let Some(k) = self.attributes {
            config.attributes_per_character = k;
        }
        if let Some(t) = self.trials {
            config.trials = t;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(ref out) = self.output {
            config.output_dir = out.clone();
        }
        config
    }

    fn strategies(&self) -> Vec<Strategy> {
        if self.strategies.is_empty() {
            Strategy::ALL.to_vec()
        } else {
            self.strategies.iter().copied().unique().collect()
        }
    }
}

/// Independent generator for each stage of a run, derived from one seed
fn stream(seed: u64, index: u64) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(index))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let store = cli.config_store();
    let config = cli.apply(store.load());

    let alphabet = Alphabet::latin();

    // validated before anything is saved so a bad value never reaches the config file
    if config.population_size == 0 {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, "population size must be at least 1")
            .exit();
    }
    if config.attributes_per_character > alphabet.len() {
        let mut cmd = Cli::command();
        cmd.error(
            ErrorKind::ValueValidation,
            format!(
                "attributes per character must be at most {}",
                alphabet.len()
            ),
        )
        .exit();
    }

    if cli.save_config {
        store.save(&config)?;
        info!("saved settings to {}", store.path().display());
    }

    let (corpus_name, corpus_text) = match cli.corpus {
        Some(ref path) => (path.display().to_string(), read_corpus(path)?),
        None => (DEFAULT_CORPUS.to_string(), default_corpus().to_string()),
    };

    let distribution = build_letter_distribution(&corpus_text, &alphabet)?;
    info!(
        "corpus {corpus_name}: letter entropy {:.3} bits",
        distribution.entropy()
    );

    let seed = config.seed.unwrap_or_else(rand::random);
    let population = Population::generate(
        &distribution,
        config.population_size,
        config.attributes_per_character,
        &mut stream(seed, 0),
    )?;
    info!(
        "population of {} characters with {} attributes (seed {seed})",
        population.len(),
        config.attributes_per_character
    );
    if !population.is_distinct() {
        warn!("population contains duplicate characters, games targeting them will stall");
    }

    let strategies = cli.strategies();
    let results: Vec<_> = strategies
        .iter()
        .zip(1u64..)
        .map(|(&strategy, index)| {
            let r = run_trials(
                &population,
                config.trials,
                strategy,
                &alphabet,
                &mut stream(seed, index),
            );
            info!("{strategy}: {} games played", r.outcomes.len());
            r
        })
        .collect();

    let mut example_rng = stream(seed, strategies.len() as u64 + 1);
    let example_game = population.choose(&mut example_rng).map(|target| {
        play_game_traced(
            population.characters(),
            target,
            Strategy::MaxInfo,
            &alphabet,
            &mut example_rng,
        )
    });

    let initial_ranking = expected_information(population.characters(), &alphabet);
    let empirical_check = initial_ranking.first().and_then(|&(attribute, _)| {
        EmpiricalCheck::run(
            attribute,
            &population,
            EMPIRICAL_SAMPLES,
            &mut stream(seed, strategies.len() as u64 + 2),
        )
    });
    if let Some(ref check) = empirical_check {
        info!(
            "question {}: {:.3} bits measured over {} targets, {:.3} expected",
            check.attribute, check.empirical_bits, check.samples, check.expected_bits
        );
    }

    let report = RunReport {
        generated_at: chrono::Local::now(),
        corpus: corpus_name,
        seed,
        config: config.clone(),
        letter_entropy_bits: distribution.entropy(),
        population,
        initial_ranking,
        empirical_check,
        strategies: results.iter().map(StrategyReport::from).collect(),
        example_game,
    };
    report::write_all(&config.output_dir, &distribution, &results, &report)?;

    for s in &report.strategies {
        println!("{}", report::render_summary(&s.summary, &s.histogram));
    }
    if let Some(ref game) = report.example_game {
        let questions = game.steps.iter().map(|s| s.question).join("");
        println!(
            "example   target={} questions={} {}",
            game.target,
            questions,
            report::describe_outcome(&game.outcome)
        );
    }

    Ok(())
}
