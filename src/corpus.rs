use crate::alphabet::Alphabet;
use crate::error::DistributionError;
use crate::information::{entropy, information};
use include_dir::{include_dir, Dir};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

static CORPUS_DIR: Dir = include_dir!("src/corpora");

/// Name of the reference text bundled with the binary
pub const DEFAULT_CORPUS: &str = "default.txt";

/// Reference text shipped inside the binary
pub fn default_corpus() -> &'static str {
    CORPUS_DIR
        .get_file(DEFAULT_CORPUS)
        .and_then(|f| f.contents_utf8())
        .unwrap_or_default()
}

/// Read a corpus text file from disk
pub fn read_corpus<P: AsRef<Path>>(path: P) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Probability of each alphabet letter, derived from letter counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterDistribution {
    alphabet: Alphabet,
    counts: Vec<u64>,
    probabilities: Vec<f64>,
}

/// One row of the frequency-ranked view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterFrequency {
    pub letter: char,
    pub count: u64,
    pub probability: f64,
    pub information_bits: f64,
}

/// Count the alphabet letters of `corpus_text` and normalize the counts.
///
/// Text is lowercased; whitespace, punctuation and anything else outside
/// the alphabet is ignored.
pub fn build_letter_distribution(
    corpus_text: &str,
    alphabet: &Alphabet,
) -> Result<LetterDistribution, DistributionError> {
    let mut counts = vec![0u64; alphabet.len()];
    for c in corpus_text.chars().flat_map(char::to_lowercase) {
        if let Some(idx) = alphabet.position(c) {
            counts[idx] += 1;
        }
    }

    let total: u64 = counts.iter().sum();
    if total == 0 {
        return Err(DistributionError::EmptyCorpus);
    }

    let probabilities = counts.iter().map(|&n| n as f64 / total as f64).collect();
    Ok(LetterDistribution {
        alphabet: alphabet.clone(),
        counts,
        probabilities,
    })
}

impl LetterDistribution {
    /// Distribution from explicit weights, one per alphabet letter
    pub fn from_weights(alphabet: &Alphabet, weights: &[f64]) -> Result<Self, DistributionError> {
        if weights.len() != alphabet.len() {
            return Err(DistributionError::LengthMismatch {
                letters: alphabet.len(),
                weights: weights.len(),
            });
        }
        for (&letter, &weight) in alphabet.letters().iter().zip(weights) {
            if !weight.is_finite() || weight < 0.0 {
                return Err(DistributionError::InvalidWeight { letter, weight });
            }
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(DistributionError::ZeroTotal);
        }

        Ok(Self {
            alphabet: alphabet.clone(),
            counts: vec![0; alphabet.len()],
            probabilities: weights.iter().map(|w| w / total).collect(),
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Probabilities in alphabet order
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Raw letter counts in alphabet order (all zero for weight-built distributions)
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn probability(&self, letter: char) -> f64 {
        self.alphabet
            .position(letter)
            .map(|i| self.probabilities[i])
            .unwrap_or(0.0)
    }

    /// Self-information of a letter in bits; infinite for unseen letters
    pub fn information(&self, letter: char) -> f64 {
        information(self.probability(letter))
    }

    /// Shannon entropy of the whole distribution in bits
    pub fn entropy(&self) -> f64 {
        entropy(&self.probabilities)
    }

    /// Letters ordered by descending probability, alphabet order on ties
    pub fn ranked(&self) -> Vec<LetterFrequency> {
        let mut rows: Vec<LetterFrequency> = self
            .alphabet
            .letters()
            .iter()
            .zip(self.counts.iter().zip(&self.probabilities))
            .map(|(&letter, (&count, &probability))| LetterFrequency {
                letter,
                count,
                probability,
                information_bits: information(probability),
            })
            .collect();
        rows.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_whitespace_and_punctuation() {
        let dist = build_letter_distribution("A b,\nab  A!", &Alphabet::latin()).unwrap();
        assert_eq!(dist.counts()[0], 3);
        assert_eq!(dist.counts()[1], 2);
        assert!((dist.probability('a') - 0.6).abs() < 1e-12);
        assert!((dist.probability('b') - 0.4).abs() < 1e-12);
        assert_eq!(dist.probability('z'), 0.0);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let dist = build_letter_distribution(default_corpus(), &Alphabet::latin()).unwrap();
        let sum: f64 = dist.probabilities().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(dist.probabilities().iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn empty_corpus_is_an_error() {
        assert_eq!(
            build_letter_distribution(" ,.\n\t!", &Alphabet::latin()),
            Err(DistributionError::EmptyCorpus)
        );
        assert_eq!(
            build_letter_distribution("", &Alphabet::latin()),
            Err(DistributionError::EmptyCorpus)
        );
    }

    #[test]
    fn ranked_is_descending_with_stable_ties() {
        let dist = build_letter_distribution("cbba", &Alphabet::latin()).unwrap();
        let ranked = dist.ranked();
        assert_eq!(ranked[0].letter, 'b');
        assert_eq!(ranked[1].letter, 'a');
        assert_eq!(ranked[2].letter, 'c');
        assert!((ranked[0].information_bits - 1.0).abs() < 1e-12);
        assert!(ranked.last().unwrap().information_bits.is_infinite());
    }

    #[test]
    fn from_weights_normalizes() {
        let alphabet = Alphabet::new("abc".chars()).unwrap();
        let dist = LetterDistribution::from_weights(&alphabet, &[5.0, 3.0, 2.0]).unwrap();
        assert!((dist.probability('a') - 0.5).abs() < 1e-12);
        assert!((dist.probability('c') - 0.2).abs() < 1e-12);
    }

    #[test]
    fn from_weights_validates() {
        let alphabet = Alphabet::new("abc".chars()).unwrap();
        assert_eq!(
            LetterDistribution::from_weights(&alphabet, &[1.0]),
            Err(DistributionError::LengthMismatch {
                letters: 3,
                weights: 1
            })
        );
        assert_eq!(
            LetterDistribution::from_weights(&alphabet, &[1.0, -1.0, 0.0]),
            Err(DistributionError::InvalidWeight {
                letter: 'b',
                weight: -1.0
            })
        );
        assert_eq!(
            LetterDistribution::from_weights(&alphabet, &[0.0, 0.0, 0.0]),
            Err(DistributionError::ZeroTotal)
        );
    }

    #[test]
    fn default_corpus_is_bundled() {
        assert!(!default_corpus().is_empty());
    }

    #[test]
    fn uniform_entropy_of_two_letters() {
        let dist = build_letter_distribution("abab", &Alphabet::latin()).unwrap();
        assert!((dist.entropy() - 1.0).abs() < 1e-12);
    }
}
