use crate::corpus::LetterDistribution;
use crate::error::SamplingError;
use itertools::Itertools;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A synthetic entity defined by a fixed-size set of letter attributes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Character {
    attributes: BTreeSet<char>,
}

impl Character {
    pub fn new<I: IntoIterator<Item = char>>(attributes: I) -> Self {
        Self {
            attributes: attributes.into_iter().collect(),
        }
    }

    pub fn has(&self, attribute: char) -> bool {
        self.attributes.contains(&attribute)
    }

    pub fn attributes(&self) -> impl Iterator<Item = char> + '_ {
        self.attributes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.attributes.iter().join(","))
    }
}

/// Draw `k` distinct attributes without replacement, weighted by `weights`.
///
/// Each draw is proportional to the remaining weights; a drawn attribute has
/// its weight zeroed before the next draw.
pub fn sample_character<R: Rng + ?Sized>(
    weights: &[f64],
    attributes: &[char],
    k: usize,
    rng: &mut R,
) -> Result<Character, SamplingError> {
    if k > attributes.len() {
        return Err(SamplingError::TooManyAttributes {
            requested: k,
            available: attributes.len(),
        });
    }
    if weights.len() != attributes.len()
        || weights.iter().any(|w| !w.is_finite() || *w < 0.0)
    {
        return Err(SamplingError::InvalidWeights);
    }
    let weighted = weights.iter().filter(|&&w| w > 0.0).count();
    if weighted == 0 {
        return Err(SamplingError::InvalidWeights);
    }
    if k > weighted {
        return Err(SamplingError::NotEnoughWeightedAttributes {
            requested: k,
            weighted,
        });
    }

    let mut remaining = weights.to_vec();
    let mut picked = BTreeSet::new();
    for _ in 0..k {
        let dist = WeightedIndex::new(&remaining).map_err(|_| SamplingError::InvalidWeights)?;
        let idx = dist.sample(rng);
        picked.insert(attributes[idx]);
        remaining[idx] = 0.0;
    }

    Ok(Character { attributes: picked })
}

/// Ordered set of characters shared by every game in a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Population {
    characters: Vec<Character>,
}

impl Population {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    /// Sample `size` characters of `k` attributes each from `distribution`
    pub fn generate<R: Rng + ?Sized>(
        distribution: &LetterDistribution,
        size: usize,
        k: usize,
        rng: &mut R,
    ) -> Result<Self, SamplingError> {
        let letters = distribution.alphabet().letters();
        let characters = (0..size)
            .map(|_| sample_character(distribution.probabilities(), letters, k, rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { characters })
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Pick a target uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Character> {
        self.characters.choose(rng)
    }

    /// True when no two characters share the same attribute set
    pub fn is_distinct(&self) -> bool {
        self.characters.iter().all_unique()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_k_distinct_attributes() {
        let mut rng = StdRng::seed_from_u64(7);
        let letters: Vec<char> = ('a'..='z').collect();
        let weights = vec![1.0; 26];
        for _ in 0..50 {
            let c = sample_character(&weights, &letters, 5, &mut rng).unwrap();
            assert_eq!(c.len(), 5);
        }
    }

    #[test]
    fn never_samples_zero_weight_attributes() {
        let mut rng = StdRng::seed_from_u64(1);
        let letters = ['a', 'b', 'c', 'd'];
        let weights = [1.0, 0.0, 2.0, 0.0];
        for _ in 0..50 {
            let c = sample_character(&weights, &letters, 2, &mut rng).unwrap();
            assert!(c.has('a') && c.has('c'));
            assert!(!c.has('b') && !c.has('d'));
        }
    }

    #[test]
    fn too_many_attributes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            sample_character(&[1.0, 1.0], &['a', 'b'], 3, &mut rng),
            Err(SamplingError::TooManyAttributes {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn not_enough_weighted_attributes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            sample_character(&[1.0, 0.0, 0.0], &['a', 'b', 'c'], 2, &mut rng),
            Err(SamplingError::NotEnoughWeightedAttributes {
                requested: 2,
                weighted: 1
            })
        );
    }

    #[test]
    fn invalid_weights() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            sample_character(&[0.0, 0.0], &['a', 'b'], 1, &mut rng),
            Err(SamplingError::InvalidWeights)
        );
        assert_eq!(
            sample_character(&[1.0, f64::NAN], &['a', 'b'], 1, &mut rng),
            Err(SamplingError::InvalidWeights)
        );
    }

    #[test]
    fn heavier_letters_are_drawn_more_often() {
        let mut rng = StdRng::seed_from_u64(3);
        let letters = ['a', 'b', 'c'];
        let weights = [0.8, 0.1, 0.1];
        let with_a = (0..1000)
            .filter(|_| sample_character(&weights, &letters, 1, &mut rng).unwrap().has('a'))
            .count();
        assert!(with_a > 700, "got {with_a}");
    }

    #[test]
    fn population_generation_is_seeded() {
        let alphabet = Alphabet::latin();
        let dist = LetterDistribution::from_weights(&alphabet, &[1.0; 26]).unwrap();
        let p1 = Population::generate(&dist, 20, 5, &mut StdRng::seed_from_u64(9)).unwrap();
        let p2 = Population::generate(&dist, 20, 5, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.len(), 20);
    }

    #[test]
    fn display_lists_attributes_in_order() {
        assert_eq!(Character::new(['c', 'a', 'b']).to_string(), "{a,b,c}");
    }

    #[test]
    fn distinct_detection() {
        let p = Population::new(vec![Character::new(['a']), Character::new(['a'])]);
        assert!(!p.is_distinct());
    }
}
