//! Information measures used to rank questions.
//!
//! Expected information is computed two ways: averaged over every candidate
//! treated as the hidden target, and as the closed-form binary entropy of
//! the attribute's prevalence. The two must agree; both are public so they
//! can be checked against each other.

use crate::alphabet::Alphabet;
use crate::character::{Character, Population};
use rand::Rng;

/// Quantization step used when ordering scores, so that values equal up to
/// rounding noise fall back to alphabet order
const RANK_RESOLUTION: f64 = 1e-9;

/// Self-information of an event with probability `p`, in bits
pub fn information(p: f64) -> f64 {
    -p.log2()
}

/// `p * information(p)` with the `0 * log 0 = 0` convention
fn weighted_information(p: f64) -> f64 {
    if p <= 0.0 {
        0.0
    } else {
        p * information(p)
    }
}

/// Shannon entropy of a probability vector, in bits
pub fn entropy(probabilities: &[f64]) -> f64 {
    probabilities.iter().map(|&p| weighted_information(p)).sum()
}

/// Entropy of `n` equally likely outcomes
pub fn uniform_entropy(n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        (n as f64).log2()
    }
}

/// Fraction of candidates carrying `attribute`; 0 for an empty set
pub fn attribute_prevalence(attribute: char, candidates: &[Character]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    let with = candidates.iter().filter(|c| c.has(attribute)).count();
    with as f64 / candidates.len() as f64
}

/// Information gained from a yes/no answer when the attribute has prevalence `p`
pub fn answer_information(p: f64, answer: bool) -> f64 {
    information(if answer { p } else { 1.0 - p })
}

/// Expected information of asking about `attribute`, averaged over each
/// candidate taken in turn as the target
pub fn expected_information_sampled(attribute: char, candidates: &[Character]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    let p = attribute_prevalence(attribute, candidates);
    let total: f64 = candidates
        .iter()
        .map(|c| answer_information(p, c.has(attribute)))
        .sum();
    total / candidates.len() as f64
}

/// Expected information of asking about `attribute` as the binary entropy of
/// its prevalence
pub fn expected_information_closed_form(attribute: char, candidates: &[Character]) -> f64 {
    let p = attribute_prevalence(attribute, candidates);
    weighted_information(p) + weighted_information(1.0 - p)
}

fn rank_by<F>(alphabet: &Alphabet, score: F) -> Vec<(char, f64)>
where
    F: Fn(char) -> f64,
{
    let mut ranked: Vec<(char, f64)> = alphabet.letters().iter().map(|&a| (a, score(a))).collect();
    // stable sort keeps alphabet order among equal keys
    ranked.sort_by_key(|&(_, bits)| std::cmp::Reverse((bits / RANK_RESOLUTION).round() as i64));
    ranked
}

/// Every alphabet attribute with its expected information, best first.
/// Ties are resolved by alphabet order.
pub fn expected_information(candidates: &[Character], alphabet: &Alphabet) -> Vec<(char, f64)> {
    rank_by(alphabet, |a| expected_information_closed_form(a, candidates))
}

/// Same ranking as [`expected_information`], computed with the candidate
/// average formulation
pub fn expected_information_by_sampling(
    candidates: &[Character],
    alphabet: &Alphabet,
) -> Vec<(char, f64)> {
    rank_by(alphabet, |a| expected_information_sampled(a, candidates))
}

/// Monte-Carlo estimate of the information one question yields against
/// targets drawn uniformly from the population
pub fn empirical_information<R: Rng + ?Sized>(
    attribute: char,
    population: &Population,
    samples: usize,
    rng: &mut R,
) -> Option<f64> {
    if population.is_empty() || samples == 0 {
        return None;
    }
    let p = attribute_prevalence(attribute, population.characters());
    let mut total = 0.0;
    for _ in 0..samples {
        let target = population.choose(rng)?;
        total += answer_information(p, target.has(attribute));
    }
    Some(total / samples as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn abc_candidates() -> Vec<Character> {
        vec![
            Character::new(['a', 'b']),
            Character::new(['a', 'c']),
            Character::new(['b', 'c']),
        ]
    }

    #[test]
    fn information_of_a_fair_coin() {
        assert_eq!(information(0.5), 1.0);
        assert_eq!(information(1.0), 0.0);
        assert!(information(0.0).is_infinite());
    }

    #[test]
    fn entropy_handles_zero_probabilities() {
        assert_eq!(entropy(&[0.5, 0.5, 0.0]), 1.0);
        assert_eq!(entropy(&[1.0]), 0.0);
        assert!((uniform_entropy(8) - 3.0).abs() < 1e-12);
        assert_eq!(uniform_entropy(1), 0.0);
        assert_eq!(uniform_entropy(0), 0.0);
    }

    #[test]
    fn prevalence_counts_candidates() {
        let c = abc_candidates();
        assert!((attribute_prevalence('a', &c) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(attribute_prevalence('z', &c), 0.0);
        assert_eq!(attribute_prevalence('a', &[]), 0.0);
    }

    #[test]
    fn formulations_agree() {
        let mut rng = StdRng::seed_from_u64(11);
        let alphabet = Alphabet::latin();
        let letters = alphabet.letters().to_vec();
        let weights = vec![1.0; letters.len()];
        for size in 1..25 {
            let candidates: Vec<Character> = (0..size)
                .map(|_| {
                    crate::character::sample_character(&weights, &letters, 5, &mut rng).unwrap()
                })
                .collect();
            for &a in &letters {
                let sampled = expected_information_sampled(a, &candidates);
                let closed = expected_information_closed_form(a, &candidates);
                assert!(
                    (sampled - closed).abs() < 1e-9,
                    "{a}: sampled {sampled} closed {closed}"
                );
            }
        }
    }

    #[test]
    fn rankings_agree() {
        let alphabet = Alphabet::latin();
        let candidates = vec![
            Character::new(['a', 'e', 'i']),
            Character::new(['a', 'o', 'u']),
            Character::new(['e', 'o', 'z']),
            Character::new(['t', 'e', 'a']),
        ];
        let closed: Vec<char> = expected_information(&candidates, &alphabet)
            .into_iter()
            .map(|(a, _)| a)
            .collect();
        let sampled: Vec<char> = expected_information_by_sampling(&candidates, &alphabet)
            .into_iter()
            .map(|(a, _)| a)
            .collect();
        assert_eq!(closed, sampled);
    }

    #[test]
    fn symmetric_candidates_rank_equal_in_alphabet_order() {
        let alphabet = Alphabet::new("abc".chars()).unwrap();
        let ranked = expected_information(&abc_candidates(), &alphabet);
        assert_eq!(
            ranked.iter().map(|(a, _)| *a).collect::<Vec<_>>(),
            vec!['a', 'b', 'c']
        );
        let expected = entropy(&[2.0 / 3.0, 1.0 / 3.0]);
        for (_, bits) in ranked {
            assert!((bits - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn absent_or_universal_attributes_carry_no_information() {
        let c = abc_candidates();
        assert_eq!(expected_information_closed_form('z', &c), 0.0);
        assert_eq!(expected_information_sampled('z', &c), 0.0);
        let all_a = vec![Character::new(['a', 'b']), Character::new(['a', 'c'])];
        assert_eq!(expected_information_closed_form('a', &all_a), 0.0);
        assert_eq!(expected_information_sampled('a', &all_a), 0.0);
    }

    #[test]
    fn ranking_is_descending() {
        let alphabet = Alphabet::latin();
        let candidates = vec![
            Character::new(['a', 'b']),
            Character::new(['a', 'c']),
            Character::new(['d', 'c']),
            Character::new(['e', 'f']),
        ];
        let ranked = expected_information(&candidates, &alphabet);
        assert_eq!(ranked.len(), 26);
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1 - 1e-9));
        // a and c split 2/2: one full bit
        assert_eq!(ranked[0].0, 'a');
        assert_eq!(ranked[1].0, 'c');
        assert!((ranked[0].1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empirical_estimate_converges() {
        let population = Population::new(vec![
            Character::new(['a', 'b']),
            Character::new(['a', 'c']),
            Character::new(['b', 'c']),
            Character::new(['c', 'd']),
        ]);
        let mut rng = StdRng::seed_from_u64(5);
        let estimate = empirical_information('b', &population, 20_000, &mut rng).unwrap();
        let exact = expected_information_closed_form('b', population.characters());
        assert!((estimate - exact).abs() < 0.02, "{estimate} vs {exact}");
        assert_eq!(empirical_information('b', &population, 0, &mut rng), None);
    }
}
