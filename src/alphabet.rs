use crate::error::DistributionError;
use serde::Serialize;

/// Ordered set of attribute letters.
///
/// The order is stable and doubles as the tie-break order when questions
/// are ranked, which keeps the max-information strategy reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    /// Lowercase latin alphabet `a..=z`
    pub fn latin() -> Self {
        Self {
            letters: ('a'..='z').collect(),
        }
    }

    /// Build an alphabet from arbitrary letters, dropping duplicates while
    /// keeping first-seen order
    pub fn new<I: IntoIterator<Item = char>>(letters: I) -> Result<Self, DistributionError> {
        let mut unique: Vec<char> = Vec::new();
        for c in letters {
            let c = c.to_lowercase().next().unwrap_or(c);
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        if unique.is_empty() {
            return Err(DistributionError::EmptyAlphabet);
        }
        Ok(Self { letters: unique })
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn position(&self, c: char) -> Option<usize> {
        self.letters.iter().position(|&l| l == c)
    }

    pub fn contains(&self, c: char) -> bool {
        self.position(c).is_some()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin()
    }
}
