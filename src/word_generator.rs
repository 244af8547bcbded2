use rand::{rngs::ThreadRng, seq::SliceRandom, Rng};
use tracing::debug;

use crate::{
    error::{Error, Result},
    language::{Language, SupportedLanguage},
};

pub const PUNCTUATION: [&str; 6] = [".", ",", ";", "!", "?", "-"];
pub const PUNCTUATION_PROBABILITY: f64 = 0.06;

/// Tokens generated for a fresh session
pub const INITIAL_BATCH: usize = 80;
/// Tokens appended when the user submits the last generated word
pub const EXTEND_BATCH: usize = 40;

/// Fixed vocabulary the generator draws from
#[derive(Debug, Clone, PartialEq)]
pub struct WordPool {
    words: Vec<String>,
    punctuation: Vec<String>,
    punctuation_probability: f64,
}

impl WordPool {
    pub fn new(words: Vec<String>, punctuation: bool) -> Result<Self> {
        if words.is_empty() {
            return Err(Error::EmptyPool);
        }
        let (punctuation, punctuation_probability) = if punctuation {
            (
                PUNCTUATION.iter().map(|p| p.to_string()).collect(),
                PUNCTUATION_PROBABILITY,
            )
        } else {
            (Vec::new(), 0.0)
        };

        Ok(Self {
            words,
            punctuation,
            punctuation_probability,
        })
    }

    /// Combine the word lists of several languages into one pool
    pub fn from_languages(languages: &[SupportedLanguage], punctuation: bool) -> Result<Self> {
        let mut words = Vec::new();
        for &language in languages {
            words.extend(Language::load(language)?.words);
        }
        debug!(?languages, words = words.len(), "word pool loaded");
        Self::new(words, punctuation)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn punctuation(&self) -> &[String] {
        &self.punctuation
    }
}

/// Anything that can keep feeding tokens into a session
pub trait TokenSource {
    fn next_token(&mut self) -> String;

    fn batch(&mut self, n: usize) -> Vec<String> {
        (0..n).map(|_| self.next_token()).collect()
    }
}

/// Weighted random choice between punctuation and words
pub struct WordGenerator<R: Rng = ThreadRng> {
    pool: WordPool,
    rng: R,
}

impl WordGenerator<ThreadRng> {
    pub fn new(pool: WordPool) -> Self {
        Self::with_rng(pool, rand::thread_rng())
    }
}

impl<R: Rng> WordGenerator<R> {
    pub fn with_rng(pool: WordPool, rng: R) -> Self {
        Self { pool, rng }
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }
}

impl<R: Rng> TokenSource for WordGenerator<R> {
    fn next_token(&mut self) -> String {
        let probability = self.pool.punctuation_probability.clamp(0.0, 1.0);
        let from = if !self.pool.punctuation.is_empty() && self.rng.gen_bool(probability) {
            &self.pool.punctuation
        } else {
            &self.pool.words
        };

        // WordPool::new refuses an empty word list
        from.choose(&mut self.rng).cloned().unwrap_or_default()
    }
}

impl<R: Rng> Iterator for WordGenerator<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::{rngs::StdRng, SeedableRng};

    fn seeded(pool: WordPool) -> WordGenerator<StdRng> {
        WordGenerator::with_rng(pool, StdRng::seed_from_u64(7))
    }

    fn small_pool(punctuation: bool) -> WordPool {
        WordPool::new(vec!["alpha".into(), "beta".into()], punctuation).unwrap()
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        assert_matches!(WordPool::new(vec![], true), Err(Error::EmptyPool));
    }

    #[test]
    fn test_batch_sizes() {
        let mut generator = seeded(small_pool(true));

        assert_eq!(generator.batch(INITIAL_BATCH).len(), 80);
        assert_eq!(generator.batch(EXTEND_BATCH).len(), 40);
        assert!(generator.batch(0).is_empty());
    }

    #[test]
    fn test_tokens_come_from_pool() {
        let mut generator = seeded(small_pool(true));

        for token in generator.batch(500) {
            assert!(
                ["alpha", "beta"].contains(&token.as_str()) || PUNCTUATION.contains(&token.as_str()),
                "unexpected token {token}"
            );
        }
    }

    #[test]
    fn test_punctuation_is_occasional() {
        let mut generator = seeded(small_pool(true));

        let punct = generator
            .batch(10_000)
            .iter()
            .filter(|t| PUNCTUATION.contains(&t.as_str()))
            .count();

        // ~6% expected
        assert!(punct > 300 && punct < 1000, "got {punct} punctuation tokens");
    }

    #[test]
    fn test_no_punctuation_pool() {
        let mut generator = seeded(small_pool(false));

        assert!(generator.pool().punctuation().is_empty());
        assert!(generator
            .batch(1_000)
            .iter()
            .all(|t| !PUNCTUATION.contains(&t.as_str())));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a: Vec<String> = seeded(small_pool(true)).take(50).collect();
        let b: Vec<String> = seeded(small_pool(true)).take(50).collect();

        assert_eq!(a, b);
    }

    #[test]
    fn test_default_pool_combines_languages() {
        let pool = WordPool::from_languages(&SupportedLanguage::ALL, true).unwrap();

        assert!(pool.words().contains(&"the".to_string()));
        assert!(pool.words().contains(&"salom".to_string()));
        assert_eq!(pool.punctuation().len(), PUNCTUATION.len());
    }
}
