//! Lexicon scorer

use sentiment_core::SentimentScorer;

use crate::lexicon::Lexicon;
use crate::tokenizer::tokenize;

/// How many preceding tokens a negator reaches
const NEGATION_WINDOW: usize = 2;
const NEGATION_FACTOR: f64 = -0.5;
const EXCLAMATION_BOOST: f64 = 1.1;
const MAX_EXCLAMATIONS: i32 = 3;

/// Averages the polarity of every lexicon word in the text
#[derive(Debug, Clone, Copy)]
pub struct LexiconScorer {
    lexicon: &'static Lexicon,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::bundled(),
        }
    }

    fn contribution(&self, tokens: &[String], index: usize, polarity: f64) -> f64 {
        let mut value = polarity;

        if let Some(factor) = index
            .checked_sub(1)
            .and_then(|prev| self.lexicon.intensity(&tokens[prev]))
        {
            value = (value * factor).clamp(-1.0, 1.0);
        }

        let window = &tokens[index.saturating_sub(NEGATION_WINDOW)..index];
        if window.iter().any(|t| self.lexicon.is_negator(t)) {
            value *= NEGATION_FACTOR;
        }

        value
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);

        let (sum, count) = tokens
            .iter()
            .enumerate()
            .filter_map(|(i, token)| {
                self.lexicon
                    .polarity(token)
                    .map(|p| self.contribution(&tokens, i, p))
            })
            .fold((0.0, 0_u32), |(sum, n), v| (sum + v, n + 1));

        if count == 0 {
            return 0.0;
        }

        let bangs = text
            .trim_end()
            .chars()
            .rev()
            .take_while(|c| *c == '!')
            .count()
            .min(MAX_EXCLAMATIONS as usize) as i32;

        let mean = sum / f64::from(count);
        (mean * EXCLAMATION_BOOST.powi(bangs)).clamp(-1.0, 1.0)
    }
}
