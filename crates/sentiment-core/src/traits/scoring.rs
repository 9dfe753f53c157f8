//! Sentiment scoring port

/// Maps text to a polarity in `[-1.0, 1.0]`.
///
/// Implementations must be pure and deterministic; empty text scores `0.0`.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

impl<T: SentimentScorer + ?Sized> SentimentScorer for std::sync::Arc<T> {
    fn score(&self, text: &str) -> f64 {
        (**self).score(text)
    }
}
