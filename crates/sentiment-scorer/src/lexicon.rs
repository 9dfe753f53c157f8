//! Bundled polarity lexicon

use std::collections::HashMap;
use std::sync::OnceLock;

const BUNDLED: &str = include_str!("../data/lexicon.tsv");

/// Words that scale the polarity of the word right after them
const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.6),
    ("highly", 1.4),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.2),
    ("super", 1.4),
    ("totally", 1.4),
    ("very", 1.3),
    ("somewhat", 0.7),
    ("slightly", 0.6),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nor", "neither", "without", "cannot", "nothing", "nobody",
];

/// Token polarity table plus modifier lists
#[derive(Debug)]
pub struct Lexicon {
    polarity: HashMap<String, f64>,
}

impl Lexicon {
    /// The lexicon shipped with this crate, parsed on first use
    pub fn bundled() -> &'static Lexicon {
        static LEXICON: OnceLock<Lexicon> = OnceLock::new();
        LEXICON.get_or_init(|| Lexicon::parse(BUNDLED))
    }

    /// Parse `token<TAB>polarity` lines. Blank lines and `#` comments are
    /// ignored; lines that fail to parse are skipped.
    pub fn parse(source: &str) -> Self {
        let mut polarity = HashMap::new();
        for (lineno, line) in source.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with("# ") || line == "#" {
                continue;
            }
            let Some((token, value)) = line.split_once('\t') else {
                tracing::warn!(line = lineno + 1, "lexicon line has no tab separator");
                continue;
            };
            match value.trim().parse::<f64>() {
                Ok(v) if (-1.0..=1.0).contains(&v) => {
                    polarity.insert(token.to_owned(), v);
                }
                _ => tracing::warn!(line = lineno + 1, token, "invalid lexicon polarity"),
            }
        }
        Self { polarity }
    }

    pub fn polarity(&self, token: &str) -> Option<f64> {
        self.polarity.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.polarity.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.polarity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polarity.is_empty()
    }

    /// Multiplier applied when `token` directly precedes a scored word
    pub fn intensity(&self, token: &str) -> Option<f64> {
        INTENSIFIERS
            .iter()
            .find(|(word, _)| *word == token)
            .map(|(_, factor)| *factor)
    }

    pub fn is_negator(&self, token: &str) -> bool {
        NEGATORS.contains(&token) || token.ends_with("n't")
    }
}
