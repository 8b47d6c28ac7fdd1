//! Offline quote source

use crate::application::ports::{QuoteError, QuoteSource};

const QUOTES: &[&str] = &[
    "Well begun is half done.",
    "The secret of getting ahead is getting started.",
    "Simplicity is the ultimate sophistication.",
    "What we think, we become.",
    "Nothing will work unless you do.",
    "Little by little, one travels far.",
    "Action is the foundational key to all success.",
    "It always seems impossible until it's done.",
];

/// Cycles through a fixed list of quotes
#[derive(Debug, Clone)]
pub struct BuiltinQuotes {
    quotes: Vec<String>,
    cursor: usize,
}

impl BuiltinQuotes {
    /// Start at a position derived from `seed`
    pub fn new(seed: u64) -> Self {
        Self::from_list(QUOTES.iter().map(|q| q.to_string()).collect(), seed)
    }

    pub fn from_list(quotes: Vec<String>, seed: u64) -> Self {
        let cursor = if quotes.is_empty() {
            0
        } else {
            (seed % quotes.len() as u64) as usize
        };
        BuiltinQuotes { quotes, cursor }
    }
}

impl QuoteSource for BuiltinQuotes {
    fn fetch(&mut self) -> Result<String, QuoteError> {
        if self.quotes.is_empty() {
            return Err(QuoteError("no quotes available".to_string()));
        }
        let quote = self.quotes[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.quotes.len();
        Ok(quote)
    }
}
