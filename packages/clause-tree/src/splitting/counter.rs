//! Token counting.

/// Average characters per token for English text.
pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

/// Counts tokens in a piece of rendered text.
///
/// Implementations must be deterministic: the splitter calls the counter
/// once per candidate subtree and relies on getting the same answer for
/// the same text.
pub trait TokenCounter {
    /// Number of tokens in `text`.
    fn count(&self, text: &str) -> usize;
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> usize,
{
    fn count(&self, text: &str) -> usize {
        self(text)
    }
}

/// Counts whitespace-delimited words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

/// Estimates tokens from the character count.
#[derive(Debug, Clone, Copy)]
pub struct CharRatioCounter {
    chars_per_token: usize,
}

impl CharRatioCounter {
    /// Create a counter for the given ratio; a ratio of zero is treated as one.
    #[must_use]
    pub fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }
}

impl Default for CharRatioCounter {
    fn default() -> Self {
        Self::new(DEFAULT_CHARS_PER_TOKEN)
    }
}

impl TokenCounter for CharRatioCounter {
    fn count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.chars_per_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_counter() {
        assert_eq!(WordCounter.count(""), 0);
        assert_eq!(WordCounter.count("(1) Duties of\n    Authorised Dealers"), 5);
    }

    #[test]
    fn test_char_ratio_counter_rounds_up() {
        let counter = CharRatioCounter::default();
        assert_eq!(counter.count(""), 0);
        assert_eq!(counter.count("abcd"), 1);
        assert_eq!(counter.count("abcde"), 2);
        assert_eq!(CharRatioCounter::new(0).count("abc"), 3);
    }

    #[test]
    fn test_closure_counter() {
        let lines = |text: &str| text.lines().count();
        assert_eq!(lines.count("a\nb\nc"), 3);
    }
}
