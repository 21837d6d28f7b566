//! Ranked techniques for locating one field's value in text.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use tracing::trace;

/// Text → candidate value.
pub type HeuristicFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Candidate value → rewritten value.
pub type TransformFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Candidate value → accepted?
pub type ValidatorFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// How a strategy finds its candidate.
#[derive(Clone)]
pub enum Matcher {
    /// Regex whose first capture group (or whole match) is the candidate.
    /// Tried against the normalized text first, then the raw text.
    Pattern(Regex),
    /// Arbitrary search. Called with the raw text first, then the normalized
    /// text.
    Heuristic(HeuristicFn),
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Matcher::Heuristic(_) => f.write_str("Heuristic(..)"),
        }
    }
}

/// One ranked candidate technique for a field.
#[derive(Clone)]
pub struct ExtractionStrategy {
    /// Lower values are tried first.
    pub priority: u8,
    /// How the candidate is located.
    pub matcher: Matcher,
    /// Applied to a trimmed candidate before validation.
    pub transform: Option<TransformFn>,
    /// Diagnostic label.
    pub context: Option<&'static str>,
}

impl fmt::Debug for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionStrategy")
            .field("priority", &self.priority)
            .field("matcher", &self.matcher)
            .field("transform", &self.transform.is_some())
            .field("context", &self.context)
            .finish()
    }
}

impl ExtractionStrategy {
    /// Strategy backed by a regex.
    pub fn pattern(priority: u8, regex: Regex) -> Self {
        Self {
            priority,
            matcher: Matcher::Pattern(regex),
            transform: None,
            context: None,
        }
    }

    /// Strategy backed by a search function.
    pub fn heuristic<F>(priority: u8, f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            priority,
            matcher: Matcher::Heuristic(Arc::new(f)),
            transform: None,
            context: None,
        }
    }

    /// Set the candidate transform.
    pub fn with_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(f));
        self
    }

    /// Set the diagnostic label.
    pub fn with_context(mut self, context: &'static str) -> Self {
        self.context = Some(context);
        self
    }

    /// Produce this strategy's candidate, trimmed and transformed.
    pub fn candidate(&self, raw: &str, normalized: &str) -> Option<String> {
        let found = match &self.matcher {
            Matcher::Pattern(re) => capture(re, normalized).or_else(|| capture(re, raw)),
            Matcher::Heuristic(f) => f(raw).or_else(|| f(normalized)),
        }?;

        let trimmed = found.trim();
        trace!(
            context = self.context.unwrap_or("-"),
            priority = self.priority,
            "strategy produced candidate {:?}",
            trimmed
        );

        Some(match &self.transform {
            Some(transform) => transform(trimmed),
            None => trimmed.to_string(),
        })
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    let caps = re.captures(text)?;
    caps.get(1)
        .or_else(|| caps.get(0))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pattern_prefers_normalized_text() {
        let strategy = ExtractionStrategy::pattern(1, Regex::new(r"(?i)CODE\s+(\w+)").unwrap());
        let value = strategy.candidate("code abc", "CODE ABC");
        assert_eq!(value, Some("ABC".to_string()));
    }

    #[test]
    fn test_pattern_falls_back_to_raw() {
        let strategy = ExtractionStrategy::pattern(1, Regex::new(r"(\d{3}-\d{2})").unwrap());
        let value = strategy.candidate("id 123-45", "ID 123 45");
        assert_eq!(value, Some("123-45".to_string()));
    }

    #[test]
    fn test_pattern_without_group_uses_whole_match() {
        let strategy = ExtractionStrategy::pattern(1, Regex::new(r"\d+").unwrap());
        assert_eq!(strategy.candidate("", "A 42 B"), Some("42".to_string()));
    }

    #[test]
    fn test_heuristic_prefers_raw_text() {
        let strategy = ExtractionStrategy::heuristic(1, |text: &str| {
            text.contains('-').then(|| text.to_string())
        });
        assert_eq!(strategy.candidate("a-b", "A B"), Some("a-b".to_string()));
        assert_eq!(strategy.candidate("a b", "A B"), None);
    }

    #[test]
    fn test_candidate_trimmed_then_transformed() {
        let strategy = ExtractionStrategy::pattern(1, Regex::new(r"X:(.*)").unwrap())
            .with_transform(|v| v.to_lowercase());
        assert_eq!(strategy.candidate("", "X:  HELLO  "), Some("hello".to_string()));
    }
}
