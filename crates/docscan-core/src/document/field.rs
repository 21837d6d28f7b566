//! A named field bound to its ranked strategies.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use tracing::{debug, trace};

use super::strategy::{ExtractionStrategy, TransformFn, ValidatorFn};

/// One independently extracted field.
///
/// Strategies run in ascending priority; the first candidate accepted by the
/// validator wins and later strategies are never consulted. A rejected
/// candidate only moves the waterfall on to the next strategy.
#[derive(Clone)]
pub struct FieldExtractor {
    name: &'static str,
    strategies: Vec<ExtractionStrategy>,
    validator: Option<ValidatorFn>,
    transform: Option<TransformFn>,
    required: bool,
}

impl fmt::Debug for FieldExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldExtractor")
            .field("name", &self.name)
            .field("strategies", &self.strategies)
            .field("validator", &self.validator.is_some())
            .field("transform", &self.transform.is_some())
            .field("required", &self.required)
            .finish()
    }
}

impl FieldExtractor {
    /// Create a field with no strategies.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            strategies: Vec::new(),
            validator: None,
            transform: None,
            required: false,
        }
    }

    /// Mark the field as required. Informational only.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Add a strategy, keeping the list ordered by priority.
    ///
    /// The sort is stable, so equal priorities keep declaration order.
    pub fn strategy(mut self, strategy: ExtractionStrategy) -> Self {
        self.strategies.push(strategy);
        self.strategies.sort_by_key(|s| s.priority);
        self
    }

    /// Add a regex strategy.
    pub fn pattern(self, priority: u8, regex: &Regex) -> Self {
        self.strategy(ExtractionStrategy::pattern(priority, regex.clone()))
    }

    /// Add a regex strategy whose candidate is rewritten by `transform`.
    pub fn pattern_with<F>(self, priority: u8, regex: &Regex, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.strategy(ExtractionStrategy::pattern(priority, regex.clone()).with_transform(transform))
    }

    /// Add a search-function strategy.
    pub fn heuristic<F>(self, priority: u8, f: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.strategy(ExtractionStrategy::heuristic(priority, f))
    }

    /// Set the acceptance predicate.
    pub fn validator<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(f));
        self
    }

    /// Set the transform applied to the accepted value.
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(f));
        self
    }

    /// Field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the field is marked required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Strategies in evaluation order.
    pub fn strategies(&self) -> &[ExtractionStrategy] {
        &self.strategies
    }

    /// Whether `value` passes the validator (always true without one).
    pub fn accepts(&self, value: &str) -> bool {
        self.validator.as_ref().is_none_or(|v| v(value))
    }

    /// Run the strategy waterfall.
    pub fn extract(&self, raw: &str, normalized: &str) -> Option<String> {
        for strategy in &self.strategies {
            let Some(candidate) = strategy.candidate(raw, normalized) else {
                continue;
            };

            if candidate.is_empty() {
                continue;
            }

            if !self.accepts(&candidate) {
                trace!(
                    field = self.name,
                    context = strategy.context.unwrap_or("-"),
                    "rejected candidate {:?}",
                    candidate
                );
                continue;
            }

            let value = match &self.transform {
                Some(transform) => transform(&candidate),
                None => candidate,
            };

            debug!(
                field = self.name,
                priority = strategy.priority,
                context = strategy.context.unwrap_or("-"),
                "extracted {:?}",
                value
            );
            return Some(value);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::rules::normalize::{digits_only, normalize};
    use crate::document::rules::validators::validate_rg;
    use lazy_static::lazy_static;
    use pretty_assertions::assert_eq;

    lazy_static! {
        static ref ANY_DIGITS: Regex = Regex::new(r"\b(\d{11})\b").unwrap();
        static ref LABELED: Regex = Regex::new(r"RG\s+(\d+)").unwrap();
        static ref FIRST: Regex = Regex::new(r"A=(\w+)").unwrap();
        static ref SECOND: Regex = Regex::new(r"B=(\w+)").unwrap();
    }

    #[test]
    fn test_validator_gate_falls_through_to_next_strategy() {
        let field = FieldExtractor::new("rg")
            .pattern(1, &ANY_DIGITS)
            .pattern_with(2, &LABELED, digits_only)
            .validator(validate_rg);

        let raw = "NUMERO 11111111111 RG 123456789";
        let value = field.extract(raw, &normalize(raw));

        assert_eq!(value, Some("123456789".to_string()));
    }

    #[test]
    fn test_priority_ordering_first_match_wins() {
        // Declared out of order: the priority, not the declaration, decides.
        let field = FieldExtractor::new("code")
            .pattern(2, &SECOND)
            .pattern_with(1, &FIRST, |v| v.to_lowercase());

        let raw = "A=ALPHA B=BRAVO";
        assert_eq!(field.extract(raw, raw), Some("alpha".to_string()));
    }

    #[test]
    fn test_equal_priorities_keep_declaration_order() {
        let field = FieldExtractor::new("code").pattern(1, &SECOND).pattern(1, &FIRST);
        let raw = "A=ALPHA B=BRAVO";
        assert_eq!(field.extract(raw, raw), Some("BRAVO".to_string()));
    }

    #[test]
    fn test_field_transform_applies_after_validation() {
        let field = FieldExtractor::new("code")
            .pattern(1, &FIRST)
            .validator(|v| v.chars().all(|c| c.is_ascii_uppercase()))
            .transform(|v| format!("<{v}>"));
        assert_eq!(field.extract("A=ALPHA", "A=ALPHA"), Some("<ALPHA>".to_string()));
    }

    #[test]
    fn test_missing_field_is_none() {
        let field = FieldExtractor::new("rg").pattern(1, &LABELED).validator(validate_rg);
        assert_eq!(field.extract("", ""), None);
        assert_eq!(field.extract("RG 11111111", "RG 11111111"), None);
    }
}
