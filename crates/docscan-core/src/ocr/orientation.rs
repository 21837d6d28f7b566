//! Multi-orientation retry state machine.
//!
//! A scan may be rotated. The upright pass runs first; a weak result is
//! followed by the two quarter turns, and a still weak result by the half
//! turn. The best attempt wins.

use tracing::{debug, info};

use super::Orientation;
use crate::document::OcrExtractionResult;
use crate::models::OrientationConfig;

/// Quarter turns, in trial order.
const SECONDARY: [Orientation; 2] = [Orientation::Right, Orientation::Left];

/// One recognized-and-extracted orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrientationAttempt {
    /// Rotation applied before recognition.
    pub orientation: Orientation,
    /// Extraction confidence, 0 to 100.
    pub confidence: u8,
    /// Extracted fields.
    pub fields: OcrExtractionResult,
    /// Raw text length in characters.
    pub text_length: usize,
}

impl OrientationAttempt {
    /// A scored attempt.
    pub fn new(orientation: Orientation, fields: OcrExtractionResult, confidence: u8, text_length: usize) -> Self {
        Self {
            orientation,
            confidence,
            fields,
            text_length,
        }
    }

    /// Zero-confidence attempt standing in for a failed OCR call.
    pub fn failed(orientation: Orientation) -> Self {
        Self::new(orientation, OcrExtractionResult::new(), 0, 0)
    }

    /// Number of extracted fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Length of the fields serialized as JSON.
    pub fn serialized_len(&self) -> usize {
        serde_json::to_string(&self.fields).map(|s| s.len()).unwrap_or(0)
    }

    fn rank(&self) -> (usize, u8, usize) {
        (self.field_count(), self.confidence, self.serialized_len())
    }
}

/// Where the controller stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// Nothing tried yet.
    Initial,
    /// Only the upright pass has run.
    TestedPrimary,
    /// At least one rotated pass has run.
    TestedSecondary,
    /// No further orientation will be tried.
    Done,
}

/// Final pick of a retry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryOutcome {
    /// Best attempt, `None` only when nothing was recorded.
    pub best: Option<OrientationAttempt>,
    /// Orientations in the order they were tried.
    pub tested: Vec<Orientation>,
    /// Whether the best attempt reached the success threshold.
    pub success: bool,
}

/// Decides which orientation to try next and picks the best attempt.
///
/// Drive it with [`next_orientation`](Self::next_orientation) and
/// [`record`](Self::record) until it returns `None`.
#[derive(Debug, Clone)]
pub struct OrientationRetry {
    policy: OrientationConfig,
    attempts: Vec<OrientationAttempt>,
}

impl OrientationRetry {
    /// Create a controller with the given thresholds.
    pub fn new(policy: OrientationConfig) -> Self {
        Self {
            policy,
            attempts: Vec::with_capacity(4),
        }
    }

    /// Recorded attempts in trial order.
    pub fn attempts(&self) -> &[OrientationAttempt] {
        &self.attempts
    }

    fn tried(&self, orientation: Orientation) -> bool {
        self.attempts.iter().any(|a| a.orientation == orientation)
    }

    fn best_confidence(&self) -> u8 {
        self.attempts.iter().map(|a| a.confidence).max().unwrap_or(0)
    }

    /// The next orientation to try, or `None` when done.
    pub fn next_orientation(&self) -> Option<Orientation> {
        let Some(primary) = self.attempts.first() else {
            return Some(Orientation::Upright);
        };

        if primary.confidence >= self.policy.retry_below {
            return None;
        }
        if self.best_confidence() >= self.policy.early_exit_at {
            return None;
        }

        if let Some(next) = SECONDARY.into_iter().find(|o| !self.tried(*o)) {
            return Some(next);
        }

        if self.best_confidence() < self.policy.flip_below && !self.tried(Orientation::Flipped) {
            return Some(Orientation::Flipped);
        }

        None
    }

    /// Current state.
    pub fn state(&self) -> RetryState {
        if self.attempts.is_empty() {
            RetryState::Initial
        } else if self.next_orientation().is_none() {
            RetryState::Done
        } else if self.attempts.len() == 1 {
            RetryState::TestedPrimary
        } else {
            RetryState::TestedSecondary
        }
    }

    /// Record the outcome of one orientation.
    pub fn record(&mut self, attempt: OrientationAttempt) {
        info!(
            orientation = attempt.orientation.degrees(),
            confidence = attempt.confidence,
            fields = attempt.field_count(),
            "orientation attempt"
        );
        self.attempts.push(attempt);
    }

    /// Best attempt so far.
    pub fn best(&self) -> Option<&OrientationAttempt> {
        select_best(&self.attempts)
    }

    /// Orientations tried so far, in order.
    pub fn tested(&self) -> Vec<Orientation> {
        self.attempts.iter().map(|a| a.orientation).collect()
    }

    /// Consume the controller and pick the winner.
    pub fn finish(self) -> RetryOutcome {
        let tested = self.tested();
        let best = self.best().cloned();
        let success = best
            .as_ref()
            .is_some_and(|b| b.confidence >= self.policy.success_at);

        if let Some(best) = &best {
            debug!(
                orientation = best.orientation.degrees(),
                confidence = best.confidence,
                tried = tested.len(),
                "selected orientation"
            );
        }

        RetryOutcome { best, tested, success }
    }
}

/// Attempt with the most fields, then the highest confidence, then the
/// longest serialized result. Earlier attempts win exact ties.
pub fn select_best(attempts: &[OrientationAttempt]) -> Option<&OrientationAttempt> {
    let mut best: Option<&OrientationAttempt> = None;
    for attempt in attempts {
        if best.is_none_or(|b| attempt.rank() > b.rank()) {
            best = Some(attempt);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attempt(orientation: Orientation, confidence: u8, fields: &[(&str, &str)]) -> OrientationAttempt {
        let fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        OrientationAttempt::new(orientation, fields, confidence, 400)
    }

    /// Feed attempts in order, checking each is the one the controller asks for.
    fn run(attempts: Vec<OrientationAttempt>) -> OrientationRetry {
        let mut retry = OrientationRetry::new(OrientationConfig::default());
        for next in attempts {
            assert_eq!(retry.next_orientation(), Some(next.orientation));
            retry.record(next);
        }
        retry
    }

    #[test]
    fn test_strong_upright_stops_immediately() {
        let retry = run(vec![attempt(Orientation::Upright, 92, &[("nome", "A B")])]);
        assert_eq!(retry.next_orientation(), None);
        assert_eq!(retry.state(), RetryState::Done);
        assert_eq!(retry.tested(), vec![Orientation::Upright]);
    }

    #[test]
    fn test_fallback_to_quarter_turn_with_early_exit() {
        let retry = run(vec![
            attempt(Orientation::Upright, 40, &[("nome", "MARIA SILVA")]),
            attempt(
                Orientation::Right,
                90,
                &[
                    ("nome", "MARIA SILVA"),
                    ("rg", "123456789"),
                    ("cpf", "12345678909"),
                    ("data_nascimento", "10/05/1985"),
                ],
            ),
        ]);

        assert_eq!(retry.next_orientation(), None);
        let outcome = retry.finish();
        assert_eq!(outcome.tested, vec![Orientation::Upright, Orientation::Right]);

        let best = outcome.best.unwrap();
        assert_eq!(best.orientation, Orientation::Right);
        assert_eq!(best.field_count(), 4);
        assert!(outcome.success);
    }

    #[test]
    fn test_weak_everywhere_tries_all_four() {
        let retry = run(vec![
            attempt(Orientation::Upright, 30, &[]),
            attempt(Orientation::Right, 40, &[("nome", "A B")]),
            attempt(Orientation::Left, 50, &[]),
            attempt(Orientation::Flipped, 20, &[]),
        ]);

        assert_eq!(retry.state(), RetryState::Done);
        let outcome = retry.finish();
        assert_eq!(
            outcome.tested,
            vec![Orientation::Upright, Orientation::Right, Orientation::Left, Orientation::Flipped]
        );
        assert_eq!(outcome.best.unwrap().orientation, Orientation::Right);
        assert!(!outcome.success);
    }

    #[test]
    fn test_no_flip_when_quarter_turn_is_good_enough() {
        let retry = run(vec![
            attempt(Orientation::Upright, 60, &[]),
            attempt(Orientation::Right, 72, &[]),
            attempt(Orientation::Left, 65, &[]),
        ]);
        assert_eq!(retry.next_orientation(), None);
    }

    #[test]
    fn test_states() {
        let mut retry = OrientationRetry::new(OrientationConfig::default());
        assert_eq!(retry.state(), RetryState::Initial);
        retry.record(attempt(Orientation::Upright, 10, &[]));
        assert_eq!(retry.state(), RetryState::TestedPrimary);
        retry.record(attempt(Orientation::Right, 10, &[]));
        assert_eq!(retry.state(), RetryState::TestedSecondary);
    }

    #[test]
    fn test_field_count_beats_confidence() {
        let attempts = vec![
            attempt(Orientation::Upright, 90, &[("a", "1"), ("b", "2")]),
            attempt(Orientation::Right, 60, &[("a", "1"), ("b", "2"), ("c", "3")]),
        ];
        assert_eq!(select_best(&attempts).unwrap().orientation, Orientation::Right);
    }

    #[test]
    fn test_serialized_length_breaks_ties() {
        let attempts = vec![
            attempt(Orientation::Upright, 70, &[("nome", "ANA LIMA")]),
            attempt(Orientation::Right, 70, &[("nome", "ANA PAULA LIMA")]),
        ];
        assert_eq!(select_best(&attempts).unwrap().orientation, Orientation::Right);
    }

    #[test]
    fn test_exact_tie_keeps_earlier() {
        let attempts = vec![
            attempt(Orientation::Upright, 70, &[("nome", "ANA LIMA")]),
            attempt(Orientation::Right, 70, &[("nome", "ANA LIMA")]),
        ];
        assert_eq!(select_best(&attempts).unwrap().orientation, Orientation::Upright);
        assert!(select_best(&[]).is_none());
    }

    #[test]
    fn test_failed_attempt_is_empty() {
        let failed = OrientationAttempt::failed(Orientation::Left);
        assert_eq!(failed.confidence, 0);
        assert_eq!(failed.field_count(), 0);
        assert_eq!(failed.serialized_len(), 2);
    }
}
