//! Running session statistics.
//!
//! Purely additive: every accepted answer is recorded once, and nothing
//! is ever corrected or undone.

use serde::{Deserialize, Serialize};

/// Errors at or below this count as "within one order".
pub const WITHIN_ONE_ORDER: u32 = 1;

/// Counters for one quiz session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub answered_count: u32,
    pub total_error_sum: u64,
    pub within_one_order_count: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one accepted answer with the given order error.
    pub fn record(&mut self, error: u32) {
        self.answered_count += 1;
        self.total_error_sum += u64::from(error);
        if error <= WITHIN_ONE_ORDER {
            self.within_one_order_count += 1;
        }
    }

    /// Mean order error, `0.0` before the first answer.
    pub fn average_error(&self) -> f64 {
        if self.answered_count == 0 {
            return 0.0;
        }
        self.total_error_sum as f64 / f64::from(self.answered_count)
    }

    /// Percentage of answers within one order, rounded to a whole number.
    pub fn accuracy_percent(&self) -> u32 {
        if self.answered_count == 0 {
            return 0;
        }
        let ratio = f64::from(self.within_one_order_count) / f64::from(self.answered_count);
        (ratio * 100.0).round() as u32
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            answered: self.answered_count,
            average_error: self.average_error(),
            accuracy_percent: self.accuracy_percent(),
        }
    }
}

/// Display-ready snapshot of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub answered: u32,
    pub average_error: f64,
    pub accuracy_percent: u32,
}

impl SessionSummary {
    /// Average error with one decimal, e.g. `"1.3"`.
    pub fn average_error_display(&self) -> String {
        format!("{:.1}", self.average_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_session() {
        let stats = SessionStats::new();
        assert_eq!(stats.answered_count, 0);
        assert_eq!(stats.average_error(), 0.0);
        assert_eq!(stats.accuracy_percent(), 0);
    }

    #[test]
    fn record_accumulates() {
        let mut stats = SessionStats::new();
        for e in [0, 1, 2, 3] {
            stats.record(e);
        }
        assert_eq!(stats.answered_count, 4);
        assert_eq!(stats.total_error_sum, 6);
        assert_eq!(stats.within_one_order_count, 2);
        assert!((stats.average_error() - 1.5).abs() < f64::EPSILON);
        assert_eq!(stats.accuracy_percent(), 50);
    }

    #[test]
    fn accuracy_rounds_to_nearest_percent() {
        let mut stats = SessionStats::new();
        stats.record(0);
        stats.record(5);
        stats.record(4);
        // 1 of 3 within one order.
        assert_eq!(stats.accuracy_percent(), 33);

        stats.record(1);
        stats.record(1);
        stats.record(9);
        // 3 of 6.
        assert_eq!(stats.accuracy_percent(), 50);
    }

    #[test]
    fn summary_formats_one_decimal() {
        let mut stats = SessionStats::new();
        stats.record(1);
        stats.record(1);
        stats.record(2);
        let summary = stats.summary();
        assert_eq!(summary.answered, 3);
        assert_eq!(summary.average_error_display(), "1.3");
        assert_eq!(summary.accuracy_percent, 67);
    }
}
