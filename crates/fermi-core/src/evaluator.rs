//! Order-of-magnitude answer evaluation.
//!
//! Everything here is a pure function: parse the typed estimate, round it
//! to the nearest power of ten, and classify the distance to the correct
//! exponent into a feedback tier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AnswerError;
use crate::model::Question;

/// Mantissa at which a value rounds up to the next power of ten.
///
/// The geometric midpoint between 10^n and 10^(n+1) is 10^(n+0.5) ≈ 3.162 × 10^n,
/// so 3.16 × 10^n already counts as the next order.
pub const ROUNDING_MANTISSA: f64 = 3.16;

/// Parse a typed estimate into a positive number.
///
/// Accepts plain decimals (`4500`, `0.25`), scientific notation (`3e9`),
/// thousands separators (`1,000,000`, `1_000`) and power notation
/// (`10^9`, `3x10^9`, `3*10^9`, `3×10^9`).
pub fn parse_answer(input: &str) -> Result<f64, AnswerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AnswerError::Empty);
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();

    let value = parse_power_notation(&cleaned)
        .or_else(|| cleaned.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| AnswerError::NotANumber(trimmed.to_string()))?;

    if value == 0.0 {
        return Err(AnswerError::Zero);
    }
    if value < 0.0 {
        return Err(AnswerError::Negative);
    }
    Ok(value)
}

fn parse_power_notation(s: &str) -> Option<f64> {
    let idx = s.find("10^")?;
    let (head, tail) = s.split_at(idx);
    let exponent: i32 = tail[3..].parse().ok()?;

    let coefficient = if head.is_empty() {
        1.0
    } else {
        head.strip_suffix(|c: char| matches!(c, 'x' | 'X' | '*' | '×'))?
            .parse::<f64>()
            .ok()?
    };

    Some(coefficient * 10f64.powi(exponent))
}

/// Round a positive value to the exponent of its nearest power of ten.
///
/// `1000 → 3`, `3159 → 3`, `3160 → 4`, `0.5 → 0`.
pub fn to_order_of_magnitude(value: f64) -> i32 {
    let (mantissa, exponent) = decompose(value);
    if mantissa >= ROUNDING_MANTISSA {
        exponent + 1
    } else {
        exponent
    }
}

/// Split `value` into `mantissa × 10^exponent` with the mantissa in `[1, 10)`.
///
/// Read off the shortest round-trip decimal form, so `0.000316` gives a
/// mantissa of exactly `3.16` and subnormals keep their true exponent.
fn decompose(value: f64) -> (f64, i32) {
    let formatted = format!("{value:e}");
    formatted
        .split_once('e')
        .and_then(|(mantissa, exponent)| {
            Some((
                mantissa.parse::<f64>().ok()?,
                exponent.parse::<i32>().ok()?,
            ))
        })
        .unwrap_or((value, 0))
}

/// Absolute distance between two exponents.
pub fn order_error(user_order: i32, correct_order: i32) -> u32 {
    (user_order - correct_order).unsigned_abs()
}

/// How close an estimate was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    /// Same order of magnitude.
    Exact,
    /// Off by one order.
    Close,
    /// Off by two orders.
    Ballpark,
    /// Off by more than two orders.
    Off,
}

impl Feedback {
    pub fn classify(error: u32) -> Self {
        match error {
            0 => Feedback::Exact,
            1 => Feedback::Close,
            2 => Feedback::Ballpark,
            _ => Feedback::Off,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Feedback::Exact => "exact",
            Feedback::Close => "close",
            Feedback::Ballpark => "ballpark",
            Feedback::Off => "off",
        }
    }

    /// Text shown to the user after an answer.
    pub fn message(&self, correct_order: i32) -> String {
        match self {
            Feedback::Exact => "Exact! Right order of magnitude.".to_string(),
            Feedback::Close => {
                format!("Close: one order off. The answer is 10^{correct_order}.")
            }
            Feedback::Ballpark => {
                format!("Ballpark: two orders off. The answer is 10^{correct_order}.")
            }
            Feedback::Off => format!("Off: the answer is 10^{correct_order}."),
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of scoring one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// The parsed estimate.
    pub user_value: f64,
    /// The estimate rounded to an exponent.
    pub user_order: i32,
    /// The question's exponent.
    pub correct_order: i32,
    /// `|user_order - correct_order|`.
    pub error: u32,
    pub feedback: Feedback,
}

impl Evaluation {
    pub fn message(&self) -> String {
        self.feedback.message(self.correct_order)
    }
}

/// Parse and score `input` against `question`.
pub fn evaluate(input: &str, question: &Question) -> Result<Evaluation, AnswerError> {
    let user_value = parse_answer(input)?;
    let user_order = to_order_of_magnitude(user_value);
    let error = order_error(user_order, question.correct_order);

    Ok(Evaluation {
        user_value,
        user_order,
        correct_order: question.correct_order,
        error,
        feedback: Feedback::classify(error),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_of_exact_powers() {
        assert_eq!(to_order_of_magnitude(1.0), 0);
        assert_eq!(to_order_of_magnitude(10.0), 1);
        assert_eq!(to_order_of_magnitude(1000.0), 3);
        assert_eq!(to_order_of_magnitude(1e9), 9);
        assert_eq!(to_order_of_magnitude(0.001), -3);
    }

    #[test]
    fn order_rounding_boundary() {
        assert_eq!(to_order_of_magnitude(3159.0), 3);
        assert_eq!(to_order_of_magnitude(3160.0), 4);
        assert_eq!(to_order_of_magnitude(3.16), 1);
        assert_eq!(to_order_of_magnitude(0.5), 0);
        assert_eq!(to_order_of_magnitude(9999.0), 4);
    }

    #[test]
    fn order_rounding_boundary_at_every_scale() {
        for n in -12..=12 {
            let at: f64 = format!("3.16e{n}").parse().unwrap();
            let below: f64 = format!("3.159e{n}").parse().unwrap();
            assert_eq!(to_order_of_magnitude(at), n + 1, "3.16e{n}");
            assert_eq!(to_order_of_magnitude(below), n, "3.159e{n}");
        }
    }

    #[test]
    fn order_of_tiny_values() {
        assert_eq!(to_order_of_magnitude(parse_answer("1e-310").unwrap()), -310);
        assert_eq!(to_order_of_magnitude(5e-324), -323);
        assert_eq!(to_order_of_magnitude(f64::MAX), 308);
    }

    #[test]
    fn small_estimate_on_the_boundary_is_exact() {
        let question = Question::new("Mass of a paperclip in kilograms", -3);
        let evaluation = evaluate("0.000316", &question).unwrap();
        assert_eq!(evaluation.user_order, -3);
        assert_eq!(evaluation.feedback, Feedback::Exact);
    }

    #[test]
    fn parse_plain_and_scientific() {
        assert_eq!(parse_answer("4500").unwrap(), 4500.0);
        assert_eq!(parse_answer("  0.25 ").unwrap(), 0.25);
        assert_eq!(parse_answer("3e9").unwrap(), 3e9);
        assert_eq!(parse_answer("2.5E-3").unwrap(), 2.5e-3);
    }

    #[test]
    fn parse_separators_and_powers() {
        assert_eq!(parse_answer("1,000,000").unwrap(), 1e6);
        assert_eq!(parse_answer("1_000").unwrap(), 1000.0);
        assert_eq!(parse_answer("10^9").unwrap(), 1e9);
        assert_eq!(parse_answer("3x10^4").unwrap(), 30000.0);
        assert_eq!(parse_answer("3 × 10^4").unwrap(), 30000.0);
        assert!((parse_answer("2*10^-2").unwrap() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn parse_rejects_invalid_input() {
        assert_eq!(parse_answer(""), Err(AnswerError::Empty));
        assert_eq!(parse_answer("   "), Err(AnswerError::Empty));
        assert_eq!(parse_answer("0"), Err(AnswerError::Zero));
        assert_eq!(parse_answer("0.0"), Err(AnswerError::Zero));
        assert_eq!(parse_answer("-5"), Err(AnswerError::Negative));
        assert_eq!(
            parse_answer("lots"),
            Err(AnswerError::NotANumber("lots".into()))
        );
        assert!(matches!(parse_answer("inf"), Err(AnswerError::NotANumber(_))));
        assert!(matches!(parse_answer("NaN"), Err(AnswerError::NotANumber(_))));
        assert!(matches!(parse_answer("x10^3"), Err(AnswerError::NotANumber(_))));
    }

    #[test]
    fn feedback_tiers() {
        assert_eq!(Feedback::classify(0), Feedback::Exact);
        assert_eq!(Feedback::classify(1), Feedback::Close);
        assert_eq!(Feedback::classify(2), Feedback::Ballpark);
        assert_eq!(Feedback::classify(3), Feedback::Off);
        assert_eq!(Feedback::classify(12), Feedback::Off);
    }

    #[test]
    fn order_error_is_symmetric() {
        assert_eq!(order_error(5, 5), 0);
        assert_eq!(order_error(3, 6), 3);
        assert_eq!(order_error(6, 3), 3);
        assert_eq!(order_error(-2, 1), 3);
    }

    #[test]
    fn evaluate_scores_against_question() {
        let q = Question::new("Seconds in a year", 7);

        let exact = evaluate("3e7", &q).unwrap();
        assert_eq!(exact.user_order, 7);
        assert_eq!(exact.feedback, Feedback::Exact);

        let off = evaluate("1000", &q).unwrap();
        assert_eq!(off.error, 4);
        assert_eq!(off.feedback, Feedback::Off);
        assert!(off.message().contains("10^7"));

        assert_eq!(evaluate("-1", &q), Err(AnswerError::Negative));
    }
}
