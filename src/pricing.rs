//! The service pricing policy: one published design fee in, one tiered
//! quote out.
//!
//! Fees run into the billions of won, so every step stays in `i64`; the
//! rate is carried in hundredths of a percent to keep the discount ladder
//! integral. Binary floating point only appears in the reported
//! `applied_rate_percent`, never in the amounts.

use crate::types::{PlanPrices, QuoteBreakdown};

/// At or above this fee the flat large-project rate applies.
pub const LARGE_PROJECT_THRESHOLD: i64 = 1_000_000_000;

/// At or above this fee the stepped volume discount ladder starts.
pub const SCALE_DISCOUNT_THRESHOLD: i64 = 300_000_000;

/// One discount step (0.01 percentage points) per this much fee above the
/// threshold.
const DISCOUNT_STEP: i64 = 10_000_000;

/// Rates in hundredths of a percent.
const BASE_RATE_CENTI: i64 = 100;
const LARGE_PROJECT_RATE_CENTI: i64 = 80;
const MIN_RATE_CENTI: i64 = 50;

const MIN_QUOTE: i64 = 500_000;
const CLAMP_TARGET: i64 = 1_000_000;
const ROUND_UNIT: i64 = 10_000;

/// Compute the tiered quote for a disclosed design fee.
///
/// Callers must branch on `fee > 0` first; a zero fee means "undisclosed"
/// and has no meaningful quote (see [`crate::types::Notice::quote`]).
pub fn compute_quote(fee: i64) -> QuoteBreakdown {
    let (rate_centi, note) = if fee >= LARGE_PROJECT_THRESHOLD {
        (
            LARGE_PROJECT_RATE_CENTI,
            "대형 프로젝트 (0.8%)".to_string(),
        )
    } else if fee >= SCALE_DISCOUNT_THRESHOLD {
        // Discount steps begin strictly above the threshold in discrete
        // 10,000,000-won increments; at the threshold itself the rate is
        // still the full 1%.
        let steps = (fee - SCALE_DISCOUNT_THRESHOLD) / DISCOUNT_STEP;
        let rate_centi = (BASE_RATE_CENTI - steps).max(MIN_RATE_CENTI);
        (rate_centi, format!("규모 할인 ({}%)", format_rate(rate_centi)))
    } else {
        (BASE_RATE_CENTI, "기본 요율 (1%)".to_string())
    };

    // rate_centi is hundredths of a percent, so percent-of-fee divides by
    // 100 * 100. Sub-won truncation is absorbed by the 10,000-won floor.
    let raw_quote = fee * rate_centi / 10_000;

    // Minimum-fee floor: tiny quotes keep their proportional part and gain
    // a flat 500,000 on top; quotes already past that but under 1,000,000
    // clamp up to exactly 1,000,000.
    let floored = if raw_quote <= MIN_QUOTE {
        raw_quote + MIN_QUOTE
    } else if raw_quote < CLAMP_TARGET {
        CLAMP_TARGET
    } else {
        raw_quote
    };

    let base = floored / ROUND_UNIT * ROUND_UNIT;

    QuoteBreakdown {
        base_quote: base,
        applied_rate_percent: rate_centi as f64 / 100.0,
        note,
        // base is a multiple of 10,000, so the 0.8/1.2 multipliers stay
        // exact in integer math before their own 10,000-won floor.
        plans: PlanPrices {
            basic: base * 8 / 10 / ROUND_UNIT * ROUND_UNIT,
            premium: base,
            express: base * 12 / 10 / ROUND_UNIT * ROUND_UNIT,
        },
    }
}

impl QuoteBreakdown {
    /// The applied rate without trailing zeros, e.g. "1", "0.9", "0.97".
    pub fn rate_display(&self) -> String {
        format_rate((self.applied_rate_percent * 100.0).round() as i64)
    }
}

fn format_rate(rate_centi: i64) -> String {
    if rate_centi % 100 == 0 {
        format!("{}", rate_centi / 100)
    } else if rate_centi % 10 == 0 {
        format!("{}.{}", rate_centi / 100, rate_centi % 100 / 10)
    } else {
        format!("{}.{:02}", rate_centi / 100, rate_centi % 100)
    }
}
