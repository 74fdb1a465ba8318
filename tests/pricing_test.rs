use winnersketch::compute_quote;
use winnersketch::types::Notice;

#[test]
fn flat_rate_below_discount_threshold() {
    let breakdown = compute_quote(299_999_999);
    assert_eq!(breakdown.applied_rate_percent, 1.0);
    assert_eq!(breakdown.note, "기본 요율 (1%)");
    // 1% of 299,999,999 truncates to 2,999,999; floored to the 10,000 grid.
    assert_eq!(breakdown.base_quote, 2_990_000);
}

#[test]
fn discount_starts_strictly_above_threshold() {
    // At the threshold itself the rate is still the full 1%.
    let at_threshold = compute_quote(300_000_000);
    assert_eq!(at_threshold.applied_rate_percent, 1.0);
    assert_eq!(at_threshold.base_quote, 3_000_000);

    // One full step above, the first 0.01 comes off.
    let one_step = compute_quote(310_000_000);
    assert_eq!(one_step.applied_rate_percent, 0.99);
    assert_eq!(one_step.base_quote, 3_060_000);

    // A partial step does nothing.
    let partial_step = compute_quote(309_999_999);
    assert_eq!(partial_step.applied_rate_percent, 1.0);
}

#[test]
fn discount_clamps_at_half_percent() {
    // 60 steps would push the rate to 0.4; it must stop at 0.5.
    let breakdown = compute_quote(900_000_000);
    assert_eq!(breakdown.applied_rate_percent, 0.5);
    assert_eq!(breakdown.base_quote, 4_500_000);

    let near_large = compute_quote(999_999_999);
    assert_eq!(near_large.applied_rate_percent, 0.5);
}

#[test]
fn large_project_rate_is_fixed() {
    let at_threshold = compute_quote(1_000_000_000);
    assert_eq!(at_threshold.applied_rate_percent, 0.8);
    assert_eq!(at_threshold.note, "대형 프로젝트 (0.8%)");
    assert_eq!(at_threshold.base_quote, 8_000_000);

    // The rate does not move however far above the threshold the fee goes.
    let far_above = compute_quote(5_800_000_000);
    assert_eq!(far_above.applied_rate_percent, 0.8);
    assert_eq!(far_above.base_quote, 46_400_000);
}

#[test]
fn minimum_floor_adds_on_tiny_quotes() {
    // 1% of 1,000,000 is 10,000; at or below 500,000 the floor is additive,
    // keeping proportionality at the very low end.
    let breakdown = compute_quote(1_000_000);
    assert_eq!(breakdown.base_quote, 510_000);

    let proportional = compute_quote(30_000_000);
    assert_eq!(proportional.base_quote, 800_000);

    // Exactly 500,000 still takes the additive branch.
    let boundary = compute_quote(50_000_000);
    assert_eq!(boundary.base_quote, 1_000_000);
}

#[test]
fn mid_band_quotes_clamp_to_one_million() {
    // 600,000 sits strictly between the floor and 1,000,000.
    let breakdown = compute_quote(60_000_000);
    assert_eq!(breakdown.base_quote, 1_000_000);
}

#[test]
fn plan_prices_ordered_and_rounded() {
    let fees = [
        1,
        500_000,
        1_000_000,
        30_000_000,
        123_456_789,
        299_999_999,
        300_000_000,
        555_555_555,
        999_999_999,
        1_000_000_000,
        5_800_000_000,
    ];

    for fee in fees {
        let breakdown = compute_quote(fee);
        let plans = breakdown.plans;
        assert!(
            plans.basic <= plans.premium && plans.premium <= plans.express,
            "plan ordering violated for fee {}",
            fee
        );
        assert_eq!(plans.basic % 10_000, 0, "BASIC off-grid for fee {}", fee);
        assert_eq!(plans.premium % 10_000, 0, "PREMIUM off-grid for fee {}", fee);
        assert_eq!(plans.express % 10_000, 0, "EXPRESS off-grid for fee {}", fee);
        assert_eq!(plans.premium, breakdown.base_quote);
    }
}

#[test]
fn plan_derivation_from_base() {
    let breakdown = compute_quote(1_000_000);
    assert_eq!(breakdown.base_quote, 510_000);
    // 0.8 and 1.2 of the base, each floored to the 10,000 grid.
    assert_eq!(breakdown.plans.basic, 400_000);
    assert_eq!(breakdown.plans.express, 610_000);
}

#[test]
fn scale_discount_note_carries_trimmed_rate() {
    assert_eq!(compute_quote(400_000_000).note, "규모 할인 (0.9%)");
    assert_eq!(compute_quote(397_000_000).note, "규모 할인 (0.91%)");
    assert_eq!(compute_quote(305_000_000).note, "규모 할인 (1%)");
    assert_eq!(compute_quote(400_000_000).rate_display(), "0.9");
    assert_eq!(compute_quote(1_000_000_000).rate_display(), "0.8");
}

#[test]
fn undisclosed_fee_never_prices() {
    let notice = Notice {
        title: "청사 설계공모".to_string(),
        agency: "서울시".to_string(),
        fee: 0,
        notice_date: "2025-08-01".to_string(),
        url: String::new(),
        raw_date: "20250801".to_string(),
    };
    assert!(notice.quote().is_none());
}
