use chrono::{NaiveDate, Utc};

use winnersketch::curated::curated_notice;
use winnersketch::digest::{
    digest_subject, format_currency, notices_for_subscriber, recent_notices, render_digest,
};
use winnersketch::mailer::quote_request_body;
use winnersketch::types::{Plan, Subscriber};
use winnersketch::compute_quote;

fn subscriber(min_fee: i64, max_fee: i64) -> Subscriber {
    Subscriber {
        email: "owner@studio.kr".to_string(),
        min_fee,
        max_fee,
        manage_token: "9f3c1d2e-aaaa-bbbb-cccc-123456789012".to_string(),
        consented: true,
        created_at: Utc::now(),
    }
}

#[test]
fn recency_window_is_day_granular() {
    let today = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
    let notices = vec![
        curated_notice("오늘 공고", "서울시", 100, "2025-08-05", ""),
        curated_notice("어제 공고", "서울시", 100, "2025-08-04", ""),
        curated_notice("지난달 공고", "서울시", 100, "2025-07-01", ""),
        // Unusable date: never counts as new.
        curated_notice("날짜 없는 공고", "서울시", 100, "-", ""),
    ];

    let recent = recent_notices(&notices, 1, today);
    let titles: Vec<&str> = recent.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["오늘 공고", "어제 공고"]);
}

#[test]
fn subscriber_slice_respects_fee_range() {
    let notices = vec![
        curated_notice("소형", "서울시", 50_000_000, "2025-08-05", ""),
        curated_notice("중형", "서울시", 400_000_000, "2025-08-05", ""),
        curated_notice("대형", "서울시", 2_000_000_000, "2025-08-05", ""),
    ];

    let matched = notices_for_subscriber(&notices, &subscriber(100_000_000, 1_000_000_000));
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].title, "중형");
}

#[test]
fn digest_body_lists_entries_with_links() {
    let notices = vec![
        curated_notice(
            "서리풀 보이는 수장고 국제설계공모",
            "서울특별시",
            5_800_000_000,
            "2025-12-31",
            "https://project-seoul.example/seoripul",
        ),
        curated_notice("설계비 미공개 공모", "서울시", 0, "2025-08-05", ""),
    ];
    let subscriber = subscriber(0, i64::MAX);
    let body = render_digest(&subscriber, &notices);

    assert!(body.contains("서리풀 보이는 수장고 국제설계공모"));
    assert!(body.contains("5,800,000,000원"));
    assert!(body.contains("https://project-seoul.example/seoripul"));
    assert!(body.contains("설계비: 미공개"));
    assert!(body.contains(&subscriber.manage_token));
}

#[test]
fn subject_carries_date_and_count() {
    let date = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
    let subject = digest_subject(date, 3);
    assert!(subject.contains("2025-08-05"));
    assert!(subject.contains("3건"));
}

#[test]
fn currency_grouping() {
    assert_eq!(format_currency(0), "0");
    assert_eq!(format_currency(999), "999");
    assert_eq!(format_currency(1_000), "1,000");
    assert_eq!(format_currency(123_456_789), "123,456,789");
    assert_eq!(format_currency(5_800_000_000), "5,800,000,000");
}

#[test]
fn quote_request_body_is_fully_specified() {
    let breakdown = compute_quote(400_000_000);
    let body = quote_request_body("시청사 건축설계 공모", 400_000_000, Plan::Express, &breakdown);

    assert!(body.contains("시청사 건축설계 공모"));
    assert!(body.contains("400,000,000원"));
    assert!(body.contains("EXPRESS"));
    assert!(body.contains(&format_currency(breakdown.plans.express)));
    assert!(body.contains("0.9%"));
    assert!(body.contains(&breakdown.note));
}
