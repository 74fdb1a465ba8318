//! Daily digest selection and rendering.
//!
//! The wall-clock trigger lives outside this crate; an external scheduler
//! invokes the `digest` subcommand once a day and this module decides what
//! each subscriber gets.

use chrono::{Duration, NaiveDate};

use crate::types::{Notice, Subscriber};

/// Notices whose 8-digit raw date falls within the last `days` days ending
/// at `today`. Undated notices (curated entries without a usable date,
/// malformed upstream dates) never count as new.
pub fn recent_notices(notices: &[Notice], days: i64, today: NaiveDate) -> Vec<Notice> {
    let threshold = (today - Duration::days(days)).format("%Y%m%d").to_string();
    notices
        .iter()
        .filter(|notice| !notice.raw_date.is_empty() && notice.raw_date >= threshold)
        .cloned()
        .collect()
}

/// The slice of a digest run one subscriber actually asked for.
pub fn notices_for_subscriber(notices: &[Notice], subscriber: &Subscriber) -> Vec<Notice> {
    notices
        .iter()
        .filter(|notice| notice.fee >= subscriber.min_fee && notice.fee <= subscriber.max_fee)
        .cloned()
        .collect()
}

pub fn digest_subject(date: NaiveDate, count: usize) -> String {
    format!(
        "[위너스케치] {} 신규 설계공모 {}건 안내",
        date.format("%Y-%m-%d"),
        count
    )
}

/// Plain-text digest body. Every entry carries the detail link; the
/// trailing token line is the only unsubscribe credential we ever mail out.
pub fn render_digest(subscriber: &Subscriber, notices: &[Notice]) -> String {
    let mut body = String::new();
    body.push_str("안녕하세요, 위너스케치입니다.\n\n");
    body.push_str(&format!(
        "구독하신 설계비 범위({}원 ~ {}원)의 신규 공모 {}건을 안내드립니다.\n\n",
        format_currency(subscriber.min_fee),
        format_currency(subscriber.max_fee),
        notices.len()
    ));

    for (index, notice) in notices.iter().enumerate() {
        body.push_str(&format!("{}. {}\n", index + 1, notice.title));
        body.push_str(&format!("   발주기관: {}\n", notice.agency));
        if notice.fee > 0 {
            body.push_str(&format!("   설계비: {}원\n", format_currency(notice.fee)));
        } else {
            body.push_str("   설계비: 미공개\n");
        }
        body.push_str(&format!("   공고일: {}\n", notice.notice_date));
        body.push_str(&format!("   상세: {}\n\n", notice.url));
    }

    body.push_str(&format!(
        "수신을 원치 않으시면 관리 토큰 {} 으로 구독 해지를 요청해 주세요.\n",
        subscriber.manage_token
    ));
    body
}

/// Thousands-separated won amount, e.g. 5800000000 -> "5,800,000,000".
pub fn format_currency(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::new();
    for (index, c) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
