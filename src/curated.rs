//! Manually tracked competitions that never appear in the procurement API:
//! international and city-run design calls published outside the portal.

use crate::types::Notice;

/// Build a curated notice. Curated entries carry a display date rather than
/// the upstream's raw timestamp, so the recency key is derived from it.
pub fn curated_notice(title: &str, agency: &str, fee: i64, notice_date: &str, url: &str) -> Notice {
    let raw_date: String = notice_date.chars().filter(char::is_ascii_digit).collect();
    Notice {
        title: title.to_string(),
        agency: agency.to_string(),
        fee,
        notice_date: notice_date.to_string(),
        url: url.to_string(),
        raw_date: if raw_date.len() == 8 { raw_date } else { String::new() },
    }
}

/// First-run seed for the curated table.
pub fn seed_notices() -> Vec<Notice> {
    vec![
        curated_notice(
            "서리풀 보이는 수장고 국제설계공모",
            "서울특별시",
            5_800_000_000,
            "2025-12-31",
            "",
        ),
        curated_notice(
            "서울형 키즈카페 건립 설계공모",
            "서울시",
            250_000_000,
            "2025-10-15",
            "",
        ),
        curated_notice(
            "노들섬 디자인 공모 (글로벌)",
            "서울특별시 도시공간기획과",
            1_500_000_000,
            "2025-11-20",
            "",
        ),
    ]
}
