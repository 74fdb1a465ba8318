//! Converts one raw API record into a canonical [`Notice`], or rejects it.

use crate::record::RawRecord;
use crate::rules::{self, FilterMode, EXCLUDE_TERMS};
use crate::types::Notice;

/// Public viewer template used when a record carries no detail link of its
/// own. `bidseq` is the announcement revision ordinal.
const DETAIL_URL_BASE: &str = "https://www.g2b.go.kr/ep/invitation/publish/bidInfoDtl.do";

/// Revision ordinal assumed when the source omits one.
const DEFAULT_REVISION: &str = "01";

/// Normalize one raw record under the given filter configuration.
///
/// Returns `None` when the record is out of scope: the title misses every
/// must-have term, mentions a deny-listed scope (exclusion always wins over
/// inclusion), or -- in loose mode -- neither title nor agency contains the
/// free-text `keyword`.
pub fn normalize(record: &RawRecord, keyword: &str, mode: FilterMode) -> Option<Notice> {
    let title = record.text("bidNtceNm").unwrap_or_default().to_string();
    let agency = record
        .text_any(&["ntceInsttNm", "dminsttNm"])
        .unwrap_or_default()
        .to_string();

    if !rules::must_have_terms(mode)
        .iter()
        .any(|term| title.contains(term))
    {
        return None;
    }
    if EXCLUDE_TERMS.iter().any(|term| title.contains(term)) {
        return None;
    }
    if mode == FilterMode::Loose
        && !keyword.is_empty()
        && !title.contains(keyword)
        && !agency.contains(keyword)
    {
        return None;
    }

    let fee = record.int("presmptPrce").unwrap_or(0).max(0);
    let (notice_date, raw_date) = format_date(record.text("bidClseDt").unwrap_or_default());
    let url = record
        .text_any(&["bidNtceDtlUrl", "bidNtceUrl"])
        .map(str::to_string)
        .unwrap_or_else(|| synthesize_detail_url(record));

    Some(Notice {
        title,
        agency,
        fee,
        notice_date,
        url,
        raw_date,
    })
}

/// `YYYYMMDDHHMM...` -> (`YYYY-MM-DD`, `YYYYMMDD`). Anything without eight
/// leading digits yields (`"-"`, `""`).
fn format_date(raw: &str) -> (String, String) {
    let digits: String = raw.chars().take(8).collect();
    if digits.len() == 8 && digits.chars().all(|c| c.is_ascii_digit()) {
        let formatted = format!("{}-{}-{}", &digits[0..4], &digits[4..6], &digits[6..8]);
        (formatted, digits)
    } else {
        ("-".to_string(), String::new())
    }
}

fn synthesize_detail_url(record: &RawRecord) -> String {
    match record.text("bidNtceNo") {
        Some(id) => {
            let ord = record.text("bidNtceOrd").unwrap_or(DEFAULT_REVISION);
            format!(
                "{}?bidno={}&bidseq={}&releaseYn=Y&taskClCd=1",
                DETAIL_URL_BASE, id, ord
            )
        }
        None => String::new(),
    }
}
