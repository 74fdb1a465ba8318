//! Keyword configuration for the notice filter.
//!
//! These lists are versioned configuration data, not tunable heuristics:
//! matching is plain substring containment on the Korean titles exactly as
//! the upstream announcements publish them. No tokenization, no stemming,
//! no case folding.

use serde::{Deserialize, Serialize};

/// Filter configuration selecting between the free-text search path and the
/// fixed recommendation feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMode {
    /// Single generic must-have term plus a free-text relevance check on
    /// title/agency. Used for visitor search.
    Loose,
    /// Curated multi-word category phrases only; no free-text relevance
    /// check. Used for the recommendation feed.
    Strict,
}

/// Loose mode accepts anything mentioning design work at all.
/// "설계" = design.
pub const LOOSE_MUST_HAVE: [&str; 1] = ["설계"];

/// Strict mode only accepts the specific scopes the studio bids on:
/// design competitions (with and without the inner space), construction-
/// document design, architectural design, remodeling.
pub const STRICT_MUST_HAVE: [&str; 6] = [
    "설계공모",
    "설계 공모",
    "실시 설계",
    "실시설계",
    "건축설계",
    "리모델링",
];

/// Titles mentioning any of these are never design-competition work the
/// studio can quote: demolition, facility management/operation, restoration,
/// forestry roads, fire prevention, waste, installation, repair, electrical,
/// erosion control, maintenance, water supply, bridges, surveying,
/// supervision, safety inspection, and similar non-design scopes.
pub const EXCLUDE_TERMS: [&str; 22] = [
    "철거",
    "관리",
    "운영",
    "개량",
    "검토",
    "복원",
    "임도",
    "산림",
    "산불",
    "예방",
    "폐기",
    "설치",
    "보수",
    "전기",
    "사방",
    "정비",
    "급수",
    "교량",
    "지표",
    "고도화",
    "감리",
    "안전진단",
];

/// The fixed category keywords behind the recommendation feed. Iteration
/// order is load-bearing: when two keywords surface the same notice, the
/// copy from the earlier keyword wins the `(title, agency)` dedup.
pub const CATEGORY_KEYWORDS: [&str; 4] = ["건축설계", "설계공모", "실시설계", "리모델링"];

pub fn must_have_terms(mode: FilterMode) -> &'static [&'static str] {
    match mode {
        FilterMode::Loose => &LOOSE_MUST_HAVE,
        FilterMode::Strict => &STRICT_MUST_HAVE,
    }
}
