// Ranking by pledged amount

use crate::store::CampaignRecord;
use serde::Serialize;
use std::borrow::Borrow;
use std::cmp::Ordering;

/// The two highest-funded campaigns; either slot may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedPair {
    pub first: Option<CampaignRecord>,
    pub second: Option<CampaignRecord>,
}

/// Ranking key: NaN ranks like 0, the same fallback the loader applies
fn rank_key(record: &CampaignRecord) -> f64 {
    if record.pledged.is_nan() {
        0.0
    } else {
        record.pledged
    }
}

/// Top `k` records by pledged, descending.
/// Sorts a copy of the references; `sort_by` is stable, so ties keep collection order.
pub fn top_k<R: Borrow<CampaignRecord>>(records: &[R], k: usize) -> Vec<&CampaignRecord> {
    let mut sorted: Vec<&CampaignRecord> = records.iter().map(Borrow::<CampaignRecord>::borrow).collect();
    // Keys are never NaN, so this is a total order
    sorted.sort_by(|a, b| rank_key(b).partial_cmp(&rank_key(a)).unwrap_or(Ordering::Equal));
    sorted.truncate(k);
    sorted
}

pub fn top_two<R: Borrow<CampaignRecord>>(records: &[R]) -> RankedPair {
    let mut top = top_k(records, 2).into_iter().cloned();
    RankedPair {
        first: top.next(),
        second: top.next(),
    }
}
