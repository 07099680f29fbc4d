// Aggregate statistics over any subset of campaigns

use crate::store::CampaignRecord;
use serde::Serialize;
use std::borrow::Borrow;

/// Derived totals. Never cached: callers recompute from whichever slice they hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub total_backers: u64,
    pub total_pledged: f64,
    pub campaign_count: usize,
    pub unfunded_count: usize,
}

impl AggregateSummary {
    pub fn funded_count(&self) -> usize {
        self.campaign_count - self.unfunded_count
    }
}

/// Sum backers and pledged, count campaigns and unfunded campaigns.
/// Accepts owned records or references (e.g. a filtered view). Empty input is all zeros.
pub fn summarize<R: Borrow<CampaignRecord>>(records: &[R]) -> AggregateSummary {
    records
        .iter()
        .map(Borrow::<CampaignRecord>::borrow)
        .fold(AggregateSummary::default(), |mut acc, record| {
            acc.total_backers = acc.total_backers.saturating_add(record.backers);
            acc.total_pledged += record.pledged;
            acc.campaign_count += 1;
            if !record.is_funded() {
                acc.unfunded_count += 1;
            }
            acc
        })
}
