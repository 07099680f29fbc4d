// Funding-status filters over the campaign collection

use crate::store::CampaignRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which subset of campaigns the card list shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterSelection {
    #[default]
    All,
    Funded,
    Unfunded,
}

impl FilterSelection {
    pub const VARIANTS: [FilterSelection; 3] = [
        FilterSelection::All,
        FilterSelection::Funded,
        FilterSelection::Unfunded,
    ];

    /// Human-readable name for display
    pub fn label(&self) -> &'static str {
        match self {
            FilterSelection::All => "All Games",
            FilterSelection::Funded => "Funded Only",
            FilterSelection::Unfunded => "Unfunded Only",
        }
    }

    /// Short code (CLI / config value)
    pub fn code(&self) -> &'static str {
        match self {
            FilterSelection::All => "all",
            FilterSelection::Funded => "funded",
            FilterSelection::Unfunded => "unfunded",
        }
    }

    /// Does a record belong to this selection?
    pub fn matches(&self, record: &CampaignRecord) -> bool {
        match self {
            FilterSelection::All => true,
            FilterSelection::Funded => record.is_funded(),
            FilterSelection::Unfunded => !record.is_funded(),
        }
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FilterSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterSelection::All),
            "funded" => Ok(FilterSelection::Funded),
            "unfunded" => Ok(FilterSelection::Unfunded),
            other => Err(format!(
                "unknown filter '{}' (expected all, funded or unfunded)",
                other
            )),
        }
    }
}

/// Subsequence of `records` matching `selection`, original order preserved.
/// The input is only borrowed; the result is a new sequence.
pub fn apply(records: &[CampaignRecord], selection: FilterSelection) -> Vec<&CampaignRecord> {
    records.iter().filter(|r| selection.matches(r)).collect()
}

/// Split into (funded, unfunded) in a single pass
pub fn partition(records: &[CampaignRecord]) -> (Vec<&CampaignRecord>, Vec<&CampaignRecord>) {
    records.iter().partition(|r| r.is_funded())
}
