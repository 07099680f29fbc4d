// View boundary - addressable slots, the sink trait, and the renderer
//
// The renderer never keeps state about what is on screen. Every render
// clears its slot(s) on the sink and appends fresh content, so repeated
// renders can never leave stale nodes behind.

use crate::aggregator::AggregateSummary;
use crate::format::{format_count, format_currency, format_number, DEFAULT_CURRENCY};
use crate::ranker::RankedPair;
use crate::store::CampaignRecord;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt::Write as _;

// ============================================================================
// SLOTS
// ============================================================================

/// Regions of the host view the core writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViewSlot {
    CardList,
    Contributions,
    TotalRaised,
    GameCount,
    Description,
    FirstGame,
    SecondGame,
}

impl ViewSlot {
    pub const ALL: [ViewSlot; 7] = [
        ViewSlot::Contributions,
        ViewSlot::TotalRaised,
        ViewSlot::GameCount,
        ViewSlot::Description,
        ViewSlot::FirstGame,
        ViewSlot::SecondGame,
        ViewSlot::CardList,
    ];
}

/// Stable external key for every slot (supplied by the host / config)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotKeys {
    pub card_list: String,
    pub contributions: String,
    pub total_raised: String,
    pub game_count: String,
    pub description: String,
    pub first_game: String,
    pub second_game: String,
}

impl Default for SlotKeys {
    fn default() -> Self {
        SlotKeys {
            card_list: "games-container".to_string(),
            contributions: "num-contributions".to_string(),
            total_raised: "total-raised".to_string(),
            game_count: "num-games".to_string(),
            description: "description-container".to_string(),
            first_game: "first-game".to_string(),
            second_game: "second-game".to_string(),
        }
    }
}

impl SlotKeys {
    pub fn key(&self, slot: ViewSlot) -> &str {
        match slot {
            ViewSlot::CardList => &self.card_list,
            ViewSlot::Contributions => &self.contributions,
            ViewSlot::TotalRaised => &self.total_raised,
            ViewSlot::GameCount => &self.game_count,
            ViewSlot::Description => &self.description,
            ViewSlot::FirstGame => &self.first_game,
            ViewSlot::SecondGame => &self.second_game,
        }
    }
}

// ============================================================================
// NODES
// ============================================================================

/// One campaign card, with numeric fields already formatted for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub name: String,
    pub description: String,
    pub image_ref: String,
    pub image_alt: String,
    pub pledged: String,
    pub goal: String,
    pub backers: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewNode {
    Card(Card),
    Text(String),
}

impl ViewNode {
    pub fn as_card(&self) -> Option<&Card> {
        match self {
            ViewNode::Card(card) => Some(card),
            ViewNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ViewNode::Text(text) => Some(text),
            ViewNode::Card(_) => None,
        }
    }
}

// ============================================================================
// SINK
// ============================================================================

/// Write-only view target. Implementations: `MemoryView` (tests, `print`) and
/// the terminal UI sink in the binary.
pub trait ViewSink {
    /// Drop every node currently in `slot`
    fn clear(&mut self, slot: ViewSlot);

    /// Add `node` after the existing content of `slot`
    fn append(&mut self, slot: ViewSlot, node: ViewNode);
}

/// In-memory view tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryView {
    slots: BTreeMap<ViewSlot, Vec<ViewNode>>,
}

impl ViewSink for MemoryView {
    fn clear(&mut self, slot: ViewSlot) {
        self.slots.remove(&slot);
    }

    fn append(&mut self, slot: ViewSlot, node: ViewNode) {
        self.slots.entry(slot).or_default().push(node);
    }
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self, slot: ViewSlot) -> &[ViewNode] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cards(&self) -> Vec<&Card> {
        self.nodes(ViewSlot::CardList)
            .iter()
            .filter_map(ViewNode::as_card)
            .collect()
    }

    /// Text content of a slot, nodes joined by newlines (empty slot = "")
    pub fn text(&self, slot: ViewSlot) -> String {
        self.nodes(slot)
            .iter()
            .filter_map(ViewNode::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Slot contents keyed by their external keys
    pub fn to_json(&self, keys: &SlotKeys) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = ViewSlot::ALL
            .into_iter()
            .map(|slot| {
                let nodes = serde_json::to_value(self.nodes(slot))
                    .unwrap_or(serde_json::Value::Array(Vec::new()));
                (keys.key(slot).to_string(), nodes)
            })
            .collect();
        serde_json::Value::Object(map)
    }

    /// Plain-text dump for terminals and logs
    pub fn to_text(&self, keys: &SlotKeys) -> String {
        let mut out = String::new();

        for slot in ViewSlot::ALL {
            if slot == ViewSlot::CardList {
                continue;
            }
            let _ = writeln!(out, "[{}] {}", keys.key(slot), self.text(slot));
        }

        let cards = self.cards();
        let _ = writeln!(out, "[{}] {} cards", keys.card_list, cards.len());
        for card in cards {
            let _ = writeln!(out, "  ┌ {}", card.name);
            let _ = writeln!(out, "  │ {}", card.description);
            let _ = writeln!(
                out,
                "  │ Pledged: {}  Goal: {}  Backers: {}",
                card.pledged, card.goal, card.backers
            );
            let _ = writeln!(out, "  └ {}", card.image_ref);
        }

        out
    }
}

// ============================================================================
// RENDERER
// ============================================================================

/// Projects records, summaries and rankings into a `ViewSink`
pub struct ViewRenderer<S: ViewSink> {
    sink: S,
    currency: String,
}

impl<S: ViewSink> ViewRenderer<S> {
    pub fn new(sink: S) -> Self {
        ViewRenderer {
            sink,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Builder pattern: override the currency prefix
    pub fn with_currency(mut self, prefix: impl Into<String>) -> Self {
        self.currency = prefix.into();
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn card(&self, record: &CampaignRecord) -> Card {
        Card {
            name: record.name.clone(),
            description: record.description.clone(),
            image_ref: record.image_ref.clone(),
            image_alt: format!("{} cover", record.name),
            pledged: format_currency(record.pledged, &self.currency),
            goal: format_currency(record.goal, &self.currency),
            backers: format_count(record.backers),
        }
    }

    /// Replace the card list with one card per record, in order
    pub fn render_cards<R: Borrow<CampaignRecord>>(&mut self, subset: &[R]) {
        self.sink.clear(ViewSlot::CardList);
        for record in subset {
            let card = self.card(Borrow::<CampaignRecord>::borrow(record));
            self.sink.append(ViewSlot::CardList, ViewNode::Card(card));
        }
    }

    /// Total backers, total raised and campaign count into their fixed slots
    pub fn render_summary(&mut self, summary: &AggregateSummary, collection_size: usize) {
        let values = [
            (ViewSlot::Contributions, format_count(summary.total_backers)),
            (
                ViewSlot::TotalRaised,
                format_currency(summary.total_pledged, &self.currency),
            ),
            (ViewSlot::GameCount, format_count(collection_size as u64)),
        ];

        for (slot, text) in values {
            self.replace_text(slot, Some(text));
        }
    }

    pub fn render_description(&mut self, summary: &AggregateSummary, total_records: usize) {
        let text = describe(summary, total_records, &self.currency);
        self.replace_text(ViewSlot::Description, Some(text));
    }

    /// First/second names; an absent record leaves its slot empty
    pub fn render_top_two(&mut self, pair: &RankedPair) {
        let first = pair.first.as_ref().map(|r| r.name.clone());
        let second = pair.second.as_ref().map(|r| r.name.clone());
        self.replace_text(ViewSlot::FirstGame, first);
        self.replace_text(ViewSlot::SecondGame, second);
    }

    fn replace_text(&mut self, slot: ViewSlot, text: Option<String>) {
        self.sink.clear(slot);
        if let Some(text) = text {
            self.sink.append(slot, ViewNode::Text(text));
        }
    }
}

/// Company blurb: total raised, campaign count, and how many remain unfunded
pub fn describe(summary: &AggregateSummary, total_records: usize, currency: &str) -> String {
    let remaining = if summary.unfunded_count == 1 {
        "game remains"
    } else {
        "games remain"
    };

    format!(
        "A total of {} has been raised for {} games. Currently, {} {} unfunded. \
         We need your help to fund these amazing games!",
        format_currency(summary.total_pledged, currency),
        format_number(total_records as f64),
        summary.unfunded_count,
        remaining,
    )
}
