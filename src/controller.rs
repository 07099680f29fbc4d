// Controller - owns the filter selection and keeps the view in sync
//
// Summary, description and top-two describe the whole collection: they are
// rendered once in `start` and left alone by every selection change.

use crate::aggregator::{summarize, AggregateSummary};
use crate::filter::{self, FilterSelection};
use crate::ranker::top_two;
use crate::store::{CampaignRecord, RecordStore};
use crate::view::{ViewRenderer, ViewSink};
use tracing::{debug, info};

pub struct Controller<S: ViewSink> {
    store: RecordStore,
    renderer: ViewRenderer<S>,
    selection: FilterSelection,
    summary: AggregateSummary,
}

impl<S: ViewSink> Controller<S> {
    /// Render the static views from the full collection, then the card list for ALL
    pub fn start(store: RecordStore, renderer: ViewRenderer<S>) -> Self {
        let summary = summarize(store.records());
        let ranked = top_two(store.records());

        let mut controller = Controller {
            store,
            renderer,
            selection: FilterSelection::All,
            summary,
        };

        let total = controller.store.len();
        controller.renderer.render_summary(&controller.summary, total);
        controller.renderer.render_description(&controller.summary, total);
        controller.renderer.render_top_two(&ranked);
        controller.render_selection();

        info!(
            campaigns = total,
            unfunded = controller.summary.unfunded_count,
            top = ranked.first.as_ref().map(|r| r.name.as_str()).unwrap_or(""),
            "campaign board ready"
        );

        controller
    }

    /// Show-all trigger
    pub fn show_all(&mut self) {
        self.select(FilterSelection::All);
    }

    /// Show-funded trigger
    pub fn show_funded(&mut self) {
        self.select(FilterSelection::Funded);
    }

    /// Show-unfunded trigger
    pub fn show_unfunded(&mut self) {
        self.select(FilterSelection::Unfunded);
    }

    /// Switch the selection and re-render the card list
    pub fn select(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.render_selection();
    }

    fn render_selection(&mut self) {
        let visible = filter::apply(self.store.records(), self.selection);
        self.renderer.render_cards(&visible);
        debug!(selection = %self.selection, count = visible.len(), "rendered cards");
    }

    pub fn selection(&self) -> FilterSelection {
        self.selection
    }

    /// Summary of the full collection (not the current filter)
    pub fn summary(&self) -> &AggregateSummary {
        &self.summary
    }

    /// Records behind the current card list
    pub fn visible(&self) -> Vec<&CampaignRecord> {
        filter::apply(self.store.records(), self.selection)
    }

    pub fn view(&self) -> &S {
        self.renderer.sink()
    }

    pub fn view_mut(&mut self) -> &mut S {
        self.renderer.sink_mut()
    }

    pub fn into_view(self) -> S {
        self.renderer.into_sink()
    }
}
