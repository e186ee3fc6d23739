// src/aggregate/session.rs
//
// One aggregation session: extractor, seen set and table owned together.
// All mutation goes through here so the table and seen set are always
// cleared as a pair.

use crate::{
    config::options::{AggregateOptions, HandlePolicy},
    config::consts::TOP_SELLERS,
    page::ListingNode,
    render::{self, Panel},
};

use super::{
    extractor::ListingExtractor,
    price::PriceKey,
    seen::SeenSet,
    table::{AggregationTable, TopSeller},
};

#[derive(Debug)]
pub struct AggregationSession {
    extractor: ListingExtractor,
    seen: SeenSet,
    table: AggregationTable,
    top_n: usize,
}

impl AggregationSession {
    pub fn new(own_account: Option<String>, policy: HandlePolicy, top_n: usize) -> Self {
        Self {
            extractor: ListingExtractor::new(own_account),
            seen: SeenSet::new(),
            table: AggregationTable::new(policy),
            top_n,
        }
    }

    pub fn from_options(opts: &AggregateOptions, own_account: Option<String>) -> Self {
        Self::new(own_account, opts.handle_policy, opts.top_n)
    }

    /// Startup scan of what is already on the page.
    pub fn process_initial<N: ListingNode>(&mut self, nodes: &[N]) -> bool {
        let changed = self.on_batch(nodes);
        logf!("Session: initial scan nodes={}, sellers={}", nodes.len(), self.table.seller_count());
        changed
    }

    /// Fold one batch in. Returns whether any listing was recorded.
    pub fn on_batch<N: ListingNode>(&mut self, nodes: &[N]) -> bool {
        let mut changed = false;
        for node in nodes {
            if !node.is_element() || self.seen.has_seen(node.id()) {
                continue;
            }
            self.seen.mark_seen(node.id());
            if let Some(record) = self.extractor.extract(node) {
                self.table.record_listing(record);
                changed = true;
            }
        }
        changed
    }

    pub fn reset_entry(&mut self, seller: &str, key: &PriceKey) -> bool {
        let removed = self.table.reset_entry(seller, key);
        logf!("Session: clear entry {} / {} (removed={})", seller, key, removed);
        removed
    }

    pub fn reset_seller(&mut self, seller: &str) -> bool {
        let removed = self.table.reset_seller(seller);
        logf!("Session: clear seller {} (removed={})", seller, removed);
        removed
    }

    /// Empty the table and forget every seen node.
    pub fn reset_all(&mut self) {
        self.table.clear();
        self.seen.clear();
        logf!("Session: cleared all");
    }

    /// Discard everything and rebuild from the nodes currently on the page.
    pub fn refresh<N: ListingNode>(&mut self, nodes: &[N]) -> bool {
        self.reset_all();
        let changed = self.on_batch(nodes);
        logf!("Session: refresh nodes={}, sellers={}", nodes.len(), self.table.seller_count());
        changed
    }

    pub fn top_sellers(&self, limit: usize) -> Vec<TopSeller> {
        self.table.top_sellers(limit)
    }

    pub fn render(&self) -> Panel {
        render::render(&self.table, self.top_n)
    }

    pub fn table(&self) -> &AggregationTable { &self.table }
    pub fn seen(&self) -> &SeenSet { &self.seen }
    pub fn extractor(&self) -> &ListingExtractor { &self.extractor }
    pub fn top_n(&self) -> usize { self.top_n }
}

impl Default for AggregationSession {
    fn default() -> Self {
        Self::new(None, HandlePolicy::LastSeen, TOP_SELLERS)
    }
}
