// src/aggregate/table.rs
//
// seller → (price key → count + action handle).
//
// Invariant: a seller present in the table has at least one entry. Every
// removal path prunes sellers whose last entry went away.

use std::collections::HashMap;

use crate::{config::options::HandlePolicy, page::ActionHandle};

use super::{extractor::ListingRecord, price::PriceKey};

#[derive(Clone, Debug)]
pub struct AggregationEntry {
    pub count: u32,
    pub action: ActionHandle,
}

#[derive(Clone, Debug)]
struct SellerListings {
    /// First-insertion rank; breaks ties between equal totals.
    rank: u64,
    /// Entries in the order their keys first appeared.
    entries: Vec<(PriceKey, AggregationEntry)>,
}

impl SellerListings {
    fn total(&self) -> u32 {
        self.entries.iter().map(|(_, e)| e.count).sum()
    }
}

/// One seller in the ranked projection.
#[derive(Clone, Debug)]
pub struct TopSeller {
    pub seller: String,
    pub total: u32,
    pub entries: Vec<(PriceKey, AggregationEntry)>,
}

#[derive(Clone, Debug, Default)]
pub struct AggregationTable {
    sellers: HashMap<String, SellerListings>,
    next_rank: u64,
    policy: HandlePolicy,
}

impl AggregationTable {
    pub fn new(policy: HandlePolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    pub fn policy(&self) -> HandlePolicy { self.policy }

    pub fn record_listing(&mut self, record: ListingRecord) {
        let key = record.price_key();
        let rank = self.next_rank;

        let seller = self.sellers.entry(record.seller).or_insert_with(|| SellerListings {
            rank,
            entries: Vec::new(),
        });
        if seller.rank == rank {
            self.next_rank += 1;
        }

        match seller.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, entry)) => {
                entry.count += 1;
                if self.policy == HandlePolicy::LastSeen {
                    entry.action = record.action;
                }
            }
            None => seller.entries.push((key, AggregationEntry { count: 1, action: record.action })),
        }
    }

    /// Remove one entry; prunes the seller if it was the last. Idempotent.
    pub fn reset_entry(&mut self, seller: &str, key: &PriceKey) -> bool {
        let Some(listings) = self.sellers.get_mut(seller) else { return false };
        let before = listings.entries.len();
        listings.entries.retain(|(k, _)| k != key);
        let removed = listings.entries.len() != before;
        if listings.entries.is_empty() {
            self.sellers.remove(seller);
        }
        removed
    }

    /// Remove a seller wholesale. Idempotent.
    pub fn reset_seller(&mut self, seller: &str) -> bool {
        self.sellers.remove(seller).is_some()
    }

    /// Empties the table only. Pair with clearing the seen set; see
    /// `AggregationSession::reset_all`.
    pub fn clear(&mut self) {
        self.sellers.clear();
        self.next_rank = 0;
    }

    pub fn get(&self, seller: &str, key: &PriceKey) -> Option<&AggregationEntry> {
        self.sellers
            .get(seller)?
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, e)| e)
    }

    pub fn contains_seller(&self, seller: &str) -> bool { self.sellers.contains_key(seller) }

    pub fn total_for(&self, seller: &str) -> u32 {
        self.sellers.get(seller).map(SellerListings::total).unwrap_or(0)
    }

    pub fn seller_count(&self) -> usize { self.sellers.len() }

    pub fn entry_count(&self) -> usize {
        self.sellers.values().map(|s| s.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool { self.sellers.is_empty() }

    /// Sellers by descending total, ties by first appearance, at most `limit`.
    /// Recomputed from scratch on every call.
    pub fn top_sellers(&self, limit: usize) -> Vec<TopSeller> {
        let mut ranked: Vec<(&String, &SellerListings, u32)> = self
            .sellers
            .iter()
            .map(|(name, l)| (name, l, l.total()))
            .collect();
        ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.rank.cmp(&b.1.rank)));
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|(name, l, total)| TopSeller {
                seller: name.clone(),
                total,
                entries: l.entries.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::page::node::Action;

    fn rec(seller: &str, q: f64, cur: &str, action: ActionHandle) -> ListingRecord {
        ListingRecord { seller: s!(seller), quantity: q, currency: s!(cur), action }
    }

    #[test]
    fn increments_and_prunes() {
        let mut t = AggregationTable::new(HandlePolicy::LastSeen);
        let k10 = PriceKey::new(10.0, "chaos");
        t.record_listing(rec("A", 10.0, "chaos", ActionHandle::detached()));
        t.record_listing(rec("A", 10.0, "chaos", ActionHandle::detached()));
        assert_eq!(t.get("A", &k10).map(|e| e.count), Some(2));

        assert!(t.reset_entry("A", &k10));
        assert!(!t.contains_seller("A"));
        assert!(!t.reset_entry("A", &k10));
        assert!(t.is_empty());
    }

    #[test]
    fn handle_policy_decides_which_handle_stays() {
        let first: Arc<Action> = Arc::new(|| {});
        let second: Arc<Action> = Arc::new(|| {});
        let (h1, h2) = (ActionHandle::new(&first), ActionHandle::new(&second));
        let key = PriceKey::new(1.0, "divine");

        let mut last = AggregationTable::new(HandlePolicy::LastSeen);
        last.record_listing(rec("A", 1.0, "divine", h1.clone()));
        last.record_listing(rec("A", 1.0, "divine", h2.clone()));
        assert!(last.get("A", &key).unwrap().action.same_target(&h2));

        let mut keep = AggregationTable::new(HandlePolicy::FirstSeen);
        keep.record_listing(rec("A", 1.0, "divine", h1.clone()));
        keep.record_listing(rec("A", 1.0, "divine", h2));
        assert!(keep.get("A", &key).unwrap().action.same_target(&h1));
    }

    #[test]
    fn ties_follow_first_appearance() {
        let mut t = AggregationTable::new(HandlePolicy::LastSeen);
        for s in ["C", "A", "B"] {
            t.record_listing(rec(s, 1.0, "chaos", ActionHandle::detached()));
        }
        let order: Vec<String> = t.top_sellers(10).into_iter().map(|s| s.seller).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn reset_seller_is_idempotent() {
        let mut t = AggregationTable::new(HandlePolicy::LastSeen);
        t.record_listing(rec("A", 1.0, "chaos", ActionHandle::detached()));
        assert!(t.reset_seller("A"));
        assert!(!t.reset_seller("A"));
    }
}
