// src/aggregate/extractor.rs
use crate::page::{ActionHandle, ListingNode};

use super::price::{parse_quantity, PriceKey};

/// One parsed listing. Transient; only its key, seller and handle survive
/// into the table.
#[derive(Clone, Debug)]
pub struct ListingRecord {
    pub seller: String,
    pub quantity: f64,
    pub currency: String,
    pub action: ActionHandle,
}

impl ListingRecord {
    pub fn price_key(&self) -> PriceKey {
        PriceKey::new(self.quantity, &self.currency)
    }
}

/// Why a node produced no record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reject {
    OutsideResultSet,
    ErrorMarker,
    MissingSeller,
    MissingAction,
    MissingQuantity,
    MissingCurrency,
    OwnListing,
}

#[derive(Clone, Debug, Default)]
pub struct ListingExtractor {
    own_account: Option<String>,
}

impl ListingExtractor {
    pub fn new(own_account: Option<String>) -> Self {
        Self { own_account: own_account.filter(|a| !a.trim().is_empty()) }
    }

    pub fn own_account(&self) -> Option<&str> { self.own_account.as_deref() }

    pub fn extract<N: ListingNode + ?Sized>(&self, node: &N) -> Option<ListingRecord> {
        match self.classify(node) {
            Ok(rec) => Some(rec),
            Err(why) => {
                logd!("Extract: node {} dropped ({:?})", node.id(), why);
                None
            }
        }
    }

    pub fn classify<N: ListingNode + ?Sized>(&self, node: &N) -> Result<ListingRecord, Reject> {
        if !node.in_result_set() {
            return Err(Reject::OutsideResultSet);
        }
        if node.has_error() {
            return Err(Reject::ErrorMarker);
        }

        let seller = node.seller().ok_or(Reject::MissingSeller)?;
        let action = node.action().ok_or(Reject::MissingAction)?;
        let quantity = node.quantity_text().ok_or(Reject::MissingQuantity)?;
        let currency = node.currency_text().ok_or(Reject::MissingCurrency)?;

        let seller = seller.trim().to_string();
        if self.own_account.as_deref() == Some(seller.as_str()) {
            return Err(Reject::OwnListing);
        }

        Ok(ListingRecord {
            seller,
            quantity: parse_quantity(&quantity),
            currency: currency.trim().to_string(),
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{NodeId, PageNode};

    fn row(seller: &str, qty: &str, cur: &str, extra: &str) -> String {
        format!(
            r#"<div class="row"><span class="profile-link"><a>{seller}</a></span>{extra}<span data-field="price"><span>Price:</span><span>{qty}</span><span>×</span><span class="currency-text">{cur}</span></span><button class="direct-btn">W</button></div>"#
        )
    }

    fn node(markup: String) -> PageNode {
        PageNode::element(NodeId::new(1), Some(vec![s!("resultset")]), markup)
    }

    #[test]
    fn well_formed_row_becomes_record() {
        let ex = ListingExtractor::new(None);
        let rec = ex.classify(&node(row("Beta", "4", "exalted", ""))).unwrap();
        assert_eq!(rec.seller, "Beta");
        assert_eq!(rec.quantity, 4.0);
        assert_eq!(rec.currency, "exalted");
        assert_eq!(rec.price_key().as_str(), "4 exalted");
    }

    #[test]
    fn error_marker_rejects() {
        let ex = ListingExtractor::new(None);
        let n = node(row("Beta", "4", "exalted", r#"<span class="error">Price lookup failed</span>"#));
        assert_eq!(ex.classify(&n).unwrap_err(), Reject::ErrorMarker);
    }

    #[test]
    fn own_listing_rejects() {
        let ex = ListingExtractor::new(Some(s!("Beta")));
        assert_eq!(ex.classify(&node(row("Beta", "4", "exalted", ""))).unwrap_err(), Reject::OwnListing);
        assert!(ex.extract(&node(row("Gamma", "4", "exalted", ""))).is_some());
    }

    #[test]
    fn missing_pieces_reject() {
        let ex = ListingExtractor::new(None);
        let no_button = node(s!(r#"<div><span class="profile-link"><a>A</a></span></div>"#));
        assert_eq!(ex.classify(&no_button).unwrap_err(), Reject::MissingAction);

        let no_seller = node(s!(r#"<div><button class="direct-btn">W</button></div>"#));
        assert_eq!(ex.classify(&no_seller).unwrap_err(), Reject::MissingSeller);

        let outside = PageNode::element(NodeId::new(9), Some(vec![s!("sidebar")]), row("A", "1", "c", ""));
        assert_eq!(ex.classify(&outside).unwrap_err(), Reject::OutsideResultSet);

        let detached = PageNode::element(NodeId::new(10), None, row("A", "1", "c", ""));
        assert_eq!(ex.classify(&detached).map(|r| r.seller), Ok(s!("A")));
    }

    #[test]
    fn bad_quantity_is_still_a_record() {
        let ex = ListingExtractor::new(None);
        let rec = ex.extract(&node(row("A", "lots", "chaos", ""))).unwrap();
        assert!(rec.quantity.is_nan());
    }
}
