// src/render.rs
//
// Pure projection of the aggregation table into what the overlay shows.
// Rebuilt in full on every change; holding an old `Panel` is harmless, its
// handles just go stale with the page.

use crate::{
    aggregate::{
        price::{fmt_quantity, PriceKey},
        table::AggregationTable,
    },
    page::ActionHandle,
};

pub const HEADERS: [&str; 5] = ["Account Name", "Amount Listed", "Count", "Total", "Actions"];

#[derive(Clone, Debug)]
pub struct PanelRow {
    pub seller: String,
    pub key: PriceKey,
    pub count: u32,
    pub total_label: String,
    pub action: ActionHandle,
}

impl PanelRow {
    pub fn price_label(&self) -> &str { self.key.as_str() }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SellerTotal {
    pub seller: String,
    pub total: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Panel {
    pub sellers: Vec<SellerTotal>,
    pub rows: Vec<PanelRow>,
}

impl Panel {
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Plain-text table without the actions column.
    pub fn to_text(&self) -> String {
        let cells: Vec<[String; 4]> = self
            .rows
            .iter()
            .map(|r| [r.seller.clone(), s!(r.price_label()), r.count.to_string(), r.total_label.clone()])
            .collect();

        let mut widths = [0usize; 4];
        for (i, h) in HEADERS.iter().take(4).enumerate() {
            widths[i] = h.chars().count();
        }
        for row in &cells {
            for (i, c) in row.iter().enumerate() {
                widths[i] = widths[i].max(c.chars().count());
            }
        }

        let line = |cols: [&str; 4]| -> String {
            let padded: Vec<String> = cols
                .iter()
                .zip(widths)
                .map(|(c, w)| format!("{:<w$}", c, w = w))
                .collect();
            join!(padded.join("  ").trim_end(), "\n")
        };

        let mut out = line([HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3]]);
        for row in &cells {
            out.push_str(&line([row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()]));
        }
        out
    }
}

/// `quantity × count` followed by the currency. The quantity is re-parsed
/// from the key; an unparseable one yields `NaN <currency>`.
pub fn format_total(key: &PriceKey, count: u32) -> String {
    let total = key.quantity() * f64::from(count);
    let num = fmt_quantity(total);
    let cur = key.currency();
    if cur.is_empty() { num } else { join!(num, " ", cur) }
}

pub fn render(table: &AggregationTable, limit: usize) -> Panel {
    let top = table.top_sellers(limit);

    let sellers = top
        .iter()
        .map(|t| SellerTotal { seller: t.seller.clone(), total: t.total })
        .collect();

    let rows = top
        .into_iter()
        .flat_map(|t| {
            let seller = t.seller;
            t.entries.into_iter().map(move |(key, entry)| PanelRow {
                seller: seller.clone(),
                total_label: format_total(&key, entry.count),
                count: entry.count,
                key,
                action: entry.action,
            })
        })
        .collect();

    Panel { sellers, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_multiply_and_keep_currency() {
        assert_eq!(format_total(&PriceKey::new(10.0, "chaos"), 3), "30 chaos");
        assert_eq!(format_total(&PriceKey::new(0.5, "divine orb"), 3), "1.5 divine orb");
        assert_eq!(format_total(&PriceKey::from_texts("x", "chaos"), 2), "NaN chaos");
    }

    #[test]
    fn empty_table_renders_empty_panel() {
        let p = render(&AggregationTable::default(), 10);
        assert!(p.is_empty());
        assert!(p.sellers.is_empty());
        assert!(p.to_text().starts_with("Account Name"));
    }
}
