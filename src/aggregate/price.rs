// src/aggregate/price.rs
use std::fmt;

use crate::core::sanitize::{leading_number, normalize_ws};

/// `"<quantity> <currency>"`, with the quantity in canonical numeric form so
/// `"10"`, `"10.0"` and `" 10 "` all land on the same key. The string stays
/// re-parseable: `quantity()` recovers the number exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PriceKey(String);

impl PriceKey {
    pub fn new(quantity: f64, currency: &str) -> Self {
        Self(format!("{} {}", fmt_quantity(quantity), normalize_ws(currency)))
    }

    /// Build from the raw texts shown on the page.
    pub fn from_texts(quantity: &str, currency: &str) -> Self {
        Self::new(parse_quantity(quantity), currency)
    }

    /// Wrap an already serialized key (e.g. from a rendered row).
    pub fn parse(key: &str) -> Self {
        match key.trim().split_once(' ') {
            Some((q, c)) => Self::from_texts(q, c),
            None => Self::from_texts(key, ""),
        }
    }

    pub fn as_str(&self) -> &str { &self.0 }

    /// Quantity recovered from the key; NaN when the listing had none.
    pub fn quantity(&self) -> f64 {
        let first = self.0.split(' ').next().unwrap_or("");
        leading_number(first)
    }

    /// Everything after the first space.
    pub fn currency(&self) -> &str {
        self.0.split_once(' ').map(|(_, c)| c).unwrap_or("")
    }
}

impl fmt::Display for PriceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn parse_quantity(text: &str) -> f64 {
    leading_number(&normalize_ws(text))
}

/// Shortest round-trip form; `-0` folds to `0` and infinities are spelled
/// out so `leading_number` reads them back.
pub fn fmt_quantity(q: f64) -> String {
    if q == 0.0 {
        s!("0")
    } else if q.is_infinite() {
        s!(if q > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        q.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incidental_formatting_normalizes() {
        let a = PriceKey::from_texts("10", "chaos");
        let b = PriceKey::from_texts(" 10.0 ", "  chaos ");
        let c = PriceKey::from_texts("10.00", "chaos");
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.as_str(), "10 chaos");
    }

    #[test]
    fn currency_keeps_all_words() {
        let k = PriceKey::from_texts("1.5", "Orb of  Alchemy");
        assert_eq!(k.as_str(), "1.5 Orb of Alchemy");
        assert_eq!(k.quantity(), 1.5);
        assert_eq!(k.currency(), "Orb of Alchemy");
    }

    #[test]
    fn quantity_round_trips_through_key() {
        for q in [0.1, 1.0 / 3.0, 12345.678, 1e-7] {
            assert_eq!(PriceKey::new(q, "x").quantity(), q);
        }
        assert_eq!(PriceKey::parse("10 chaos"), PriceKey::from_texts("10", "chaos"));
    }

    #[test]
    fn unparseable_quantity_is_nan_key() {
        let k = PriceKey::from_texts("??", "chaos");
        assert_eq!(k.as_str(), "NaN chaos");
    }

    #[test]
    fn infinite_quantity_survives_the_key() {
        let k = PriceKey::from_texts("Infinity", "chaos");
        assert_eq!(k.as_str(), "Infinity chaos");
        assert_eq!(k.quantity(), f64::INFINITY);
        assert!(PriceKey::from_texts("inf", "chaos").quantity().is_nan());
        assert!(k.quantity().is_nan());
    }
}
