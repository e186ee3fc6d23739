// src/aggregate/seen.rs
use std::collections::HashSet;

use crate::page::NodeId;

/// Node identities already folded into the table.
#[derive(Clone, Debug, Default)]
pub struct SeenSet {
    ids: HashSet<NodeId>,
}

impl SeenSet {
    pub fn new() -> Self { Self::default() }

    pub fn has_seen(&self, id: NodeId) -> bool { self.ids.contains(&id) }

    /// Returns `false` if the id was already present.
    pub fn mark_seen(&mut self, id: NodeId) -> bool { self.ids.insert(id) }

    pub fn clear(&mut self) { self.ids.clear(); }

    pub fn len(&self) -> usize { self.ids.len() }
    pub fn is_empty(&self) -> bool { self.ids.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_once_until_cleared() {
        let mut seen = SeenSet::new();
        let a = NodeId::new(1);
        assert!(!seen.has_seen(a));
        assert!(seen.mark_seen(a));
        assert!(seen.has_seen(a));
        assert!(!seen.mark_seen(a));
        assert!(!seen.has_seen(NodeId::new(2)));

        seen.clear();
        assert!(!seen.has_seen(a));
        assert!(seen.is_empty());
    }
}
