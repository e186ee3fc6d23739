// src/page/node.rs
//
// Listing nodes as the aggregator sees them: an opaque identity plus a
// handful of read-only lookups. `PageNode` answers those lookups from the
// row's markup.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::config::consts::*;
use crate::core::html::{self, child_blocks, find_block, find_with_class, has_class, text_of};

/// Identity of a node inside one document. Allocated on insertion, never
/// derived from content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(raw: u64) -> Self { Self(raw) }
    pub fn raw(&self) -> u64 { self.0 }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub type Action = dyn Fn() + Send + Sync;

/// Capability to trigger a listing's seller action. Holds only a weak
/// reference: once the owning node leaves the page, `invoke` does nothing.
#[derive(Clone, Default)]
pub struct ActionHandle {
    target: Option<Weak<Action>>,
}

impl ActionHandle {
    pub fn new(live: &Arc<Action>) -> Self {
        Self { target: Some(Arc::downgrade(live)) }
    }

    /// A handle that was never bound to anything.
    pub fn detached() -> Self { Self::default() }

    pub fn is_live(&self) -> bool {
        self.target.as_ref().is_some_and(|w| w.strong_count() > 0)
    }

    /// Runs the action if its node is still alive. Returns whether it ran.
    pub fn invoke(&self) -> bool {
        match self.target.as_ref().and_then(Weak::upgrade) {
            Some(action) => {
                (*action)();
                true
            }
            None => {
                logd!("Action: stale handle ignored");
                false
            }
        }
    }

    /// Same underlying action as `other`.
    pub fn same_target(&self, other: &ActionHandle) -> bool {
        match (&self.target, &other.target) {
            (Some(a), Some(b)) => Weak::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for ActionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionHandle").field("live", &self.is_live()).finish()
    }
}

/// What the aggregator needs to ask of a candidate node.
pub trait ListingNode {
    fn id(&self) -> NodeId;
    fn is_element(&self) -> bool;
    /// Parent container is a listing result set.
    fn in_result_set(&self) -> bool;
    /// The row failed to resolve (e.g. price lookup error).
    fn has_error(&self) -> bool;
    fn seller(&self) -> Option<String>;
    fn action(&self) -> Option<ActionHandle>;
    fn quantity_text(&self) -> Option<String>;
    fn currency_text(&self) -> Option<String>;
}

impl<T: ListingNode + ?Sized> ListingNode for Arc<T> {
    fn id(&self) -> NodeId { (**self).id() }
    fn is_element(&self) -> bool { (**self).is_element() }
    fn in_result_set(&self) -> bool { (**self).in_result_set() }
    fn has_error(&self) -> bool { (**self).has_error() }
    fn seller(&self) -> Option<String> { (**self).seller() }
    fn action(&self) -> Option<ActionHandle> { (**self).action() }
    fn quantity_text(&self) -> Option<String> { (**self).quantity_text() }
    fn currency_text(&self) -> Option<String> { (**self).currency_text() }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element(String),
    Text(String),
}

/// One child of a result container.
#[derive(Clone, Debug)]
pub struct PageNode {
    id: NodeId,
    kind: NodeKind,
    /// Classes of the parent container; `None` when detached.
    parent_classes: Option<Vec<String>>,
    action: ActionHandle,
}

pub type NodeRef = Arc<PageNode>;

impl PageNode {
    pub fn element(id: NodeId, parent_classes: Option<Vec<String>>, markup: impl Into<String>) -> Self {
        Self {
            id,
            kind: NodeKind::Element(markup.into()),
            parent_classes,
            action: ActionHandle::detached(),
        }
    }

    pub fn text(id: NodeId, parent_classes: Option<Vec<String>>, text: impl Into<String>) -> Self {
        Self {
            id,
            kind: NodeKind::Text(text.into()),
            parent_classes,
            action: ActionHandle::detached(),
        }
    }

    pub fn with_action(mut self, action: ActionHandle) -> Self {
        self.action = action;
        self
    }

    pub fn kind(&self) -> &NodeKind { &self.kind }

    pub fn markup(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(m) => Some(m),
            NodeKind::Text(_) => None,
        }
    }

    /// Direct child spans of `span[data-field="price"]`.
    fn price_parts(&self) -> Vec<&str> {
        let Some(m) = self.markup() else { return Vec::new() };
        find_block(m, "span", |b| {
            html::attr_value(html::opener(b), "data-field").as_deref() == Some(PRICE_FIELD)
        })
        .map(|field| child_blocks(field, "span"))
        .unwrap_or_default()
    }

    fn price_part(&self, ix: usize) -> Option<String> {
        self.price_parts()
            .get(ix)
            .map(|b| text_of(b))
            .filter(|t| !t.is_empty())
    }

    fn has_whisper_button(&self) -> bool {
        self.markup()
            .and_then(|m| find_with_class(m, "button", WHISPER_BUTTON_CLASS))
            .is_some()
    }
}

/// Text of the first `<a>` inside `span.profile-link`.
pub fn profile_name(markup: &str) -> Option<String> {
    let link = find_with_class(markup, "span", PROFILE_LINK_CLASS)?;
    let (a_s, a_e) = html::next_balanced_block_ci(link, "a", 0)?;
    let name = text_of(&link[a_s..a_e]);
    (!name.is_empty()).then_some(name)
}

impl ListingNode for PageNode {
    fn id(&self) -> NodeId { self.id }

    fn is_element(&self) -> bool { matches!(self.kind, NodeKind::Element(_)) }

    /// Only a parent without the result-set class rules a node out; a
    /// node with no parent at all passes.
    fn in_result_set(&self) -> bool {
        self.parent_classes
            .as_ref()
            .is_none_or(|cs| cs.iter().any(|c| c == RESULTSET_CLASS))
    }

    fn has_error(&self) -> bool {
        self.markup()
            .is_some_and(|m| find_block(m, "span", |b| has_class(b, ERROR_CLASS)).is_some())
    }

    fn seller(&self) -> Option<String> {
        self.markup().and_then(profile_name)
    }

    fn action(&self) -> Option<ActionHandle> {
        self.has_whisper_button().then(|| self.action.clone())
    }

    fn quantity_text(&self) -> Option<String> {
        self.price_part(PRICE_QUANTITY_CHILD)
    }

    fn currency_text(&self) -> Option<String> {
        self.price_part(PRICE_CURRENCY_CHILD)
    }
}
