// src/page/document.rs
//
// In-process stand-in for the live trade page: result containers whose
// children come and go. Every insertion allocates fresh node identities and
// reports the inserted nodes as one batch, the way a mutation observer
// would.

use std::{
    collections::HashMap,
    error::Error,
    fs,
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{
    aggregate::observer::NodeSource,
    config::consts::{LOGGED_IN_CLASS, RESULTSET_CLASS},
    core::html::{self, Fragment},
};

use super::node::{profile_name, Action, ActionHandle, ListingNode, NodeId, NodeRef, PageNode};

/// Whisper lines produced by triggered actions, oldest first.
pub type Outbox = Arc<Mutex<Vec<String>>>;

#[derive(Debug)]
struct Container {
    classes: Vec<String>,
    children: Vec<NodeRef>,
}

impl Container {
    fn is_result_set(&self) -> bool {
        self.classes.iter().any(|c| c == RESULTSET_CLASS)
    }
}

pub struct Document {
    containers: Vec<Container>,
    /// Strong side of every live action; dropping one makes its handles stale.
    actions: HashMap<NodeId, Arc<Action>>,
    own_account: Option<String>,
    next_id: u64,
    outbox: Outbox,
}

impl Default for Document {
    fn default() -> Self { Self::new() }
}

impl Document {
    pub fn new() -> Self {
        Self {
            containers: Vec::new(),
            actions: HashMap::new(),
            own_account: None,
            next_id: 1,
            outbox: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Parse a full saved page: the logged-in account from the header and
    /// the current rows of every result container.
    pub fn parse(page: &str) -> Self {
        let mut doc = Self::new();

        doc.own_account = html::find_with_class(page, "div", LOGGED_IN_CLASS)
            .or_else(|| html::find_with_class(page, "span", LOGGED_IN_CLASS))
            .and_then(profile_name);

        for block in html::find_all_with_class(page, "div", RESULTSET_CLASS) {
            let ix = doc.push_container(html::classes_of(block));
            let inner = html::inner_after_open_tag(block);
            doc.insert_fragments(ix, &inner);
        }

        logf!(
            "Page: parsed containers={}, nodes={}, account={:?}",
            doc.containers.len(),
            doc.node_count(),
            doc.own_account
        );
        doc
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read page {}: {}", path.display(), e))?;
        Ok(Self::parse(&text))
    }

    pub fn own_account(&self) -> Option<&str> { self.own_account.as_deref() }

    pub fn set_own_account(&mut self, account: Option<String>) { self.own_account = account; }

    pub fn outbox(&self) -> Outbox { Arc::clone(&self.outbox) }

    pub fn node_count(&self) -> usize {
        self.containers.iter().map(|c| c.children.len()).sum()
    }

    /// Add an empty container; returns its index.
    pub fn add_container(&mut self, classes: &[&str]) -> usize {
        self.push_container(classes.iter().map(|c| s!(*c)).collect())
    }

    fn push_container(&mut self, classes: Vec<String>) -> usize {
        self.containers.push(Container { classes, children: Vec::new() });
        self.containers.len() - 1
    }

    /// Append markup to the last result container (created on demand).
    /// Returns the newly added nodes as one batch.
    pub fn append_html(&mut self, fragment: &str) -> Vec<NodeRef> {
        let ix = match self.containers.iter().rposition(Container::is_result_set) {
            Some(ix) => ix,
            None => self.push_container(vec![s!(RESULTSET_CLASS)]),
        };
        self.insert_fragments(ix, fragment)
    }

    /// Append markup to a specific container. Unknown index → empty batch.
    pub fn append_to(&mut self, container: usize, fragment: &str) -> Vec<NodeRef> {
        if container >= self.containers.len() {
            loge!("Page: no container {}", container);
            return Vec::new();
        }
        self.insert_fragments(container, fragment)
    }

    fn insert_fragments(&mut self, container: usize, fragment: &str) -> Vec<NodeRef> {
        let classes = self.containers[container].classes.clone();
        let mut added = Vec::new();

        for frag in html::top_level_fragments(fragment) {
            let id = NodeId::new(self.next_id);
            self.next_id += 1;

            let node = match frag {
                Fragment::Text(t) => PageNode::text(id, Some(classes.clone()), t),
                Fragment::Element(m) => {
                    let node = PageNode::element(id, Some(classes.clone()), m);
                    match self.bind_whisper(&node) {
                        Some(handle) => node.with_action(handle),
                        None => node,
                    }
                }
            };
            added.push(Arc::new(node));
        }

        self.containers[container].children.extend(added.iter().cloned());
        added
    }

    /// Register the whisper action of a row that has a whisper button.
    fn bind_whisper(&mut self, node: &PageNode) -> Option<ActionHandle> {
        node.action()?;

        let line = join!(
            "@",
            &node.seller().unwrap_or_default(),
            " Hi, I would like to buy your item listed for ",
            &node.quantity_text().unwrap_or_default(),
            " ",
            &node.currency_text().unwrap_or_default(),
        );
        let outbox = Arc::clone(&self.outbox);
        let action: Arc<Action> = Arc::new(move || {
            let mut out = outbox.lock().unwrap_or_else(|p| p.into_inner());
            out.push(line.clone());
        });

        let handle = ActionHandle::new(&action);
        self.actions.insert(node.id(), action);
        Some(handle)
    }

    /// Detach a node. Its action handles go stale.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let mut found = false;
        for c in &mut self.containers {
            let before = c.children.len();
            c.children.retain(|n| n.id() != id);
            found |= c.children.len() != before;
        }
        self.actions.remove(&id);
        if found {
            logd!("Page: removed node {}", id);
        }
        found
    }


    /// Children of every result container, in document order.
    pub fn current_nodes(&self) -> Vec<NodeRef> {
        self.containers
            .iter()
            .filter(|c| c.is_result_set())
            .flat_map(|c| c.children.iter().cloned())
            .collect()
    }

    /// Drain whisper lines produced so far.
    pub fn take_whispers(&self) -> Vec<String> {
        let mut out = self.outbox.lock().unwrap_or_else(|p| p.into_inner());
        std::mem::take(&mut *out)
    }
}

impl NodeSource<NodeRef> for Arc<Mutex<Document>> {
    fn current_nodes(&self) -> Vec<NodeRef> {
        self.lock().unwrap_or_else(|p| p.into_inner()).current_nodes()
    }
}
