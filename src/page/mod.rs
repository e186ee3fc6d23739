// src/page/mod.rs
//
// The host page: nodes, the document holding them, and the feed that
// mutates it.

pub mod document;
pub mod feed;
pub mod node;

pub use document::{Document, Outbox};
pub use feed::DirFeed;
pub use node::{ActionHandle, ListingNode, NodeId, NodeRef, PageNode};
