// src/runner.rs
//
// Startup wiring shared by the GUI and CLI frontends.

use std::{
    error::Error,
    sync::Mutex,
};

use crate::{
    aggregate::AggregationSession,
    config::options::AppOptions,
    page::{DirFeed, Document},
    render::Panel,
};

/// Page from `--page` (or an empty one), with the account override applied.
pub fn load_document(opts: &AppOptions) -> Result<Document, Box<dyn Error>> {
    let mut doc = match &opts.page.path {
        Some(path) => Document::load(path)?,
        None => Document::new(),
    };
    if let Some(me) = &opts.page.own_account {
        doc.set_own_account(Some(me.clone()));
    }
    Ok(doc)
}

pub fn new_session(opts: &AppOptions, doc: &Document) -> AggregationSession {
    AggregationSession::from_options(&opts.aggregate, doc.own_account().map(String::from))
}

pub struct Outcome {
    pub panel: Panel,
    pub nodes: usize,
    pub sellers: usize,
    pub listings: u32,
}

/// Initial scan plus a single pass over the watch directory.
pub fn aggregate_once(opts: &AppOptions) -> Result<Outcome, Box<dyn Error>> {
    let doc = load_document(opts)?;
    let mut session = new_session(opts, &doc);
    session.process_initial(&doc.current_nodes());

    let doc = Mutex::new(doc);
    if let Some(dir) = &opts.page.watch_dir {
        let mut feed = DirFeed::new(dir, opts.page.poll_ms);
        for batch in feed.drain(&doc)? {
            session.on_batch(&batch);
        }
    }

    let nodes = doc.lock().unwrap_or_else(|p| p.into_inner()).node_count();
    let table = session.table();
    let listings = table
        .top_sellers(usize::MAX)
        .iter()
        .map(|t| t.total)
        .sum();

    logf!("Run: nodes={}, sellers={}, listings={}", nodes, table.seller_count(), listings);

    Ok(Outcome {
        panel: session.render(),
        nodes,
        sellers: table.seller_count(),
        listings,
    })
}
