// tests/session_thread.rs
//
// The session worker: ordered command handling and one redraw per
// effective change.

mod common;

use std::sync::{mpsc, Arc, Mutex};

use common::{page, row, rows};
use trade_aggregator::{
    aggregate::{AggregationSession, ChangeObserver, Command, PriceKey},
    page::{Document, NodeRef},
    render::Panel,
};

#[test]
fn redraws_only_when_a_batch_changes_something() {
    let mut doc = Document::new();
    let good = doc.append_html(&rows("A", "1", "chaos", 3));
    let doc = Arc::new(Mutex::new(doc));

    let mut frames = 0usize;
    let mut obs = ChangeObserver::new(AggregationSession::default(), Arc::clone(&doc), |_p: Panel| frames += 1);

    assert!(obs.handle(Command::Batch(good.clone())));
    assert_eq!(obs.redraws(), 1);

    // re-delivery: nothing new, no redraw
    obs.handle(Command::Batch(good));
    assert_eq!(obs.redraws(), 1);

    obs.handle(Command::Batch(Vec::new()));
    assert_eq!(obs.redraws(), 1);

    obs.handle(Command::ResetAll);
    assert_eq!(obs.redraws(), 2);
    assert!(!obs.handle(Command::Shutdown));
    drop(obs);
    assert_eq!(frames, 2);
}

#[test]
fn spawned_session_processes_in_order() {
    let doc = Document::parse(&page("Me", &rows("A", "2", "chaos", 2)));
    let initial = doc.current_nodes();
    let doc = Arc::new(Mutex::new(doc));

    let (tx, rx) = mpsc::channel::<Panel>();
    let handle = ChangeObserver::new(
        AggregationSession::new(Some("Me".into()), Default::default(), 10),
        Arc::clone(&doc),
        move |p: Panel| { let _ = tx.send(p); },
    )
    .spawn();

    handle.send(Command::Initial(initial));
    let later: Vec<NodeRef> = doc.lock().unwrap().append_html(&row("B", "1", "divine"));
    handle.send(Command::Batch(later));
    handle.send(Command::ResetEntry { seller: "A".into(), key: PriceKey::from_texts("2", "chaos") });
    handle.send(Command::Refresh);

    let session = handle.shutdown().expect("session thread");

    let frames: Vec<Panel> = rx.iter().collect();
    assert_eq!(frames.len(), 4);
    assert_eq!(frames[0].sellers.len(), 1);
    assert_eq!(frames[1].sellers.len(), 2);
    assert!(frames[2].rows.iter().all(|r| r.seller != "A"));
    // refresh rescans the whole page, "A" comes back
    assert_eq!(session.table().total_for("A"), 2);
    assert_eq!(session.table().total_for("B"), 1);
}
