// tests/cli_run.rs
//
// One-shot run over a saved page plus a watch directory.

mod common;

use std::fs;
use std::path::PathBuf;

use common::{page, row, rows};
use trade_aggregator::{config::options::AppOptions, runner};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("trade_agg_cli_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

#[test]
fn page_and_fragments_aggregate_together() {
    let dir = tmp_dir("page_and_fragments");
    let page_path = dir.join("page.htm");
    fs::write(&page_path, page("Me", &[rows("A", "10", "chaos", 2), row("Me", "1", "chaos")].concat())).unwrap();

    let watch = dir.join("more");
    fs::create_dir_all(&watch).unwrap();
    fs::write(watch.join("01.html"), rows("B", "1", "divine", 3)).unwrap();
    fs::write(watch.join("02.html"), row("A", "10", "chaos")).unwrap();

    let mut opts = AppOptions::default();
    opts.page.path = Some(page_path);
    opts.page.watch_dir = Some(watch);

    let out = runner::aggregate_once(&opts).unwrap();
    assert_eq!(out.nodes, 7);
    assert_eq!(out.sellers, 2);
    assert_eq!(out.listings, 6);

    let text = out.panel.to_text();
    assert!(text.starts_with("Account Name"));
    assert!(text.contains("30 chaos"));
    assert!(text.contains("3 divine"));
    assert!(out.panel.rows.iter().all(|r| r.seller != "Me"));
}

#[test]
fn missing_page_is_an_error() {
    let mut opts = AppOptions::default();
    opts.page.path = Some(PathBuf::from("/definitely/not/here.html"));
    assert!(runner::aggregate_once(&opts).is_err());
}
