// src/cli.rs
use std::{error::Error, path::PathBuf};

use crate::{
    config::options::{AppOptions, HandlePolicy},
    runner,
};

pub const HELP: &str = include_str!("cli_help.txt");

pub enum CliAction {
    Run(AppOptions),
    Help,
}

pub fn parse_args<I>(args: I) -> Result<CliAction, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = AppOptions::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--page" => {
                opts.page.path = Some(PathBuf::from(args.next().ok_or("Missing page file")?));
            }
            "--watch" => {
                opts.page.watch_dir = Some(PathBuf::from(args.next().ok_or("Missing watch directory")?));
            }
            "--top" => {
                let v: usize = args.next().ok_or("Missing value for --top")?.parse()?;
                if v == 0 { return Err("--top must be at least 1".into()); }
                opts.aggregate.top_n = v;
            }
            "--me" => {
                opts.page.own_account = Some(args.next().ok_or("Missing account name")?);
            }
            "--keep-first-handle" => opts.aggregate.handle_policy = HandlePolicy::FirstSeen,
            "--poll-ms" => {
                opts.page.poll_ms = args.next().ok_or("Missing value for --poll-ms")?.parse()?;
            }
            "-h" | "--help" => return Ok(CliAction::Help),
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }
    Ok(CliAction::Run(opts))
}

/// One-shot aggregation: scan the page, ingest the watch directory once,
/// print the summary table.
pub fn run(opts: &AppOptions) -> Result<(), Box<dyn Error>> {
    let outcome = runner::aggregate_once(opts)?;
    print!("{}", outcome.panel.to_text());
    println!(
        "{} seller(s), {} listing(s) counted from {} node(s)",
        outcome.sellers, outcome.listings, outcome.nodes
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> { v.iter().map(|s| s!(*s)).collect() }

    #[test]
    fn parses_all_flags() {
        let CliAction::Run(o) = parse_args(args(&[
            "--page", "p.html", "--watch", "in", "--top", "5", "--me", "Bob", "--keep-first-handle",
        ])).unwrap() else { panic!("expected run") };
        assert_eq!(o.page.path, Some(PathBuf::from("p.html")));
        assert_eq!(o.page.watch_dir, Some(PathBuf::from("in")));
        assert_eq!(o.aggregate.top_n, 5);
        assert_eq!(o.page.own_account.as_deref(), Some("Bob"));
        assert_eq!(o.aggregate.handle_policy, HandlePolicy::FirstSeen);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(args(&["--top", "0"])).is_err());
        assert!(parse_args(args(&["--page"])).is_err());
        assert!(parse_args(args(&["--nope"])).is_err());
        assert!(matches!(parse_args(args(&["-h"])).unwrap(), CliAction::Help));
    }
}
