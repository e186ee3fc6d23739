// src/log.rs
//
// Append-only debug log under the store directory. Never fails the caller:
// a missing directory or a poisoned lock just drops the line.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use crate::config::consts::LOG_FILE;

static LOG_LOCK: Mutex<()> = Mutex::new(());
static START: OnceLock<Instant> = OnceLock::new();
static DIR_READY: OnceLock<bool> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Debug,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Error => "ERROR",
        })
    }
}

fn ensure_dir() -> bool {
    *DIR_READY.get_or_init(|| match Path::new(LOG_FILE).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir).is_ok(),
        _ => true,
    })
}

/// `hh:mm:ss.mmm` since the first log line.
fn stamp(ms: u128) -> String {
    let ms = ms as u64;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        ms / 3_600_000,
        ms / 60_000 % 60,
        ms / 1_000 % 60,
        ms % 1_000
    )
}

fn line(level: Level, msg: &str) -> String {
    let since = START.get_or_init(Instant::now).elapsed().as_millis();
    format!("[{}][{level}] {msg}\n", stamp(since))
}

pub fn write_log(level: Level, msg: &str) {
    let line = line(level, msg);
    if !ensure_dir() {
        return;
    }
    let Ok(_guard) = LOG_LOCK.lock() else { return };
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(LOG_FILE) {
        let _ = file.write_all(line.as_bytes());
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_at {
    ($level:ident, $($arg:tt)*) => {
        $crate::log::write_log($crate::log::Level::$level, &format!($($arg)*))
    };
}

/// Info-level logging
#[macro_export]
macro_rules! logf { ($($arg:tt)*) => { $crate::log_at!(Info, $($arg)*) }; }

/// Debug-level logging
#[macro_export]
macro_rules! logd { ($($arg:tt)*) => { $crate::log_at!(Debug, $($arg)*) }; }

/// Error-level logging
#[macro_export]
macro_rules! loge { ($($arg:tt)*) => { $crate::log_at!(Error, $($arg)*) }; }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_is_zero_padded() {
        assert_eq!(stamp(0), "00:00:00.000");
        assert_eq!(stamp(3_723_004), "01:02:03.004");
    }

    #[test]
    fn line_carries_level() {
        let l = line(Level::Error, "boom");
        assert!(l.ends_with("[ERROR] boom\n"));
    }
}
