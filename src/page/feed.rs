// src/page/feed.rs
//
// Mutation source: watches a directory for result fragments. Each new file
// is appended to the document and reported as one batch. A watched file is
// only read once its length has held still for one poll interval, so a
// writer still flushing it is not cut off mid-row.

use std::{
    collections::{HashMap, HashSet},
    error::Error,
    fs,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
        Arc, Mutex,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::{aggregate::observer::Command, config::consts::FRAGMENT_EXT};

use super::{document::Document, node::NodeRef};

pub struct DirFeed {
    dir: PathBuf,
    ingested: HashSet<PathBuf>,
    /// Length seen at the previous poll, for files not yet ingested.
    last_len: HashMap<PathBuf, u64>,
    interval: Duration,
}

impl DirFeed {
    pub fn new(dir: impl Into<PathBuf>, poll_ms: u64) -> Self {
        Self {
            dir: dir.into(),
            ingested: HashSet::new(),
            last_len: HashMap::new(),
            interval: Duration::from_millis(poll_ms.max(1)),
        }
    }

    /// Fragment files not yet ingested, in file-name order.
    pub fn pending(&self) -> Result<Vec<PathBuf>, Box<dyn Error>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() { continue; }
            if path.extension().and_then(|s| s.to_str()) != Some(FRAGMENT_EXT) { continue; }
            if self.ingested.contains(&path) { continue; }
            out.push(path);
        }
        out.sort();
        Ok(out)
    }

    /// Non-empty and the same length as at the previous poll.
    fn settled(&mut self, path: &Path) -> bool {
        let Ok(len) = fs::metadata(path).map(|m| m.len()) else { return false };
        let prev = self.last_len.insert(path.to_path_buf(), len);
        len > 0 && prev == Some(len)
    }

    /// Append every settled pending file to `doc`; one batch per file.
    /// Files still growing, or unreadable, are retried on the next poll.
    pub fn poll(&mut self, doc: &Mutex<Document>) -> Result<Vec<Vec<NodeRef>>, Box<dyn Error>> {
        self.ingest(doc, true)
    }

    /// Append every pending file right away. For one-shot runs over a
    /// directory nobody is writing to.
    pub fn drain(&mut self, doc: &Mutex<Document>) -> Result<Vec<Vec<NodeRef>>, Box<dyn Error>> {
        self.ingest(doc, false)
    }

    fn ingest(&mut self, doc: &Mutex<Document>, wait: bool) -> Result<Vec<Vec<NodeRef>>, Box<dyn Error>> {
        let mut batches = Vec::new();
        for path in self.pending()? {
            if wait && !self.settled(&path) {
                continue;
            }
            let text = match fs::read_to_string(&path) {
                Ok(t) => t,
                Err(e) => {
                    loge!("Feed: cannot read {}: {}", path.display(), e);
                    continue;
                }
            };
            let batch = doc.lock().unwrap_or_else(|p| p.into_inner()).append_html(&text);
            logd!("Feed: {} → {} node(s)", path.display(), batch.len());
            self.last_len.remove(&path);
            self.ingested.insert(path);
            if !batch.is_empty() {
                batches.push(batch);
            }
        }
        Ok(batches)
    }

    /// Poll on a background thread until `stop` is set or the session is gone.
    pub fn spawn(
        mut self,
        doc: Arc<Mutex<Document>>,
        tx: Sender<Command<NodeRef>>,
        stop: Arc<AtomicBool>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            logf!("Feed: watching {}", self.dir.display());
            while !stop.load(Ordering::Relaxed) {
                match self.poll(&doc) {
                    Ok(batches) => {
                        for batch in batches {
                            if tx.send(Command::Batch(batch)).is_err() {
                                logd!("Feed: session closed, stopping");
                                return;
                            }
                        }
                    }
                    Err(e) => loge!("Feed: poll failed: {}", e),
                }
                thread::sleep(self.interval);
            }
            logf!("Feed: stopped");
        })
    }
}
