// src/aggregate/observer.rs
//
// Single consumer of the session's inbound queue. Commands are handled one
// at a time, in arrival order, each to completion before the next is
// received; the renderer is signalled at most once per command.

use std::{
    marker::PhantomData,
    sync::mpsc::{self, Receiver, Sender},
    thread::{self, JoinHandle},
};

use crate::{page::ListingNode, render::Panel};

use super::{price::PriceKey, session::AggregationSession};

#[derive(Debug)]
pub enum Command<N> {
    /// First synchronous scan of the page at attach time.
    Initial(Vec<N>),
    /// Nodes reported by one mutation notification.
    Batch(Vec<N>),
    ResetEntry { seller: String, key: PriceKey },
    ResetSeller(String),
    ResetAll,
    /// Clear everything and rescan the page as it is now.
    Refresh,
    Shutdown,
}

/// Where a refresh reads the page's current listing nodes from.
pub trait NodeSource<N>: Send {
    fn current_nodes(&self) -> Vec<N>;
}

/// Receives a fresh projection whenever the table changed.
pub trait RenderSink: Send {
    fn render(&mut self, panel: Panel);
}

impl<F: FnMut(Panel) + Send> RenderSink for F {
    fn render(&mut self, panel: Panel) { self(panel) }
}

pub struct ChangeObserver<N, S, R> {
    session: AggregationSession,
    source: S,
    sink: R,
    redraws: usize,
    _nodes: PhantomData<fn() -> N>,
}

impl<N, S, R> ChangeObserver<N, S, R>
where
    N: ListingNode,
    S: NodeSource<N>,
    R: RenderSink,
{
    pub fn new(session: AggregationSession, source: S, sink: R) -> Self {
        Self { session, source, sink, redraws: 0, _nodes: PhantomData }
    }

    /// Apply one command. Returns `false` once told to shut down.
    pub fn handle(&mut self, cmd: Command<N>) -> bool {
        match cmd {
            Command::Initial(nodes) => {
                self.session.process_initial(&nodes);
                self.redraw();
            }
            Command::Batch(nodes) => {
                if self.session.on_batch(&nodes) {
                    logd!("Observer: batch of {} changed the table", nodes.len());
                    self.redraw();
                }
            }
            Command::ResetEntry { seller, key } => {
                self.session.reset_entry(&seller, &key);
                self.redraw();
            }
            Command::ResetSeller(seller) => {
                self.session.reset_seller(&seller);
                self.redraw();
            }
            Command::ResetAll => {
                self.session.reset_all();
                self.redraw();
            }
            Command::Refresh => {
                let nodes = self.source.current_nodes();
                self.session.refresh(&nodes);
                self.redraw();
            }
            Command::Shutdown => return false,
        }
        true
    }

    fn redraw(&mut self) {
        self.redraws += 1;
        self.sink.render(self.session.render());
    }

    /// Number of times the sink has been signalled.
    pub fn redraws(&self) -> usize { self.redraws }

    pub fn session(&self) -> &AggregationSession { &self.session }

    /// Consume commands until `Shutdown` or every sender is gone.
    pub fn run(mut self, rx: Receiver<Command<N>>) -> AggregationSession {
        while let Ok(cmd) = rx.recv() {
            if !self.handle(cmd) {
                break;
            }
        }
        logf!("Observer: stopped after {} redraw(s)", self.redraws);
        self.session
    }
}

impl<N, S, R> ChangeObserver<N, S, R>
where
    N: ListingNode + Send + 'static,
    S: NodeSource<N> + 'static,
    R: RenderSink + 'static,
{
    /// Run the observer on its own thread.
    pub fn spawn(self) -> SessionHandle<N> {
        let (tx, rx) = mpsc::channel();
        let join = thread::spawn(move || self.run(rx));
        SessionHandle { tx, join }
    }
}

pub struct SessionHandle<N> {
    tx: Sender<Command<N>>,
    join: JoinHandle<AggregationSession>,
}

impl<N> SessionHandle<N> {
    pub fn sender(&self) -> Sender<Command<N>> { self.tx.clone() }

    /// Queue a command. `false` if the session thread is gone.
    pub fn send(&self, cmd: Command<N>) -> bool {
        self.tx.send(cmd).is_ok()
    }

    /// Stop the worker after everything queued so far; returns the final session.
    pub fn shutdown(self) -> Option<AggregationSession> {
        let _ = self.tx.send(Command::Shutdown);
        match self.join.join() {
            Ok(session) => Some(session),
            Err(_) => {
                loge!("Observer: session thread panicked");
                None
            }
        }
    }
}
