// src/gui/app.rs
use std::{
    error::Error,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    thread::JoinHandle,
};

use eframe::egui;

use crate::{
    aggregate::{ChangeObserver, Command, SessionHandle},
    config::{options::AppOptions, state::AppState},
    page::{DirFeed, Document, NodeRef},
    render::Panel,
    runner,
    visibility::{FileFlagStore, VisibilityController},
};

pub fn run(native: eframe::NativeOptions, options: AppOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Trade Aggregator",
        native,
        Box::new(move |cc: &eframe::CreationContext<'_>| -> Result<Box<dyn eframe::App>, Box<dyn Error + Send + Sync>> {
            let app = App::new(options, cc.egui_ctx.clone()).map_err(|e| e.to_string())?;
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}

pub struct App {
    pub state: AppState,

    // live page; the feed appends, refresh and whispers read
    pub doc: Arc<Mutex<Document>>,

    // latest projection (session thread writes, UI thread reads)
    pub panel: Arc<Mutex<Panel>>,

    pub status: Arc<Mutex<String>>,
    pub visibility: VisibilityController<FileFlagStore>,

    session: Option<SessionHandle<NodeRef>>,
    feed: Option<(Arc<AtomicBool>, JoinHandle<()>)>,
}

impl App {
    pub fn new(options: AppOptions, ctx: egui::Context) -> Result<Self, Box<dyn Error>> {
        let doc = runner::load_document(&options)?;
        let session = runner::new_session(&options, &doc);
        let initial = doc.current_nodes();
        let doc = Arc::new(Mutex::new(doc));

        let panel = Arc::new(Mutex::new(Panel::default()));
        let status = Arc::new(Mutex::new(s!("Loading…")));

        let sink = {
            let panel = Arc::clone(&panel);
            let status = Arc::clone(&status);
            move |p: Panel| {
                let msg = format!("{} seller(s), {} row(s)", p.sellers.len(), p.rows.len());
                *panel.lock().unwrap_or_else(|e| e.into_inner()) = p;
                *status.lock().unwrap_or_else(|e| e.into_inner()) = msg;
                ctx.request_repaint();
            }
        };

        let handle = ChangeObserver::new(session, Arc::clone(&doc), sink).spawn();
        handle.send(Command::Initial(initial));

        let feed = options.page.watch_dir.as_ref().map(|dir| {
            let stop = Arc::new(AtomicBool::new(false));
            let join = DirFeed::new(dir, options.page.poll_ms)
                .spawn(Arc::clone(&doc), handle.sender(), Arc::clone(&stop));
            (stop, join)
        });

        let mut visibility = VisibilityController::new(FileFlagStore::default());
        let mut state = AppState { options, ..AppState::default() };
        visibility.restore_state();
        state.gui.visible = visibility.is_shown();

        logf!(
            "Init: page={:?}, watch={:?}, top={}, visible={}",
            state.options.page.path,
            state.options.page.watch_dir,
            state.options.aggregate.top_n,
            state.gui.visible
        );

        Ok(Self {
            state,
            doc,
            panel,
            status,
            visibility,
            session: Some(handle),
            feed,
        })
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = msg.into();
    }

    pub fn status_text(&self) -> String {
        self.status.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn panel_snapshot(&self) -> Panel {
        self.panel.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Queue a command for the session thread.
    pub fn send(&self, cmd: Command<NodeRef>) {
        let sent = self.session.as_ref().is_some_and(|h| h.send(cmd));
        if !sent {
            loge!("UI: session is not running");
            self.status("Aggregator stopped");
        }
    }

    pub fn hide(&mut self) {
        self.visibility.hide();
        self.state.gui.visible = false;
        logf!("UI: hidden");
    }

    pub fn show(&mut self) {
        self.visibility.show();
        self.state.gui.visible = true;
        logf!("UI: shown");
    }

    /// Drain whisper lines produced by the last action.
    pub fn take_whispers(&self) -> Vec<String> {
        self.doc.lock().unwrap_or_else(|e| e.into_inner()).take_whispers()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some((stop, join)) = self.feed.take() {
            stop.store(true, Ordering::Relaxed);
            let _ = join.join();
        }
        if let Some(handle) = self.session.take() {
            let _ = handle.shutdown();
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        eframe::egui::CentralPanel::default().show(ctx, |ui| {
            if !self.state.gui.visible {
                crate::gui::components::controls::draw_show(ui, self);
                return;
            }

            crate::gui::components::controls::draw(ui, self);

            ui.separator();

            crate::gui::components::listing_table::draw(ui, self);

            ui.separator();

            ui.label(format!("Status: {}", self.status_text()));
        });
    }
}
