// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Overlay shown (true) or collapsed to the "Show" button.
    pub visible: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 640,
            window_h: 420,
            visible: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
