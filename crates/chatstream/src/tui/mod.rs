//! Terminal UI for chatstream
//!
//! `App` owns the chat session; the streaming task only reports back through
//! a channel that is drained on every tick.

pub mod app;
pub mod components;
pub mod handlers;
pub mod input;
pub mod polling;
pub mod themes;
pub mod utils;

use std::sync::Arc;

use anyhow::Result;
use chatstream_core::ai::ChatTransport;
use chatstream_core::ChatConfig;

pub use app::App;

/// Take over the terminal and run the chat UI until the user quits
pub async fn run(config: &ChatConfig, transport: Arc<dyn ChatTransport>) -> Result<()> {
    let mut app = App::new(config, transport)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    result
}
