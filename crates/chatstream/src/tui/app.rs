//! Application state and event loop

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chatstream_core::ai::ChatTransport;
use chatstream_core::chat::{stream_reply, ChatSession, RequestOutcome, StreamUpdate};
use chatstream_core::ChatConfig;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::tui::components::{Toast, ToastQueue};
use crate::tui::input::InputEditor;
use crate::tui::polling::poll_stream_updates;
use crate::tui::themes::Theme;

const TICK_RATE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Chat,
}

pub struct App {
    pub view: View,
    pub session: ChatSession,
    pub input: InputEditor,
    pub toasts: ToastQueue,
    pub theme: Theme,
    /// Lines scrolled up from the bottom of the conversation
    pub scroll_offset: u16,
    /// Spinner frame counter
    pub tick: usize,
    pub endpoint: String,
    pub should_quit: bool,
    transport: Arc<dyn ChatTransport>,
    idle_timeout: Option<Duration>,
    stream_rx: Option<mpsc::UnboundedReceiver<StreamUpdate>>,
    stream_task: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(config: &ChatConfig, transport: Arc<dyn ChatTransport>) -> Result<Self> {
        Ok(Self {
            view: View::Landing,
            session: ChatSession::new(),
            input: InputEditor::new(),
            toasts: ToastQueue::default(),
            theme: Theme::default(),
            scroll_offset: 0,
            tick: 0,
            endpoint: config.chat_endpoint()?,
            should_quit: false,
            transport,
            idle_timeout: config.idle_timeout(),
            stream_rx: None,
            stream_task: None,
        })
    }

    /// Run until the user quits
    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(TICK_RATE);
        let mut needs_redraw = true;

        while !self.should_quit {
            if needs_redraw {
                terminal.draw(|f| self.ui(f))?;
                needs_redraw = false;
            }

            tokio::select! {
                _ = ticker.tick() => needs_redraw = self.on_tick(),
                event = events.next() => match event {
                    Some(Ok(event)) => {
                        self.handle_event(event);
                        needs_redraw = true;
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
            }
        }

        tracing::info!("Exiting chat UI");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            // Resize and focus changes just need the redraw at the top of the loop
            _ => {}
        }
    }

    /// Advance animations and drain stream updates. Returns true if the
    /// screen changed.
    pub fn on_tick(&mut self) -> bool {
        let animating = self.session.is_busy();
        if animating {
            self.tick = self.tick.wrapping_add(1);
        }
        let pruned = self.toasts.prune();
        let polled = self.poll_stream();
        animating || pruned || polled
    }

    /// Apply whatever the streaming task has reported so far
    pub fn poll_stream(&mut self) -> bool {
        let result = poll_stream_updates(&mut self.stream_rx, &mut self.session);

        match result.outcome {
            Some(RequestOutcome::Failed) => {
                self.toasts.push(Toast::error("Could not reach the chat server"));
            }
            Some(RequestOutcome::Cancelled) => {
                self.toasts.push(Toast::info("Request cancelled"));
            }
            Some(RequestOutcome::Completed) | None => {}
        }

        if result.outcome.is_some() {
            self.stream_task = None;
        }
        result.needs_redraw
    }

    /// Send the input text, if the session accepts it
    pub fn submit_input(&mut self, text: &str) {
        let Some(request) = self.session.begin(text) else {
            return;
        };
        self.input.take();
        self.scroll_offset = 0;

        let (tx, rx) = mpsc::unbounded_channel();
        self.stream_rx = Some(rx);

        let transport = Arc::clone(&self.transport);
        let idle_timeout = self.idle_timeout;
        self.stream_task = Some(tokio::spawn(async move {
            stream_reply(transport.as_ref(), request, idle_timeout, move |update| {
                let _ = tx.send(update);
            })
            .await;
        }));
    }

    /// Cancel the reply in flight. Returns false when idle.
    pub fn cancel_request(&mut self) -> bool {
        self.session.cancel()
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Teardown must not leave a stream running
        self.session.cancel();
        if let Some(task) = self.stream_task.take() {
            task.abort();
        }
    }
}

/// Backend that accepts every request and then never sends a byte
#[cfg(test)]
#[derive(Default)]
pub(crate) struct StalledTransport {
    live: Arc<()>,
}

#[cfg(test)]
impl StalledTransport {
    /// Reply bodies handed out and not yet dropped
    pub(crate) fn open_streams(&self) -> usize {
        Arc::strong_count(&self.live) - 1
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl ChatTransport for StalledTransport {
    async fn send(
        &self,
        _message: &str,
    ) -> chatstream_core::ChatResult<chatstream_core::ai::ByteStream> {
        let live = Arc::clone(&self.live);
        let body = futures::stream::pending::<chatstream_core::ChatResult<bytes::Bytes>>().map(
            move |chunk| {
                let _held = &live;
                chunk
            },
        );
        Ok(Box::pin(body))
    }
}

#[cfg(test)]
pub(crate) fn test_app() -> App {
    App::new(&ChatConfig::default(), Arc::new(StalledTransport::default())).unwrap()
}
