use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use client_logging::client_info;
use docqa_core::{update, AppState, AppViewModel, Msg};
use docqa_engine::{DocumentApi, FileCredentialStore, Gateway, HttpDocumentApi, SessionContext};

use super::ui;
use super::{AppConfig, EffectRunner};

/// How long the loop waits for a message before checking for shutdown.
const TICK: Duration = Duration::from_millis(75);

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let session = SessionContext::new(Arc::new(FileCredentialStore::new(
        &config.credentials_path,
    )));
    let gateway = Gateway::new(config.gateway_settings(), session.clone())?;
    let api = Arc::new(HttpDocumentApi::new(gateway));
    client_info!("Backend at {}", config.api_base);

    let state = AppState::new().with_media_base(config.media_base.clone());
    let mut app = App::new(state, api, session);

    let quit = Arc::new(AtomicBool::new(false));
    ui::commands::spawn_stdin_reader(app.sender(), quit.clone());

    print_view(app.dispatch(Msg::Navigate(config.start_path.clone())));
    while !quit.load(Ordering::Relaxed) {
        print_view(app.pump(TICK));
    }
    client_info!("Shutting down");
    Ok(())
}

fn print_view(view: Option<AppViewModel>) {
    if let Some(view) = view {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", ui::render::render(&view));
        let _ = stdout.flush();
    }
}

/// Single-threaded message loop around the pure state machine.
pub struct App {
    state: AppState,
    runner: EffectRunner,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
}

impl App {
    pub fn new(state: AppState, api: Arc<dyn DocumentApi>, session: SessionContext) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::new(api, session, msg_tx.clone());
        Self {
            state,
            runner,
            msg_tx,
            msg_rx,
        }
    }

    pub fn sender(&self) -> mpsc::Sender<Msg> {
        self.msg_tx.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies one message and runs its effects. Returns a fresh view when
    /// the state changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        was_dirty.then_some(view)
    }

    /// Waits up to `timeout` for a message, then drains everything queued.
    /// Returns the latest view if any message changed the state.
    pub fn pump(&mut self, timeout: Duration) -> Option<AppViewModel> {
        let first = self.msg_rx.recv_timeout(timeout).ok()?;
        let mut latest = self.dispatch(first);
        while let Ok(msg) = self.msg_rx.try_recv() {
            if let Some(view) = self.dispatch(msg) {
                latest = Some(view);
            }
        }
        latest
    }
}
