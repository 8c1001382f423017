use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_core::{AppCore, DataEventHandler};
use crate::background::{api::FinanceApi, data_loader::DataLoader, BackgroundTaskManager};
use crate::commands::executor;
use crate::config::Settings;
use crate::events::AppCommand;
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::state::AppState;
use crate::ui::screens::Screen;
use finboard_api::Client;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Production command handler: state transitions plus real background requests
pub struct TaskHandler<A: FinanceApi> {
    task_manager: BackgroundTaskManager,
    data_loader: DataLoader<A>,
}

impl<A: FinanceApi> TaskHandler<A> {
    pub fn new(data_loader: DataLoader<A>) -> Self {
        Self {
            task_manager: BackgroundTaskManager::new(),
            data_loader,
        }
    }
}

impl<A: FinanceApi> DataEventHandler for TaskHandler<A> {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        executor::execute_command(command, state, &mut self.task_manager, &self.data_loader);
    }
}

pub struct App {
    settings: Settings,
    log_buffer: LogBuffer,
}

impl App {
    pub fn new(settings: Settings, log_buffer: LogBuffer) -> Self {
        Self {
            settings,
            log_buffer,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();
        let api_client = Arc::new(Client::new(&self.settings.base_url));
        tracing::info!("finboard starting against {}", api_client.base_url());
        let data_loader = DataLoader::new(api_client, data_tx);

        let mut core = AppCore::with_settings(TaskHandler::new(data_loader), &self.settings);

        let mut terminal = self.init()?;
        let mut event_stream = EventStream::new();

        core.start();

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(TICK_RATE);
        let result = loop {
            if let Screen::Logs(logs_state) = core.state_mut().current_screen_mut() {
                logs_state.total_entries = self.log_buffer.len();
            }

            if let Err(e) = terminal.draw(|f| {
                crate::ui::render_app(f, core.state(), &self.log_buffer);
            }) {
                break Err(e.into());
            }

            tokio::select! {
                _ = interval.tick() => {
                    core.tick(Instant::now());
                }
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if matches!(key.kind, KeyEventKind::Press) {
                            // Don't log when on logs screen to avoid feedback loop
                            if !matches!(core.state().current_screen(), Screen::Logs(_)) {
                                tracing::debug!("Key press: {:?}", key);
                            }
                            core.handle_key(KeyEvent::from(key));
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    core.handle_data_event(data_event);
                }
            }

            if core.should_quit() {
                tracing::info!("Quit requested, exiting event loop");
                break Ok(());
            }
        };

        tracing::info!("Cleaning up application");

        // Cancel all background requests before leaving the terminal
        let task_manager = &mut core.handler_mut().task_manager;
        tracing::debug!("Cancelling {} background tasks", task_manager.running());
        task_manager.cancel_all();

        self.exit(terminal)?;

        result
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}
