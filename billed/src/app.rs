use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use secrecy::SecretString;
use std::sync::Arc;

use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::commands::{executor, handlers, AppCommand};
use crate::config::Settings;
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::logging::init_logging_with_buffer;
use crate::session::Session;
use crate::state::{reducer, AppState, ReviewerExclusion};
use crate::ui::screens::Screen;
use billed_api::Client;

pub struct App {
    settings: Settings,
    session: Session,
    token: Option<SecretString>,
}

impl App {
    pub fn new(settings: Settings, session: Session, token: Option<SecretString>) -> Self {
        Self {
            settings,
            session,
            token,
        }
    }

    pub async fn run(&self) -> Result<()> {
        // Create log buffer before initializing logging
        let log_buffer = LogBuffer::new(self.settings.log_buffer_size);
        let log_path = init_logging_with_buffer(log_buffer.clone())?;

        tracing::info!(
            "billed starting as {:?} {}, logging to {}",
            self.session.user_type,
            self.session.email,
            log_path.display()
        );

        let mut terminal = self.init()?;

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();

        let exclusion =
            ReviewerExclusion::for_reviewer(&self.settings.test_accounts, &self.session.email);
        let mut ui_state = AppState::new(self.session.clone(), exclusion);
        let mut task_manager = BackgroundTaskManager::new();

        let store = Arc::new(Client::new(&self.settings.api_url, self.token.as_ref()));
        let data_loader = DataLoader::new(store, data_tx);

        let mut event_stream = EventStream::new();

        // The landing screen shows bills
        executor::execute_command(
            AppCommand::LoadBills,
            &mut ui_state,
            &mut task_manager,
            &data_loader,
        );

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));
        loop {
            // Update total_entries for logs screen if active
            if let Screen::Logs(logs_state) = ui_state.current_screen_mut() {
                logs_state.total_entries = log_buffer.len();
            }

            terminal.draw(|f| {
                crate::ui::render_app(f, &ui_state, &log_buffer);
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    if let Some(throbber_state) = ui_state.loading_state() {
                        throbber_state.calc_next();
                    }
                }
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if matches!(key.kind, KeyEventKind::Press) {
                            // Don't log when on logs screen to avoid feedback loop
                            let on_logs_screen = matches!(ui_state.current_screen(), Screen::Logs(_));
                            if !on_logs_screen {
                                tracing::debug!("Key press: {:?}", key);
                            }
                            if let Some(command) = handlers::handle_key_input(KeyEvent::from(key), &ui_state) {
                                if !on_logs_screen {
                                    tracing::info!("Executing command: {:?}", command);
                                }
                                executor::execute_command(
                                    command,
                                    &mut ui_state,
                                    &mut task_manager,
                                    &data_loader,
                                );
                            }
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    if let Some(command) = reducer::reduce_data_event(&mut ui_state, data_event) {
                        executor::execute_command(
                            command,
                            &mut ui_state,
                            &mut task_manager,
                            &data_loader,
                        );
                    }
                }
            }

            if ui_state.should_quit {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");

        // Abort loads still running; issued mutations are dropped with the runtime
        task_manager.cancel_all();

        self.exit(terminal)?;

        Ok(())
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
