//! Terminal application loop around an [`AnimatedRoutes`] area.

use std::io::{self, stdout};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use snafu::ResultExt;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::animated::AnimatedRoutes;
use crate::component::{Action, BoxedView, Event};
use crate::config::AppConfig;
use crate::error::TerminalSnafu;
use crate::router::{Navigator, RouteTable};

/// Main application handle.
pub struct Application {
    config: AppConfig,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run until a view returns [`Action::Quit`].
    pub fn run(self, table: RouteTable<BoxedView>) -> anyhow::Result<()> {
        let rt = Runtime::new().map_err(|e| anyhow::anyhow!("Failed to start tokio: {}", e))?;
        rt.block_on(async move { self.run_loop(table).await })
    }

    async fn run_loop(&self, table: RouteTable<BoxedView>) -> anyhow::Result<()> {
        enable_raw_mode().context(TerminalSnafu)?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, event::EnableFocusChange)
            .context(TerminalSnafu)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context(TerminalSnafu)?;

        let result = self.run_app_loop(&mut terminal, table).await;

        disable_raw_mode().context(TerminalSnafu)?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            event::DisableFocusChange
        )
        .context(TerminalSnafu)?;
        terminal.show_cursor().context(TerminalSnafu)?;

        result
    }

    async fn run_app_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        table: RouteTable<BoxedView>,
    ) -> anyhow::Result<()> {
        let mut navigator = Navigator::new(self.config.initial_path.as_str());
        let mut routes = AnimatedRoutes::new(table, navigator.subscribe(), self.config.transition.clone());
        let mut failure = report(routes.start());

        let mut input = spawn_input_reader();
        let mut frames = tokio::time::interval(self.config.frame_interval);
        frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut dirty = true;
        loop {
            if dirty {
                terminal.draw(|frame| {
                    let area = frame.area();
                    match (&failure, routes.has_view()) {
                        (Some(message), false) => render_failure(frame, area, message),
                        _ => routes.render(frame, area),
                    }
                })?;
                dirty = false;
            }

            tokio::select! {
                signal = routes.next_signal() => {
                    let Some(signal) = signal else {
                        return Err(crate::Error::ChannelClosed.into());
                    };
                    failure = report(routes.handle(signal)).or(failure.filter(|_| !routes.has_view()));
                    dirty = true;
                }
                event = input.recv() => {
                    let Some(event) = event else {
                        anyhow::bail!("Terminal input closed");
                    };
                    let Some(event) = Event::from_crossterm(event?) else { continue };
                    let action = if routes.has_view() {
                        routes.handle_event(event)
                    } else {
                        failure_action(&event)
                    };
                    if let Some(action) = action {
                        match action {
                            Action::Navigate(path) => {
                                navigator.navigate(path);
                            }
                            Action::Back => {
                                navigator.go_back();
                            }
                            Action::Quit => {
                                routes.shutdown();
                                return Ok(());
                            }
                            Action::Noop => {}
                        }
                    }
                    dirty = true;
                }
                _ = frames.tick(), if routes.is_animating() => {
                    dirty = true;
                }
            }
        }
    }
}

/// Log a routing error and turn it into a message for the failure screen.
fn report(result: crate::Result<()>) -> Option<String> {
    match result {
        Ok(()) => None,
        Err(e) => {
            tracing::error!(error = %e, "routing failed");
            Some(e.to_string())
        }
    }
}

/// Keys that still work while nothing is mounted.
fn failure_action(event: &Event) -> Option<Action> {
    use crossterm::event::KeyCode;

    match event {
        Event::Key(key) => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
            _ => None,
        },
        _ => None,
    }
}

fn render_failure(frame: &mut Frame, area: Rect, message: &str) {
    let text = format!("{message}\n\nEsc Back | Q Quit");
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Read terminal events on a blocking thread and forward them.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<io::Result<event::Event>> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(50)) {
                Ok(true) => {
                    if tx.send(event::read()).is_err() {
                        break;
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }
    });
    rx
}
