//! `AnimatedRoutes`: the routed view area of an application.
//!
//! Owns the transition coordinator and its timers, listens to a location
//! stream, and renders whichever view is currently on screen with the
//! configured transition effect.

use ratatui::layout::Rect;
use tokio::time::Instant;

use crate::component::{Action, BoxedView, Context, Event};
use crate::config::TransitionConfig;
use crate::error::Result;
use crate::location::Location;
use crate::router::{LocationReceiver, RouteTable};
use crate::transition::{
    Outcome, PhaseKind, RouteTransitionCoordinator, Ticket, TicketReceiver, TransitionEvent,
    TransitionScheduler, TransitionStyle, ViewKey,
};

/// Something the routed area has to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSignal {
    Location(Location),
    Ticket(Ticket),
}

pub struct AnimatedRoutes {
    coordinator: RouteTransitionCoordinator<BoxedView>,
    locations: LocationReceiver,
    scheduler: TransitionScheduler,
    tickets: TicketReceiver,
    style: TransitionStyle,
    area: Rect,
}

impl AnimatedRoutes {
    pub fn new(table: RouteTable<BoxedView>, locations: LocationReceiver, config: TransitionConfig) -> Self {
        let (scheduler, tickets) = TransitionScheduler::new();
        let style = config.style;
        Self {
            coordinator: RouteTransitionCoordinator::new(table, config),
            locations,
            scheduler,
            tickets,
            style,
            area: Rect::default(),
        }
    }

    /// Mount the location the stream currently holds.
    pub fn start(&mut self) -> Result<()> {
        let location = self.locations.borrow_and_update().clone();
        self.apply_location(location)
    }

    /// Wait for the next location change or expired ticket. Cancel safe.
    ///
    /// Returns `None` once the location source is gone.
    pub async fn next_signal(&mut self) -> Option<RouteSignal> {
        tokio::select! {
            changed = self.locations.changed() => match changed {
                Ok(()) => Some(RouteSignal::Location(self.locations.borrow_and_update().clone())),
                Err(_) => None,
            },
            Some(ticket) = self.tickets.recv() => Some(RouteSignal::Ticket(ticket)),
        }
    }

    pub fn handle(&mut self, signal: RouteSignal) -> Result<()> {
        match signal {
            RouteSignal::Location(location) => self.apply_location(location),
            RouteSignal::Ticket(ticket) => self.apply_ticket(ticket),
        }
    }

    pub fn apply_location(&mut self, location: Location) -> Result<()> {
        let outcome = self.coordinator.on_location_change(location);
        self.dispatch(outcome)
    }

    pub fn apply_ticket(&mut self, ticket: Ticket) -> Result<()> {
        let outcome = self.coordinator.on_transition_complete(ticket);
        self.dispatch(outcome)
    }

    fn dispatch(&mut self, outcome: Result<Outcome>) -> Result<()> {
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                // Nothing is mounted any more, so no timer may stay armed.
                self.scheduler.cancel();
                return Err(e);
            }
        };

        for event in &outcome.events {
            match event {
                TransitionEvent::EnterStarted(key) => self.with_view(key, |view, cx| view.on_mount(cx)),
                TransitionEvent::ExitStarted(key) => self.with_view(key, |view, cx| view.on_exit(cx)),
                _ => {}
            }
        }

        if let Some(ticket) = outcome.ticket {
            self.scheduler.arm(ticket);
        }
        Ok(())
    }

    fn with_view<F>(&mut self, key: &ViewKey, f: F)
    where
        F: FnOnce(&mut BoxedView, &mut Context),
    {
        let area = self.area;
        if let Some(mounted) = self.coordinator.active_mut() {
            if &mounted.key == key {
                let mut cx = Context::new(area, mounted.key.clone());
                f(&mut mounted.view, &mut cx);
            }
        }
    }

    /// Render the visible view into `area`. Renders nothing while empty.
    pub fn render(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        self.area = area;
        let progress = self.coordinator.progress(Instant::now());
        let style = self.style;
        let Some(mounted) = self.coordinator.active_mut() else {
            return;
        };

        let view_area = match progress {
            Some((direction, p)) => style.view_area(direction, p, area),
            None => area,
        };
        let mut cx = Context::new(view_area, mounted.key.clone());
        mounted.view.render(frame, &mut cx);

        if let Some((direction, p)) = progress {
            style.paint(direction, p, view_area, frame.buffer_mut());
        }
    }

    /// Forward input to the visible view. A view that is leaving gets nothing.
    pub fn handle_event(&mut self, event: Event) -> Option<Action> {
        if self.coordinator.phase_kind() == PhaseKind::Exiting {
            return None;
        }
        let area = self.area;
        let mounted = self.coordinator.active_mut()?;
        let mut cx = Context::new(area, mounted.key.clone());
        mounted.view.handle_event(event, &mut cx)
    }

    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        let area = self.area;
        if let Some(mounted) = self.coordinator.active_mut() {
            let mut cx = Context::new(area, mounted.key.clone());
            mounted.view.on_shutdown(&mut cx);
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(
            self.coordinator.phase_kind(),
            PhaseKind::Exiting | PhaseKind::Entering
        )
    }

    pub fn has_view(&self) -> bool {
        self.coordinator.active().is_some()
    }

    pub fn active_key(&self) -> Option<&ViewKey> {
        self.coordinator.active_key()
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.coordinator.phase_kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ViewError};
    use crate::router::Navigator;
    use crossterm::event::{KeyCode, KeyEvent};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use ratatui::widgets::Paragraph;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Label {
        text: String,
        log: Log,
        presses: u32,
    }

    impl Label {
        fn record(&self, what: &str, cx: &Context) {
            self.log.lock().unwrap().push(format!("{what} {}", cx.location()));
        }
    }

    impl crate::component::Component for Label {
        fn on_mount(&mut self, cx: &mut Context) {
            self.record("mount", cx);
        }

        fn on_exit(&mut self, cx: &mut Context) {
            self.record("exit", cx);
        }

        fn on_shutdown(&mut self, cx: &mut Context) {
            self.record("shutdown", cx);
        }

        fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context) {
            let text = format!("{}:{}", self.text, self.presses);
            frame.render_widget(Paragraph::new(text), cx.area);
        }

        fn handle_event(&mut self, event: Event, _cx: &mut Context) -> Option<Action> {
            match event {
                Event::Key(key) if key.code == KeyCode::Char('n') => Some(Action::Navigate("/b".into())),
                Event::Key(_) => {
                    self.presses += 1;
                    None
                }
                _ => None,
            }
        }
    }

    fn table(log: &Log) -> RouteTable<BoxedView> {
        let label = |text: &'static str, log: &Log| {
            let log = Arc::clone(log);
            move |_: &crate::router::RouteMatch| -> std::result::Result<BoxedView, ViewError> {
                Ok(Box::new(Label {
                    text: text.to_string(),
                    log: Arc::clone(&log),
                    presses: 0,
                }))
            }
        };
        RouteTable::builder()
            .route("/a", label("A", log))
            .route("/b", label("B", log))
            .route("/broken", |_| Err(ViewError::new("no data")))
            .fallback(label("404", log))
            .build()
            .unwrap()
    }

    fn config() -> TransitionConfig {
        TransitionConfig {
            exit: Duration::from_millis(100),
            enter: Duration::from_millis(100),
            style: TransitionStyle::Fade,
            animate_initial: false,
        }
    }

    fn screen(routes: &mut AnimatedRoutes) -> String {
        let mut terminal = Terminal::new(TestBackend::new(8, 1)).unwrap();
        terminal
            .draw(|frame| routes.render(frame, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..8).map(|x| buffer[(x, 0)].symbol().to_string()).collect::<String>().trim_end().to_string()
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::from(KeyCode::Char(c)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_runs_exit_then_enter() {
        let log: Log = Arc::default();
        let mut nav = Navigator::new("/a");
        let mut routes = AnimatedRoutes::new(table(&log), nav.subscribe(), config());
        routes.start().unwrap();
        assert_eq!(screen(&mut routes), "A:0");
        assert!(!routes.is_animating());

        nav.navigate("/b");
        let signal = routes.next_signal().await.unwrap();
        assert_eq!(signal, RouteSignal::Location(Location::new("/b")));
        routes.handle(signal).unwrap();
        assert_eq!(routes.phase_kind(), PhaseKind::Exiting);
        assert!(routes.is_animating());
        // Still showing the old view while it leaves.
        assert_eq!(screen(&mut routes), "A:0");

        // Exit ticket, then enter ticket.
        let signal = routes.next_signal().await.unwrap();
        assert!(matches!(signal, RouteSignal::Ticket(_)));
        routes.handle(signal).unwrap();
        assert_eq!(routes.phase_kind(), PhaseKind::Entering);
        let signal = routes.next_signal().await.unwrap();
        routes.handle(signal).unwrap();
        assert_eq!(routes.phase_kind(), PhaseKind::Idle);
        assert_eq!(screen(&mut routes), "B:0");

        assert_eq!(*log.lock().unwrap(), vec!["mount /a", "exit /a", "mount /b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_view_gets_no_input() {
        let log: Log = Arc::default();
        let mut nav = Navigator::new("/a");
        let mut routes = AnimatedRoutes::new(table(&log), nav.subscribe(), config());
        routes.start().unwrap();

        assert_eq!(routes.handle_event(key('x')), None);
        assert_eq!(screen(&mut routes), "A:1");
        assert_eq!(routes.handle_event(key('n')), Some(Action::Navigate("/b".into())));

        nav.navigate("/b");
        let signal = routes.next_signal().await.unwrap();
        routes.handle(signal).unwrap();
        routes.handle_event(key('x'));
        assert_eq!(screen(&mut routes), "A:1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_navigation_settles_on_latest() {
        let log: Log = Arc::default();
        let mut nav = Navigator::new("/a");
        let mut routes = AnimatedRoutes::new(table(&log), nav.subscribe(), config());
        routes.start().unwrap();

        nav.navigate("/b");
        let signal = routes.next_signal().await.unwrap();
        routes.handle(signal).unwrap();
        nav.navigate("/nowhere");
        let signal = routes.next_signal().await.unwrap();
        routes.handle(signal).unwrap();

        while routes.is_animating() {
            let signal = routes.next_signal().await.unwrap();
            routes.handle(signal).unwrap();
        }
        assert_eq!(routes.active_key().unwrap().location().as_str(), "/nowhere");
        assert_eq!(screen(&mut routes), "404:0");
        // "/b" was never mounted.
        assert!(!log.lock().unwrap().iter().any(|l| l == "mount /b"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fade_dims_mid_exit() {
        let log: Log = Arc::default();
        let mut nav = Navigator::new("/a");
        let mut routes = AnimatedRoutes::new(table(&log), nav.subscribe(), config());
        routes.start().unwrap();

        nav.navigate("/b");
        let signal = routes.next_signal().await.unwrap();
        routes.handle(signal).unwrap();
        tokio::time::advance(Duration::from_millis(50)).await;

        let mut terminal = Terminal::new(TestBackend::new(8, 1)).unwrap();
        terminal.draw(|frame| routes.render(frame, frame.area())).unwrap();
        let cell = &terminal.backend().buffer()[(0, 0)];
        assert_eq!(cell.fg, Color::DarkGray);
        assert_eq!(cell.symbol(), "A");

        tokio::time::advance(Duration::from_millis(30)).await;
        assert_eq!(screen(&mut routes), "");
    }

    #[tokio::test]
    async fn test_render_failure_leaves_nothing_mounted() {
        let log: Log = Arc::default();
        let mut nav = Navigator::new("/broken");
        let mut routes = AnimatedRoutes::new(table(&log), nav.subscribe(), TransitionConfig::instant());
        let err = routes.start().unwrap_err();
        assert!(matches!(err, Error::RenderFailure { .. }));
        assert!(!routes.has_view());
        assert_eq!(screen(&mut routes), "");

        nav.navigate("/a");
        let signal = routes.next_signal().await.unwrap();
        routes.handle(signal).unwrap();
        assert_eq!(screen(&mut routes), "A:0");
    }

    #[tokio::test]
    async fn test_shutdown_reaches_visible_view() {
        let log: Log = Arc::default();
        let nav = Navigator::new("/a");
        let mut routes = AnimatedRoutes::new(table(&log), nav.subscribe(), config());
        routes.start().unwrap();
        routes.shutdown();
        assert_eq!(log.lock().unwrap().last().map(String::as_str), Some("shutdown /a"));
    }

    #[tokio::test]
    async fn test_closed_source_ends_signals() {
        let log: Log = Arc::default();
        let nav = Navigator::new("/a");
        let mut routes = AnimatedRoutes::new(table(&log), nav.subscribe(), config());
        routes.start().unwrap();
        drop(nav);
        assert_eq!(routes.next_signal().await, None);
    }
}
