use ratatui::layout::Rect;

use crate::location::Location;
use crate::transition::ViewKey;

/// Event type for component interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    Paste(String),
}

impl Event {
    /// Map a terminal event, dropping the kinds views never see.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event::{Event as CrosstermEvent, KeyEventKind};

        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
            CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
            CrosstermEvent::FocusGained => Some(Event::FocusGained),
            CrosstermEvent::FocusLost => Some(Event::FocusLost),
            CrosstermEvent::Paste(s) => Some(Event::Paste(s)),
            _ => None,
        }
    }
}

/// Action that a component can return after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    Back,
    Quit,
    Noop,
}

/// Per-call context handed to a mounted view.
#[derive(Debug, Clone)]
pub struct Context {
    pub area: Rect,
    key: ViewKey,
}

impl Context {
    pub fn new(area: Rect, key: ViewKey) -> Self {
        Self { area, key }
    }

    /// Render identity of the view being called.
    pub fn key(&self) -> &ViewKey {
        &self.key
    }

    pub fn location(&self) -> &Location {
        self.key.location()
    }
}

/// A view the router can mount.
///
/// A fresh instance is built for every mount, so fields are local state that
/// lives exactly as long as one visit to a location.
pub trait Component: Send + 'static {
    /// Called once, when the view is mounted and starts entering.
    fn on_mount(&mut self, cx: &mut Context) {
        let _ = cx;
    }

    /// Called when the view starts leaving.
    fn on_exit(&mut self, cx: &mut Context) {
        let _ = cx;
    }

    /// Called when the application is about to shut down.
    fn on_shutdown(&mut self, cx: &mut Context) {
        let _ = cx;
    }

    /// Render the component into `cx.area`.
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context);

    /// Handle an event, returning an optional action.
    fn handle_event(&mut self, event: Event, cx: &mut Context) -> Option<Action> {
        let _ = event;
        let _ = cx;
        None
    }
}

/// The view type stored in a route table for terminal applications.
pub type BoxedView = Box<dyn Component>;
