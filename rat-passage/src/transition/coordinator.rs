//! The route transition state machine.
//!
//! Sequencing is "wait" mode: the visible view exits completely before the
//! next one is mounted and enters. Location changes that arrive mid-flight
//! re-target the sequence instead of queueing, so the coordinator always
//! converges on the latest location.
//!
//! The coordinator never sleeps or spawns. Each step returns an [`Outcome`]
//! whose ticket the caller arms on a timer and hands back through
//! [`RouteTransitionCoordinator::on_transition_complete`]. Tickets from
//! superseded phases are ignored.

use std::mem;
use std::num::NonZeroU64;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::TransitionConfig;
use crate::error::Result;
use crate::location::Location;
use crate::router::{Resolution, RouteTable};

use super::phase::{Direction, Mounted, Outcome, Phase, PhaseKind, Ticket, TransitionEvent, ViewKey};

pub struct RouteTransitionCoordinator<V> {
    table: RouteTable<V>,
    config: TransitionConfig,
    phase: Phase<V>,
    /// Most recently requested location.
    latest: Option<Location>,
    next_ticket: u64,
    next_mount: u64,
}

impl<V> RouteTransitionCoordinator<V> {
    pub fn new(table: RouteTable<V>, config: TransitionConfig) -> Self {
        Self {
            table,
            config,
            phase: Phase::Empty,
            latest: None,
            next_ticket: 0,
            next_mount: 0,
        }
    }

    /// Pure table lookup.
    pub fn resolve(&self, location: &Location) -> Resolution {
        self.table.resolve(location)
    }

    pub fn phase(&self) -> &Phase<V> {
        &self.phase
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// The latest requested location, which may not be mounted yet.
    pub fn current_location(&self) -> Option<&Location> {
        self.latest.as_ref()
    }

    pub fn settled(&self) -> bool {
        self.phase.kind() == PhaseKind::Idle
    }

    pub fn active(&self) -> Option<&Mounted<V>> {
        self.phase.visible()
    }

    pub fn active_mut(&mut self) -> Option<&mut Mounted<V>> {
        self.phase.visible_mut()
    }

    pub fn active_key(&self) -> Option<&ViewKey> {
        self.phase.visible().map(|m| &m.key)
    }

    pub fn progress(&self, now: Instant) -> Option<(Direction, f32)> {
        self.phase.progress(now)
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Apply a location change. Identical to the latest request is a no-op.
    pub fn on_location_change(&mut self, location: Location) -> Result<Outcome> {
        if self.latest.as_ref() == Some(&location) {
            return Ok(Outcome::default());
        }
        self.latest = Some(location.clone());

        match mem::replace(&mut self.phase, Phase::Empty) {
            Phase::Empty => {
                let animate = self.config.animate_initial;
                self.mount(location, animate, Vec::new())
            }
            Phase::Idle { current } => Ok(self.begin_exit(current, location, Vec::new())),
            Phase::Exiting {
                leaving,
                target,
                ticket,
                started,
            } => {
                // Already leaving the right view; only the destination moves.
                tracing::debug!(from = %target, to = %location, "retarget exit");
                let event = TransitionEvent::Retargeted {
                    from: target,
                    to: location.clone(),
                };
                self.phase = Phase::Exiting {
                    leaving,
                    target: location,
                    ticket,
                    started,
                };
                Ok(Outcome {
                    events: vec![event],
                    ticket: None,
                })
            }
            Phase::Entering { entering, .. } => {
                // The enter ticket dies with the phase; the half-entered view leaves.
                Ok(self.begin_exit(entering, location, Vec::new()))
            }
        }
    }

    /// Feed back an expired ticket. Stale tickets are ignored.
    pub fn on_transition_complete(&mut self, ticket: Ticket) -> Result<Outcome> {
        if self.phase.ticket().map(|t| t.id()) != Some(ticket.id()) {
            tracing::trace!(ticket = ticket.id(), "stale transition ticket ignored");
            return Ok(Outcome::default());
        }

        match mem::replace(&mut self.phase, Phase::Empty) {
            Phase::Exiting { leaving, target, .. } => {
                tracing::debug!(key = %leaving.key, "exit completed");
                let events = vec![TransitionEvent::ExitCompleted(leaving.key)];
                drop(leaving.view);
                self.mount(target, true, events)
            }
            Phase::Entering { entering, .. } => {
                tracing::debug!(key = %entering.key, "enter completed");
                let event = TransitionEvent::EnterCompleted(entering.key.clone());
                self.phase = Phase::Idle { current: entering };
                Ok(Outcome {
                    events: vec![event],
                    ticket: None,
                })
            }
            other => {
                self.phase = other;
                Ok(Outcome::default())
            }
        }
    }

    fn begin_exit(&mut self, leaving: Mounted<V>, target: Location, mut events: Vec<TransitionEvent>) -> Outcome {
        tracing::debug!(key = %leaving.key, to = %target, "exit started");
        events.push(TransitionEvent::ExitStarted(leaving.key.clone()));
        let ticket = self.issue(Direction::Exit, self.config.exit);
        self.phase = Phase::Exiting {
            leaving,
            target,
            ticket,
            started: Instant::now(),
        };
        Outcome {
            events,
            ticket: Some(ticket),
        }
    }

    fn mount(&mut self, location: Location, animate: bool, mut events: Vec<TransitionEvent>) -> Result<Outcome> {
        let resolution = self.table.resolve(&location);
        let view = match self.table.instantiate(&resolution) {
            Ok(view) => view,
            Err(e) => {
                tracing::warn!(%location, error = %e, "view failed to build");
                self.phase = Phase::Empty;
                return Err(e);
            }
        };

        self.next_mount += 1;
        let mount = NonZeroU64::new(self.next_mount).unwrap_or(NonZeroU64::MIN);
        let key = ViewKey::new(location, mount);
        tracing::debug!(%key, not_found = resolution.is_not_found(), "enter started");
        events.push(TransitionEvent::EnterStarted(key.clone()));
        let current = Mounted { key, view };

        if animate && !self.config.enter.is_zero() {
            let ticket = self.issue(Direction::Enter, self.config.enter);
            self.phase = Phase::Entering {
                entering: current,
                ticket,
                started: Instant::now(),
            };
            return Ok(Outcome {
                events,
                ticket: Some(ticket),
            });
        }

        events.push(TransitionEvent::EnterCompleted(current.key.clone()));
        self.phase = Phase::Idle { current };
        Ok(Outcome { events, ticket: None })
    }

    fn issue(&mut self, direction: Direction, duration: Duration) -> Ticket {
        self.next_ticket += 1;
        Ticket::new(self.next_ticket, direction, duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ViewError};
    use crate::router::RouteMatch;

    /// A view carrying some local state that must not survive a remount.
    #[derive(Debug, PartialEq)]
    struct TestView {
        label: String,
        local: u32,
    }

    fn view(label: impl Into<String>) -> std::result::Result<TestView, ViewError> {
        Ok(TestView {
            label: label.into(),
            local: 0,
        })
    }

    fn user(m: &RouteMatch) -> std::result::Result<TestView, ViewError> {
        view(format!("user {}", m.param("id").unwrap_or("?")))
    }

    fn table() -> RouteTable<TestView> {
        RouteTable::builder()
            .route("/", |_| view("home"))
            .route("/user/{id}", user)
            .route("/broken", |_| Err(ViewError::new("nope")))
            .fallback(|_| view("not found"))
            .build()
            .unwrap()
    }

    fn timed() -> TransitionConfig {
        TransitionConfig {
            exit: Duration::from_millis(100),
            enter: Duration::from_millis(100),
            ..TransitionConfig::default()
        }
    }

    fn coordinator() -> RouteTransitionCoordinator<TestView> {
        RouteTransitionCoordinator::new(table(), timed())
    }

    fn loc(path: &str) -> Location {
        Location::new(path)
    }

    /// Drive every pending ticket to completion, collecting events.
    fn settle(c: &mut RouteTransitionCoordinator<TestView>, mut pending: Option<Ticket>, log: &mut Vec<TransitionEvent>) {
        while let Some(ticket) = pending {
            let outcome = c.on_transition_complete(ticket).unwrap();
            log.extend(outcome.events);
            pending = outcome.ticket;
        }
    }

    fn label(c: &RouteTransitionCoordinator<TestView>) -> &str {
        &c.active().unwrap().view.label
    }

    #[test]
    fn test_initial_mount_enters_without_exit() {
        let mut c = coordinator();
        let outcome = c.on_location_change(loc("/")).unwrap();

        assert!(outcome.ticket.is_none());
        assert_eq!(outcome.events.len(), 2);
        assert!(matches!(outcome.events[0], TransitionEvent::EnterStarted(_)));
        assert!(matches!(outcome.events[1], TransitionEvent::EnterCompleted(_)));
        assert!(c.settled());
        assert_eq!(label(&c), "home");
    }

    #[test]
    fn test_initial_mount_can_animate() {
        let mut c = RouteTransitionCoordinator::new(
            table(),
            TransitionConfig {
                animate_initial: true,
                ..timed()
            },
        );
        let outcome = c.on_location_change(loc("/")).unwrap();
        assert_eq!(c.phase_kind(), PhaseKind::Entering);
        let ticket = outcome.ticket.unwrap();
        assert_eq!(ticket.direction(), Direction::Enter);

        let outcome = c.on_transition_complete(ticket).unwrap();
        assert!(matches!(outcome.events[..], [TransitionEvent::EnterCompleted(_)]));
        assert!(c.settled());
    }

    #[test]
    fn test_exit_completes_before_enter_starts() {
        let mut c = coordinator();
        c.on_location_change(loc("/")).unwrap();

        let mut log = Vec::new();
        let outcome = c.on_location_change(loc("/user/1")).unwrap();
        log.extend(outcome.events);
        assert_eq!(c.phase_kind(), PhaseKind::Exiting);
        // The target is not mounted while the old view leaves.
        assert_eq!(label(&c), "home");
        settle(&mut c, outcome.ticket, &mut log);

        let kinds: Vec<&str> = log
            .iter()
            .map(|e| match e {
                TransitionEvent::ExitStarted(k) => { assert_eq!(k.location().as_str(), "/"); "exit-start" }
                TransitionEvent::ExitCompleted(k) => { assert_eq!(k.location().as_str(), "/"); "exit-done" }
                TransitionEvent::EnterStarted(k) => { assert_eq!(k.location().as_str(), "/user/1"); "enter-start" }
                TransitionEvent::EnterCompleted(_) => "enter-done",
                TransitionEvent::Retargeted { .. } => "retarget",
            })
            .collect();
        assert_eq!(kinds, vec!["exit-start", "exit-done", "enter-start", "enter-done"]);
        assert!(c.settled());
        assert_eq!(label(&c), "user 1");
    }

    #[test]
    fn test_same_location_is_noop() {
        let mut c = coordinator();
        c.on_location_change(loc("/")).unwrap();
        assert!(c.on_location_change(loc("/")).unwrap().is_noop());

        // Also while a transition toward that location is in flight.
        c.on_location_change(loc("/user/1")).unwrap();
        assert!(c.on_location_change(loc("/user/1")).unwrap().is_noop());
        assert_eq!(c.phase_kind(), PhaseKind::Exiting);
    }

    #[test]
    fn test_distinct_locations_get_fresh_instances() {
        let mut c = coordinator();
        c.on_location_change(loc("/user/1")).unwrap();
        c.active_mut().unwrap().view.local = 41;
        let first = c.active_key().unwrap().clone();

        let mut log = Vec::new();
        let outcome = c.on_location_change(loc("/user/2")).unwrap();
        settle(&mut c, outcome.ticket, &mut log);

        let second = c.active_key().unwrap().clone();
        assert_ne!(first, second);
        assert_eq!(second.location().as_str(), "/user/2");
        assert_eq!(c.active().unwrap().view, TestView { label: "user 2".into(), local: 0 });
    }

    #[test]
    fn test_revisiting_a_location_remounts() {
        let mut c = coordinator();
        c.on_location_change(loc("/user/1")).unwrap();
        let first = c.active_key().unwrap().clone();
        let mut log = Vec::new();
        let t = c.on_location_change(loc("/")).unwrap().ticket;
        settle(&mut c, t, &mut log);
        let t = c.on_location_change(loc("/user/1")).unwrap().ticket;
        settle(&mut c, t, &mut log);

        let again = c.active_key().unwrap();
        assert_eq!(again.location(), first.location());
        assert_ne!(again.mount_id(), first.mount_id());
    }

    #[test]
    fn test_superseded_ticket_has_no_effect() {
        let mut c = coordinator();
        c.on_location_change(loc("/")).unwrap();

        // A -> B: exit of A armed.
        let exit_a = c.on_location_change(loc("/user/1")).unwrap().ticket.unwrap();
        let enter_b = c.on_transition_complete(exit_a).unwrap().ticket.unwrap();
        assert_eq!(c.phase_kind(), PhaseKind::Entering);

        // B -> C before B finished entering: B now leaves under a new ticket.
        let outcome = c.on_location_change(loc("/user/3")).unwrap();
        assert!(matches!(outcome.events[..], [TransitionEvent::ExitStarted(_)]));
        let exit_b = outcome.ticket.unwrap();

        // Late completions of older tickets are inert.
        assert!(c.on_transition_complete(enter_b).unwrap().is_noop());
        assert!(c.on_transition_complete(exit_a).unwrap().is_noop());
        assert_eq!(c.phase_kind(), PhaseKind::Exiting);

        let mut log = Vec::new();
        settle(&mut c, Some(exit_b), &mut log);
        assert_eq!(label(&c), "user 3");

        // And still inert once settled.
        assert!(c.on_transition_complete(enter_b).unwrap().is_noop());
        assert_eq!(label(&c), "user 3");
    }

    #[test]
    fn test_retarget_during_exit_keeps_timer() {
        let mut c = coordinator();
        c.on_location_change(loc("/")).unwrap();
        let exit = c.on_location_change(loc("/user/1")).unwrap().ticket.unwrap();

        let outcome = c.on_location_change(loc("/user/2")).unwrap();
        assert!(outcome.ticket.is_none());
        assert_eq!(
            outcome.events,
            vec![TransitionEvent::Retargeted { from: loc("/user/1"), to: loc("/user/2") }]
        );
        assert_eq!(c.phase().ticket(), Some(exit));

        let mut log = Vec::new();
        settle(&mut c, Some(exit), &mut log);
        assert_eq!(label(&c), "user 2");
        // The intermediate target was never mounted.
        assert!(!log.iter().any(|e| matches!(e, TransitionEvent::EnterStarted(k) if k.location().as_str() == "/user/1")));
    }

    #[test]
    fn test_converges_on_last_location() {
        let paths = ["/user/1", "/", "/missing", "/user/2", "/user/1", "/user/9"];
        let mut c = coordinator();
        c.on_location_change(loc("/")).unwrap();

        let mut log = Vec::new();
        let mut pending = Vec::new();
        for (i, path) in paths.iter().enumerate() {
            let outcome = c.on_location_change(loc(path)).unwrap();
            pending.extend(outcome.ticket);
            // Complete every other armed ticket to mix phases.
            if i % 2 == 1 {
                if let Some(t) = pending.pop() {
                    let out = c.on_transition_complete(t).unwrap();
                    pending.extend(out.ticket);
                }
            }
        }
        // Deliver everything still outstanding, oldest first.
        while !pending.is_empty() {
            let t = pending.remove(0);
            let out = c.on_transition_complete(t).unwrap();
            log.extend(out.events);
            pending.extend(out.ticket);
        }

        assert!(c.settled());
        assert_eq!(c.current_location(), Some(&loc("/user/9")));
        assert_eq!(c.active_key().unwrap().location(), &loc("/user/9"));
        let expected = c.table.instantiate(&c.resolve(&loc("/user/9"))).unwrap();
        assert_eq!(c.active().unwrap().view, expected);
    }

    #[test]
    fn test_no_match_renders_fallback() {
        let mut c = coordinator();
        c.on_location_change(loc("/definitely/not/here")).unwrap();
        assert!(c.resolve(&loc("/definitely/not/here")).is_not_found());
        assert_eq!(label(&c), "not found");
    }

    #[test]
    fn test_render_failure_surfaces_and_empties_slot() {
        let mut c = coordinator();
        c.on_location_change(loc("/")).unwrap();
        let exit = c.on_location_change(loc("/broken")).unwrap().ticket.unwrap();

        let err = c.on_transition_complete(exit).unwrap_err();
        assert!(matches!(err, Error::RenderFailure { .. }));
        assert_eq!(c.phase_kind(), PhaseKind::Empty);
        assert!(c.active().is_none());

        // Navigating on mounts directly, there is nothing to exit.
        let outcome = c.on_location_change(loc("/user/5")).unwrap();
        assert!(outcome.ticket.is_none());
        assert_eq!(label(&c), "user 5");
    }

    #[test]
    fn test_zero_length_enter_settles_on_exit_completion() {
        let mut c = RouteTransitionCoordinator::new(
            table(),
            TransitionConfig {
                enter: Duration::ZERO,
                ..timed()
            },
        );
        c.on_location_change(loc("/")).unwrap();
        let exit = c.on_location_change(loc("/user/1")).unwrap().ticket.unwrap();
        let outcome = c.on_transition_complete(exit).unwrap();
        assert!(outcome.ticket.is_none());
        assert!(c.settled());
    }
}
