#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use oxline::{Session, SessionConfig, SessionError, SessionEvent};

/// A session plus everything its listeners saw, on a synthetic clock.
pub struct Harness {
    pub session: Session,
    pub events: Arc<Mutex<Vec<SessionEvent>>>,
    pub t0: Instant,
}

impl Harness {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_session(Session::new(config).expect("valid config"))
    }

    pub fn with_session(mut session: Session) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        session.on_event(move |e| {
            sink.lock().unwrap().push(e.clone());
            Ok(())
        });
        Self {
            session,
            events,
            t0: Instant::now(),
        }
    }

    pub fn at(&self, ms: u64) -> Instant {
        self.t0 + Duration::from_millis(ms)
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        self.feed_at(bytes, 0)
    }

    pub fn feed_at(&mut self, bytes: &[u8], ms: u64) -> Result<(), SessionError> {
        let now = self.at(ms);
        self.session.feed_at(bytes, now)
    }

    pub fn expire_at(&mut self, ms: u64) -> Result<(), SessionError> {
        let now = self.at(ms);
        self.session.expire(now)
    }

    pub fn lines(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Line(l) => Some(l.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind_label() == kind)
            .count()
    }

    pub fn last_refresh(&self) -> Option<oxline::Refresh> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|e| match e {
                SessionEvent::Refresh(r) => Some(r.clone()),
                _ => None,
            })
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(SessionEvent::kind_label)
            .collect()
    }
}

pub fn default_harness() -> Harness {
    Harness::new(SessionConfig::new())
}
