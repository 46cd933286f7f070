//! Synchronous observer registry with per-call failure isolation.
//!
//! Observers run in registration order. Each invocation is wrapped in its own
//! catch-and-continue boundary: an observer that returns `Err` or panics is
//! logged and reported, and the remaining observers still run.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use thiserror::Error;
use tracing::warn;

pub type Observer<E> = Box<dyn FnMut(&E) -> anyhow::Result<()> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum ObserverError {
    #[error("{list} observer {id} failed: {source}")]
    Failed {
        list: &'static str,
        id: ObserverId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error("{list} observer {id} panicked: {message}")]
    Panicked {
        list: &'static str,
        id: ObserverId,
        message: String,
    },
}

impl ObserverError {
    pub fn observer(&self) -> ObserverId {
        match self {
            ObserverError::Failed { id, .. } | ObserverError::Panicked { id, .. } => *id,
        }
    }
}

pub struct ObserverList<E> {
    name: &'static str,
    next_id: u64,
    observers: Vec<(ObserverId, Observer<E>)>,
}

impl<E> fmt::Debug for ObserverList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("name", &self.name)
            .field("len", &self.observers.len())
            .finish()
    }
}

impl<E> ObserverList<E> {
    /// `name` labels log records and errors (e.g. `"keypress"`).
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            next_id: 0,
            observers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&E) -> anyhow::Result<()> + Send + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        before != self.observers.len()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Invoke every observer with `event`. Returns the first failure, if any;
    /// later failures in the same call are only logged.
    pub fn dispatch(&mut self, event: &E) -> Option<ObserverError> {
        let mut first = None;
        for (id, observer) in self.observers.iter_mut() {
            let outcome = catch_unwind(AssertUnwindSafe(|| observer(event)));
            let err = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(source)) => ObserverError::Failed {
                    list: self.name,
                    id: *id,
                    source: source.into(),
                },
                Err(payload) => ObserverError::Panicked {
                    list: self.name,
                    id: *id,
                    message: panic_message(payload.as_ref()),
                },
            };
            warn!(target: "events.observer", list = self.name, observer = %id, error = %err, "observer_failed");
            if first.is_none() {
                first = Some(err);
            }
        }
        first
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
