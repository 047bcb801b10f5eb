//! Pipeline events: `SaveLoaded`, `SaveSaving`, `SaveSaved`. Listeners are
//! synchronous and run in registration order; a panicking listener is
//! caught and logged rather than aborting the pipeline.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use tracing::error;

use crate::domain::Save;

pub enum Event<'a> {
    SaveLoaded {
        path: &'a Path,
    },
    SaveSaving {
        save: &'a Save,
        target_path: &'a Path,
    },
    SaveSaved {
        save: &'a Save,
        path: &'a Path,
    },
}

type Listener = Box<dyn for<'a> Fn(&Event<'a>) + Send + Sync>;

/// Holds the listeners a [`crate::pipeline`] caller registered and dispatches
/// events to them. Not itself `Clone`; share via `Arc` if needed across
/// threads.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> EventBus {
        EventBus::default()
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: for<'a> Fn(&Event<'a>) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&self, event: &Event) {
        for listener in &self.listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                error!("event listener panicked; continuing");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn listeners_run_in_order_and_see_the_right_event() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();
        let seen_clone = seen.clone();
        bus.subscribe(move |event| {
            if let Event::SaveLoaded { path } = event {
                assert_eq!(path.to_str().unwrap(), "campaign.sav");
                seen_clone.fetch_add(1, Ordering::SeqCst);
            }
        });

        bus.emit(&Event::SaveLoaded {
            path: Path::new("campaign.sav"),
        });

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn a_panicking_listener_does_not_stop_later_listeners() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();
        bus.subscribe(|_| panic!("boom"));
        let seen_clone = seen.clone();
        bus.subscribe(move |_| {
            seen_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(&Event::SaveLoaded {
            path: Path::new("campaign.sav"),
        });

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
