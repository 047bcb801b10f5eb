//! Cooperative cancellation for long-running codec/pipeline operations.
//!
//! The core stays synchronous: a [`CancellationToken`] is polled at I/O
//! boundaries and before each segment decode/encode rather than driving any
//! async runtime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use derive_more::derive::{Display, Error};

#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> CancellationToken {
        CancellationToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Returns [`Cancelled`] if this token has been cancelled. Call at every
    /// I/O boundary and before each segment decode/encode.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Error, Default, PartialEq, Eq)]
#[display("operation cancelled")]
pub struct Cancelled;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelling_is_observed_by_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(clone.check().is_ok());
        token.cancel();
        assert!(clone.check().is_err());
    }
}
