//! One-shot "content ready" signal.

use thiserror::Error;
use tracing::debug;
use tuneboard_nav::NavError;

type ReadyCallback<C> = Box<dyn FnOnce(&mut C) -> Result<(), NavError> + Send>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadyError {
    #[error("A content-ready callback is already registered")]
    AlreadyRegistered,

    #[error("Content-ready signal already fired")]
    AlreadyFired,
}

/// Fires once after every content provider has mounted.
///
/// Holds at most one callback; firing a second time has no effect.
pub struct ContentReady<C> {
    callback: Option<ReadyCallback<C>>,
    fired: bool,
}

impl<C> Default for ContentReady<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for ContentReady<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentReady")
            .field("registered", &self.callback.is_some())
            .field("fired", &self.fired)
            .finish()
    }
}

impl<C> ContentReady<C> {
    pub fn new() -> Self {
        Self { callback: None, fired: false }
    }

    pub fn register(&mut self, callback: impl FnOnce(&mut C) -> Result<(), NavError> + Send + 'static) -> Result<(), ReadyError> {
        if self.fired {
            return Err(ReadyError::AlreadyFired);
        }
        if self.callback.is_some() {
            return Err(ReadyError::AlreadyRegistered);
        }
        self.callback = Some(Box::new(callback));
        Ok(())
    }

    /// Run the registered callback. Returns `Ok(false)` when already fired.
    pub fn fire(&mut self, context: &mut C) -> Result<bool, NavError> {
        if self.fired {
            debug!("Content-ready signal fired again; ignoring");
            return Ok(false);
        }
        self.fired = true;
        match self.callback.take() {
            Some(callback) => callback(context)?,
            None => debug!("Content ready with no callback registered"),
        }
        Ok(true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_runs_exactly_once() {
        let mut ready = ContentReady::<u32>::new();
        ready
            .register(|count| {
                *count += 1;
                Ok(())
            })
            .expect("first registration");

        let mut count = 0;
        assert_eq!(ready.fire(&mut count), Ok(true));
        assert_eq!(ready.fire(&mut count), Ok(false));
        assert_eq!(count, 1);
        assert!(ready.has_fired());
    }

    #[test]
    fn only_one_callback_can_be_registered() {
        let mut ready = ContentReady::<()>::new();
        ready.register(|_| Ok(())).expect("first registration");
        assert_eq!(ready.register(|_| Ok(())), Err(ReadyError::AlreadyRegistered));
    }

    #[test]
    fn registering_after_fire_is_rejected() {
        let mut ready = ContentReady::<()>::new();
        assert_eq!(ready.fire(&mut ()), Ok(true));
        assert_eq!(ready.register(|_| Ok(())), Err(ReadyError::AlreadyFired));
    }

    #[test]
    fn callback_errors_propagate() {
        let mut ready = ContentReady::<()>::new();
        ready
            .register(|_| Err(NavError::leaf_not_found("missing")))
            .expect("registration");
        assert_eq!(ready.fire(&mut ()), Err(NavError::leaf_not_found("missing")));
    }
}
