//! Speech side channel.
//!
//! Speech is a capability handed to the controller rather than a global
//! handle. Calls are fire-and-forget and never hold up playback.

/// Speaks text aloud.
pub trait Narrator {
    /// Start speaking `text`. Anything already being spoken keeps going
    /// unless the caller cancels it first.
    fn speak(&mut self, text: &str);

    /// Stop any speech in progress.
    fn cancel(&mut self);

    fn is_speaking(&self) -> bool;
}

impl<N: Narrator + ?Sized> Narrator for Box<N> {
    fn speak(&mut self, text: &str) {
        (**self).speak(text);
    }

    fn cancel(&mut self) {
        (**self).cancel();
    }

    fn is_speaking(&self) -> bool {
        (**self).is_speaking()
    }
}

/// Narrator that says nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Narrator for Silent {
    fn speak(&mut self, _text: &str) {}

    fn cancel(&mut self) {}

    fn is_speaking(&self) -> bool {
        false
    }
}
