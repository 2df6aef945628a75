//! The [`Message`] trait.

use std::any::Any;

/// A value broadcast through a [`Mailbox`](crate::Mailbox).
///
/// A message names its own type tag; listeners subscribe to that tag. The
/// payload is only borrowed for the duration of each listener call, so a
/// listener that needs data later must copy it out.
///
/// # Examples
///
/// ```rust
/// use engine_bus::Message;
///
/// struct ScoreMessage {
///     points: u32,
/// }
///
/// impl Message for ScoreMessage {
///     fn type_name(&self) -> &'static str { "ScoreMessage" }
/// }
/// ```
pub trait Message: Any {
    /// The type tag listeners subscribe to.
    fn type_name(&self) -> &'static str;
}

impl dyn Message {
    /// Downcast to the concrete payload type.
    ///
    /// Returns `None` when the message is of another type, including another
    /// type that reuses the same tag.
    #[must_use]
    pub fn downcast_ref<T: Message>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    /// Returns `true` if the message is a `T`.
    #[must_use]
    pub fn is<T: Message>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}
