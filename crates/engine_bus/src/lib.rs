//! # engine_bus
//!
//! Immediate-mode publish/subscribe for decoupled communication between
//! systems.
//!
//! ## Module Overview
//!
//! - [`message`]: the [`Message`] trait every payload implements.
//! - [`mailbox`]: [`Mailbox`], the listener table and dispatcher.
//!
//! Dispatch is synchronous: every listener registered for a message's type
//! tag runs, in registration order, before [`Mailbox::dispatch`] returns.
//! There is no queue and nothing is buffered across frames.

pub mod mailbox;
pub mod message;

pub use mailbox::{ListenerId, Mailbox};
pub use message::Message;
