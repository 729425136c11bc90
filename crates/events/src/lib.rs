//! Atelier notification events.
//!
//! This crate provides the in-process plumbing that connects the
//! notification service to live delivery:
//!
//! - [`EventBus`]: publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`NotificationEvent`]: the envelope published for every stored
//!   notification.
//! - [`Audience`]: who a notification is addressed to.

pub mod bus;

pub use bus::{Audience, EventBus, NotificationEvent};
