//! Domain event infrastructure.
//!
//! A write operation produces a single immutable [`DomainEvent`] and hands it
//! to the [`EventDispatcher`]; every handler subscribed to that event name
//! then runs, in subscription order, on the publisher's task. Delivery is
//! strictly sequential and best-effort: a failing handler is logged and the
//! remaining handlers still run, but nothing is retried or rolled back, and
//! an event lost to a crash mid-dispatch stays lost.
//!
//! # Module Structure
//!
//! - [`types`]: the event record itself
//! - [`handler`]: the `EventHandler` capability and its error type
//! - [`dispatcher`]: the name-keyed subscription table and publish loop

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::{EventHandler, HandlerError};
pub use types::{DomainEvent, RECORD_CREATED};
