//! Domain events emitted from shop operations.

pub mod event;

pub use event::Event;
