//! Aggregate trait for the in-memory collections owned by the shop controller.

/// Aggregate execution semantics (pure, deterministic).
///
/// - **Decision logic**: `handle(&self, cmd)` returns events.
/// - **State mutation**: `apply(&mut self, event)` evolves state.
///
/// Aggregates must not perform IO or side effects. They should only return events
/// describing what happened.
pub trait Aggregate {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Monotonically increasing revision of the snapshot (+1 per applied event).
    fn version(&self) -> u64;

    /// Evolve in-memory state from a single event.
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to emit given the current state and a command.
    ///
    /// This must not mutate state. State evolution is done through `apply`.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;
}

/// Run `command` against a snapshot and return the successor snapshot.
///
/// The input snapshot is never touched, so a rejected command leaves the
/// caller's state exactly as it was.
pub fn execute<A>(state: &A, command: &A::Command) -> Result<(A, Vec<A::Event>), A::Error>
where
    A: Aggregate + Clone,
{
    let events = state.handle(command)?;
    let mut next = state.clone();
    for event in &events {
        next.apply(event);
    }
    Ok((next, events))
}
