//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Collections in this workspace are keyed by `Entity::id`; two records with
/// the same id are the same record at different points in time.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Position of the entity with `id` in `items`, if present.
pub fn position_of<E: Entity>(items: &[E], id: &E::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}
