//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are never mutated in place; `Money` is
/// the canonical example here. To "change" one, build a new value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
