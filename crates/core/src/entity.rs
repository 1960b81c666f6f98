//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Records in this system are looked up by linear scan, so the only thing a
/// collection needs from a record is its identifier.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Linear scan for a record by identifier.
pub fn find<E: Entity>(records: &[E], id: E::Id) -> Option<&E> {
    records.iter().find(|r| r.id() == id)
}

/// Mutable linear scan for a record by identifier.
pub fn find_mut<E: Entity>(records: &mut [E], id: E::Id) -> Option<&mut E> {
    records.iter_mut().find(|r| r.id() == id)
}
