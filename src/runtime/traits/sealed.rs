// ABOUTME: Sealed trait pattern for runtime traits.
// ABOUTME: Only engine clients defined in this crate implement the capability traits.

/// Supertrait of every runtime capability trait.
///
/// Code outside the crate depends on the capabilities through the archive
/// adapters instead of implementing them.
pub trait Sealed {}
