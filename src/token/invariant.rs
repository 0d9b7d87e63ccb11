use core::marker::PhantomData;

/// A marker type that is invariant in its lifetime parameter `'id`.
///
/// Invariance keeps the compiler from shrinking one traversal's brand to unify
/// it with another, so per-traversal state stays bound to the call that made it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvariantLifetime<'id>(PhantomData<fn(&'id ()) -> &'id ()>);

impl<'id> InvariantLifetime<'id> {
    /// Creates a new invariant lifetime marker.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}
