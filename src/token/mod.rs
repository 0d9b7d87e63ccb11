//! `GhostToken` - the brand that scopes one traversal's shared state.
//!
//! Every traversal opens a fresh brand with [`GhostToken::new`]. The visited
//! flags and frontiers created inside that closure carry the `'brand` lifetime,
//! so none of them can be returned from the call or mixed with the state of
//! another traversal.
//!
//! ## Core invariant (linearity)
//!
//! `GhostToken<'brand>` is intentionally **not** `Copy`/`Clone`. Workers receive
//! `&GhostToken<'brand>`, which is enough to push to and pop from branded
//! frontiers but never enough to create a second brand.

/// Invariant lifetime definitions for branding.
pub mod invariant;

pub use invariant::InvariantLifetime;

/// A zero-sized token naming one traversal scope.
#[derive(Debug)]
pub struct GhostToken<'brand>(InvariantLifetime<'brand>);

impl<'brand> GhostToken<'brand> {
    /// Creates a new token and executes a closure with it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use parbfs::GhostToken;
    ///
    /// let answer = GhostToken::new(|token| {
    ///     assert!(token.is_valid());
    ///     42
    /// });
    /// assert_eq!(answer, 42);
    /// ```
    pub fn new<F, R>(f: F) -> R
    where
        F: for<'new_brand> FnOnce(GhostToken<'new_brand>) -> R,
    {
        f(GhostToken(InvariantLifetime::new()))
    }

    /// Returns whether the token represents a valid branding scope.
    ///
    /// This is always true for valid tokens, but allows for const evaluation.
    #[inline(always)]
    pub const fn is_valid(&self) -> bool {
        true
    }
}

// `GhostToken<'brand>` holds no data. Sharing `&GhostToken<'brand>` with pool
// workers only proves membership in the scope; exclusive operations would need
// `&mut GhostToken<'brand>`, which cannot coexist with those shared borrows.
unsafe impl<'brand> Sync for GhostToken<'brand> {}
