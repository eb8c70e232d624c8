use crate::models::VariantId;

/// Read-only access to call-existence facts.
///
/// This is the only view of the data the clade merge engine needs, so it is
/// kept separate from [`crate::models::Dataset`] to allow evaluating merges
/// against anything that can answer "did kit `i` call variant `v`?".
pub trait CallLookup {
    /// Whether the kit at canonical index `kit` has a direct call for `variant`.
    /// Kits outside `0..kit_count()` have no calls.
    fn has_call(&self, kit: usize, variant: VariantId) -> bool;

    /// Number of kits, in canonical order, that can be queried.
    fn kit_count(&self) -> usize;
}
