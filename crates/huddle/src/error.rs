//! Unified error type for the Huddle facade.

use huddle_core::CoreError;
use huddle_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `huddle` facade crate, callers deal with this single
/// error type instead of importing errors from each sub-crate. The
/// `#[from]` attribute on each variant auto-generates `From` impls, so
/// the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum HuddleError {
    /// A core-level error: invalid interval, conflict, denial.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage-level error from a direct store call.
    #[error(transparent)]
    Store(#[from] StoreError),
}
