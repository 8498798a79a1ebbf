//! Error type shared by the lookup and removal paths.

use thiserror::Error;

/// Failures surfaced by [`BucketMap`](crate::BucketMap) operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// `get` without a default, or `delete`, on an absent key.
    #[error("key does not exist")]
    KeyNotFound,
}

pub type Result<T> = core::result::Result<T, MapError>;
