//! Unified error type.

use thiserror::Error as ThisError;

/// The error type returned by routescope's fallible operations.
///
/// Discovery itself never fails: a missing stack is a
/// [`Notice`](crate::Notice), an unreadable matcher decodes to `/`. This type
/// surfaces the outer-surface failures only: reading a dump or a settings
/// file, and writing the rendered listing.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
