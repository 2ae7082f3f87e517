//! Pipeline errors.

use thiserror::Error;

use crate::surface::SurfaceError;

/// Errors that abort a scan.
///
/// Per-element degradations (a sanitizer failure, an unresolvable hit test)
/// are handled in place and never show up here; a scan either returns the
/// full result set or fails as a whole.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The host oracle failed mid-scan.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
