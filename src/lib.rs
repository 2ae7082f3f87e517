//! Occlusion-aware detection of interactable targets on a rendered page.
//!
//! Scans a rendered document behind a [`RenderSurface`] oracle and returns a
//! compact, coordinate-anchored inventory of everything an agent could
//! click, focus, or read: click coordinates, bounding geometry normalized to
//! the viewport, and a representative text label per target.
//!
//! ## Pipeline
//!
//! 1. Select candidates: focusable tags, ARIA/onclick annotations, media.
//! 2. Keep only client rects whose center actually paints the candidate
//!    (point-based hit testing through nested shadow trees).
//! 3. Drop candidates left with less than a square pixel of area.
//! 4. Keep the innermost of nested candidates.
//! 5. Label each survivor: inner text node, full text, or a sanitized
//!    markup surrogate; normalize geometry against the viewport snapshot.
//!
//! The whole scan is synchronous and stateless; each call reads the
//! viewport once and normalizes everything against that snapshot.
//!
//! ## Example
//!
//! ```
//! use clickprobe::{MockSurface, Rect, scan};
//!
//! let mut page = MockSurface::new(100.0, 50.0);
//! let button = page.element(page.root(), "button");
//! page.set_attr(button, "aria-label", "Go");
//! page.add_rect(button, Rect::new(0.0, 0.0, 100.0, 50.0));
//!
//! let output = scan(&page).unwrap();
//! assert_eq!(output.results.len(), 1);
//! assert!(output.results[0].text_content.contains("aria-label=\"Go\""));
//! ```

mod detect;
mod error;
mod geometry;
mod mock;
mod occlusion;
mod query;
mod sanitize;
mod surface;

pub use detect::{DetectOptions, DetectionResult, ScanOutput, scan, scan_with};
pub use error::ProbeError;
pub use geometry::{NormalizedBox, Rect, Viewport};
pub use mock::MockSurface;
pub use occlusion::topmost_at;
pub use query::{DEFAULT_MAX_SHADOW_DEPTH, deep_query};
pub use sanitize::{SanitizeLimits, sanitize};
pub use surface::{NodeId, NodeKind, RenderSurface, SurfaceError, SurfaceResult};
