//! Point-based resolution of the topmost rendered element.

use tracing::warn;

use crate::surface::{NodeId, RenderSurface, SurfaceResult};

/// Topmost rendered element at viewport point `(x, y)`.
///
/// Resolves against the main document first, then while the hit element
/// hosts a shadow tree, re-resolves inside that tree at the same point.
/// Stops once the hit stabilizes: no shadow root, no inner hit, or the inner
/// hit is the element already held. `Ok(None)` means nothing paints at the
/// point (including points outside the viewport); callers treat that as
/// unobstructed.
pub fn topmost_at<S>(
    surface: &S,
    x: f64,
    y: f64,
    max_shadow_depth: usize,
) -> SurfaceResult<Option<NodeId>>
where
    S: RenderSurface + ?Sized,
{
    let root = surface.document_root()?;
    let Some(mut element) = surface.element_from_point(root, x, y)? else {
        return Ok(None);
    };

    let mut depth = 0;
    while let Some(shadow) = surface.shadow_root(element)? {
        if depth >= max_shadow_depth {
            warn!(
                "hit testing stopped after {} nested shadow trees at ({}, {})",
                max_shadow_depth, x, y
            );
            break;
        }
        depth += 1;
        match surface.element_from_point(shadow, x, y)? {
            Some(inner) if inner != element => element = inner,
            _ => break,
        }
    }

    Ok(Some(element))
}

#[cfg(test)]
#[path = "occlusion_tests.rs"]
mod tests;
