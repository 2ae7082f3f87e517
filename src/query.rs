//! Shadow-piercing element enumeration over a render surface.

use std::collections::{HashSet, VecDeque};

use tracing::warn;

use crate::surface::{NodeId, NodeKind, RenderSurface, SurfaceResult};

/// Default cap on nested shadow tree depth. Conformant hosts never get close;
/// the cap stops a malformed self-referential structure from spinning.
pub const DEFAULT_MAX_SHADOW_DEPTH: usize = 32;

/// Collect every element under `root` matching `predicate`, descending into
/// every nested shadow tree reachable from the walked elements.
///
/// Matches within one tree scope come out in document order; shadow scopes
/// are queued in the order their hosts are visited and walked afterwards, so
/// the overall order is deterministic. Already-visited scopes are skipped and
/// scopes nested deeper than `max_shadow_depth` are dropped with a warning
/// rather than failing the walk.
pub fn deep_query<S>(
    surface: &S,
    root: NodeId,
    max_shadow_depth: usize,
    mut predicate: impl FnMut(NodeId) -> SurfaceResult<bool>,
) -> SurfaceResult<Vec<NodeId>>
where
    S: RenderSurface + ?Sized,
{
    let mut matches = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut scopes: VecDeque<(NodeId, usize)> = VecDeque::new();
    scopes.push_back((root, 0));

    while let Some((scope, depth)) = scopes.pop_front() {
        if !visited.insert(scope) {
            continue;
        }
        if depth > max_shadow_depth {
            warn!(
                "shadow trees nested deeper than {} levels, not descending further",
                max_shadow_depth
            );
            continue;
        }

        // Depth-first walk of this scope's light tree, document order.
        let mut stack = vec![scope];
        while let Some(node) = stack.pop() {
            match surface.kind(node)? {
                NodeKind::Text => continue,
                NodeKind::Element => {
                    if predicate(node)? {
                        matches.push(node);
                    }
                    if let Some(shadow) = surface.shadow_root(node)? {
                        scopes.push_back((shadow, depth + 1));
                    }
                }
                NodeKind::ShadowRoot => {}
            }
            for child in surface.children(node)?.into_iter().rev() {
                stack.push(child);
            }
        }
    }

    Ok(matches)
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
