//! The candidate pipeline: select, hit-test, filter, dedup, label, normalize.
//!
//! Each stage is a pure function consuming one sequence and producing the
//! next; the only shared inputs are the surface and the viewport snapshot
//! taken at the start of the scan.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProbeError;
use crate::geometry::{NormalizedBox, Rect, Viewport};
use crate::occlusion::topmost_at;
use crate::query::{DEFAULT_MAX_SHADOW_DEPTH, deep_query};
use crate::sanitize::{SanitizeLimits, sanitize};
use crate::surface::{NodeId, NodeKind, RenderSurface, SurfaceResult};

/// Tags reported for their rendering alone, focusable or not.
const MEDIA_TAGS: &[&str] = &["video", "iframe", "svg"];

/// Form controls, focusable unless disabled.
const FORM_CONTROL_TAGS: &[&str] = &["input", "select", "textarea", "button"];

/// Tuning knobs for a scan.
#[derive(Debug, Clone)]
pub struct DetectOptions {
    /// Candidates whose unobstructed rect areas sum below this (px²) are
    /// treated as invisible and dropped.
    pub min_visible_area: f64,
    /// Defensive cap on nested shadow tree depth for queries and hit tests.
    pub max_shadow_depth: usize,
    /// Truncation limits for the fallback markup surrogate.
    pub sanitize: SanitizeLimits,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            min_visible_area: 1.0,
            max_shadow_depth: DEFAULT_MAX_SHADOW_DEPTH,
            sanitize: SanitizeLimits::default(),
        }
    }
}

/// One interactable target.
///
/// Field names are wire contract; serialized names match the consumer side
/// (`textContent`, `hasText`, `nodeType`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Pixel-space x of the centroid of the first unobstructed rect. Stays
    /// in pixels while the boxes below are normalized; existing consumers
    /// read it that way.
    pub x: f64,
    /// Pixel-space y of the same centroid.
    pub y: f64,
    /// All unobstructed boxes of the element, normalized against the scan
    /// viewport.
    pub bboxs: Vec<NormalizedBox>,
    /// Preferred click region: the first inner text node's box when one
    /// exists, otherwise the first unobstructed box.
    pub rect: NormalizedBox,
    /// Raw outer markup of the element.
    pub html: String,
    /// Representative text: first inner text node, else the element's full
    /// trimmed text, else a sanitized markup surrogate.
    #[serde(rename = "textContent")]
    pub text_content: String,
    /// Whether `textContent` came from actual text rather than the surrogate.
    #[serde(rename = "hasText")]
    pub has_text: bool,
    /// Uppercase tag name.
    #[serde(rename = "nodeType")]
    pub node_type: String,
}

/// Everything one scan produces: the ordered targets, the viewport snapshot
/// the geometry was normalized against, and the document title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOutput {
    pub results: Vec<DetectionResult>,
    pub viewport: Viewport,
    pub title: String,
}

/// An element that matched the interactive predicate, with the rects whose
/// center actually paints it.
#[derive(Debug, Clone)]
struct Candidate {
    node: NodeId,
    rects: Vec<Rect>,
}

/// Scan the surface with default options.
pub fn scan<S>(surface: &S) -> Result<ScanOutput, ProbeError>
where
    S: RenderSurface + ?Sized,
{
    scan_with(surface, &DetectOptions::default())
}

/// Scan the surface for interactable targets.
///
/// Runs synchronously to completion on the calling thread. Holds no state
/// between calls; against an unchanged document the output is identical run
/// to run.
pub fn scan_with<S>(surface: &S, options: &DetectOptions) -> Result<ScanOutput, ProbeError>
where
    S: RenderSurface + ?Sized,
{
    let viewport = surface.viewport()?;
    let title = surface.title()?;
    let root = surface.document_root()?;

    let selected = deep_query(surface, root, options.max_shadow_depth, |node| {
        is_candidate(surface, node)
    })?;
    debug!("selected {} interactive candidates", selected.len());

    let with_geometry = resolve_geometry(surface, &selected, options)?;
    let visible = filter_visible(with_geometry, options);
    let survivors = dedup_contained(surface, visible)?;
    debug!(
        "{} targets survive visibility and containment filtering",
        survivors.len()
    );

    let mut results = Vec::with_capacity(survivors.len());
    for candidate in &survivors {
        results.push(extract(surface, candidate, viewport, options)?);
    }

    Ok(ScanOutput {
        results,
        viewport,
        title,
    })
}

/// The interactive predicate.
///
/// Matches focusable tags (`a`/`area` with `href`, non-disabled form
/// controls, `iframe`, explicit `tabindex`, `contenteditable`) unless the
/// element opted out of the tab order with `tabindex="-1"`; elements
/// annotated with `role`/`aria-label`/`onclick` regardless of tab order; and
/// media tags that render without being focusable.
fn is_candidate<S>(surface: &S, node: NodeId) -> SurfaceResult<bool>
where
    S: RenderSurface + ?Sized,
{
    let tag = surface.tag_name(node)?.to_ascii_lowercase();
    if MEDIA_TAGS.contains(&tag.as_str()) {
        return Ok(true);
    }

    if surface.attribute(node, "role")?.is_some()
        || surface.attribute(node, "aria-label")?.is_some()
        || surface.attribute(node, "onclick")?.is_some()
    {
        return Ok(true);
    }

    // The focusable group only; tabindex="-1" removes an element from it.
    let tabindex = surface.attribute(node, "tabindex")?;
    if tabindex.as_deref() == Some("-1") {
        return Ok(false);
    }
    if tabindex.is_some() {
        return Ok(true);
    }

    let focusable = match tag.as_str() {
        "a" | "area" => surface.attribute(node, "href")?.is_some(),
        _ if FORM_CONTROL_TAGS.contains(&tag.as_str()) => {
            surface.attribute(node, "disabled")?.is_none()
        }
        _ => false,
    };
    if focusable {
        return Ok(true);
    }

    Ok(surface.attribute(node, "contenteditable")?.as_deref() == Some("true"))
}

/// Keep each client rect iff the topmost element at its center is the
/// candidate itself or something the candidate contains, i.e. the candidate
/// is what actually paints there. An unresolved center keeps the rect;
/// "nothing at this point" is read as unobstructed, not as occluded.
fn resolve_geometry<S>(
    surface: &S,
    selected: &[NodeId],
    options: &DetectOptions,
) -> SurfaceResult<Vec<Candidate>>
where
    S: RenderSurface + ?Sized,
{
    let mut candidates = Vec::with_capacity(selected.len());
    for &node in selected {
        let mut rects = Vec::new();
        for rect in surface.client_rects(node)? {
            let (center_x, center_y) = rect.center();
            let keep = match topmost_at(surface, center_x, center_y, options.max_shadow_depth)? {
                None => true,
                Some(hit) => hit == node || surface.contains(node, hit)?,
            };
            if keep {
                rects.push(rect);
            }
        }
        candidates.push(Candidate { node, rects });
    }
    Ok(candidates)
}

/// Drop candidates whose surviving rects sum to less than the minimum
/// visible area; sub-pixel leftovers count as invisible.
fn filter_visible(candidates: Vec<Candidate>, options: &DetectOptions) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|candidate| {
            candidate.rects.iter().map(Rect::area).sum::<f64>() >= options.min_visible_area
        })
        .collect()
}

/// Keep only the innermost of nested candidates: a candidate containing
/// another candidate in the batch is redundant with it. Pairwise over the
/// batch; candidate counts on real pages stay small enough for this.
fn dedup_contained<S>(surface: &S, candidates: Vec<Candidate>) -> SurfaceResult<Vec<Candidate>>
where
    S: RenderSurface + ?Sized,
{
    let mut survivors = Vec::with_capacity(candidates.len());
    'outer: for (index, candidate) in candidates.iter().enumerate() {
        for (other_index, other) in candidates.iter().enumerate() {
            if index != other_index && surface.contains(candidate.node, other.node)? {
                continue 'outer;
            }
        }
        survivors.push(candidate.clone());
    }
    Ok(survivors)
}

/// Build the output record for one surviving candidate.
fn extract<S>(
    surface: &S,
    candidate: &Candidate,
    viewport: Viewport,
    options: &DetectOptions,
) -> Result<DetectionResult, ProbeError>
where
    S: RenderSurface + ?Sized,
{
    let node = candidate.node;
    let bboxs: Vec<NormalizedBox> = candidate
        .rects
        .iter()
        .map(|rect| rect.normalize(&viewport))
        .collect();

    // The first inner text node gives a natural click target inside larger
    // interactive regions, and its own box beats the element's.
    let mut text_rect = None;
    let mut text_content = match first_text_node(surface, node)? {
        Some(text_node) => {
            text_rect = surface.bounding_rect(text_node)?;
            surface.text(text_node)?.trim().to_string()
        }
        None => surface.text_content(node)?.trim().to_string(),
    };

    let has_text = !text_content.is_empty();
    if !has_text {
        text_content = match sanitize(surface, node, &options.sanitize) {
            Ok(surrogate) => surrogate,
            Err(error) => {
                // A broken subtree must not take the batch down; fall back
                // to the raw markup untouched.
                debug!("sanitizer failed, using raw markup: {}", error);
                surface.outer_html(node)?
            }
        };
    }

    let first_rect = candidate.rects.first().copied().unwrap_or_default();
    let (x, y) = first_rect.center();
    let rect = match text_rect {
        Some(rect) => rect.normalize(&viewport),
        None => first_rect.normalize(&viewport),
    };

    Ok(DetectionResult {
        x,
        y,
        bboxs,
        rect,
        html: surface.outer_html(node)?,
        text_content,
        has_text,
        node_type: surface.tag_name(node)?.to_ascii_uppercase(),
    })
}

/// First text node with non-whitespace content in the element's own light
/// subtree, document order.
fn first_text_node<S>(surface: &S, element: NodeId) -> SurfaceResult<Option<NodeId>>
where
    S: RenderSurface + ?Sized,
{
    let mut stack = vec![element];
    while let Some(node) = stack.pop() {
        match surface.kind(node)? {
            NodeKind::Text => {
                if !surface.text(node)?.trim().is_empty() {
                    return Ok(Some(node));
                }
            }
            NodeKind::Element => {
                for child in surface.children(node)?.into_iter().rev() {
                    stack.push(child);
                }
            }
            NodeKind::ShadowRoot => {}
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
