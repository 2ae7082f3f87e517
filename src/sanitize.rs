//! Markup surrogate for elements without visible text.
//!
//! Builds a size-bounded, attribute-whitelisted rendition of an element's
//! subtree, used as the label of last resort when a target carries no text.
//! Lossy by design: the output describes an element to an agent, it is not
//! guaranteed to re-parse as HTML.

use crate::surface::{NodeId, NodeKind, RenderSurface, SurfaceResult};

/// Attribute name prefixes that survive sanitization. Prefix match, so
/// `aria` also admits `aria-expanded`, `data-` admits every data attribute.
const KEPT_ATTR_PREFIXES: &[&str] = &[
    "aria",
    "title",
    "alt",
    "label",
    "aria-label",
    "value",
    "src",
    "href",
    "data-",
    "placeholder",
    "role",
    "id",
    "class",
];

/// Truncation limits for retained attribute values.
#[derive(Debug, Clone)]
pub struct SanitizeLimits {
    /// Retained attribute values are clamped to this many characters, with
    /// the cut marked by `".."`.
    pub max_attr_len: usize,
    /// `src`/`href` values are reduced to their path basename first, keeping
    /// at most this many trailing characters.
    pub max_basename_len: usize,
}

impl Default for SanitizeLimits {
    fn default() -> Self {
        Self {
            max_attr_len: 50,
            max_basename_len: 25,
        }
    }
}

/// Render the element's subtree as whitelisted, truncated markup.
pub fn sanitize<S>(surface: &S, element: NodeId, limits: &SanitizeLimits) -> SurfaceResult<String>
where
    S: RenderSurface + ?Sized,
{
    let mut out = String::new();
    write_element(surface, element, limits, &mut out)?;
    Ok(out)
}

fn write_element<S>(
    surface: &S,
    element: NodeId,
    limits: &SanitizeLimits,
    out: &mut String,
) -> SurfaceResult<()>
where
    S: RenderSurface + ?Sized,
{
    let tag = surface.tag_name(element)?.to_ascii_lowercase();
    out.push('<');
    out.push_str(&tag);

    for (name, value) in surface.attributes(element)? {
        if !is_kept_attribute(&name) {
            continue;
        }
        let value = if name == "src" || name == "href" {
            basename(&value, limits.max_basename_len)
        } else {
            value
        };
        let value = truncate(&value, limits.max_attr_len);
        out.push(' ');
        out.push_str(&name);
        out.push_str("=\"");
        out.push_str(&escape_attr(&value));
        out.push('"');
    }
    out.push('>');

    for child in surface.children(element)? {
        match surface.kind(child)? {
            NodeKind::Text => {
                let text = surface.text(child)?;
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    out.push_str(&escape_text(trimmed));
                }
            }
            NodeKind::Element => write_element(surface, child, limits, out)?,
            NodeKind::ShadowRoot => {}
        }
    }

    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
    Ok(())
}

fn is_kept_attribute(name: &str) -> bool {
    KEPT_ATTR_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Last path segment of a URL-ish value, clamped to its trailing characters.
fn basename(value: &str, max_len: usize) -> String {
    let base = value.rsplit('/').next().unwrap_or(value);
    let chars: Vec<char> = base.chars().collect();
    if chars.len() > max_len {
        chars[chars.len() - max_len..].iter().collect()
    } else {
        base.to_string()
    }
}

/// Clamp to `max_len` characters, marking the cut with `".."`.
fn truncate(value: &str, max_len: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > max_len {
        let mut clipped: String = chars[..max_len.saturating_sub(2)].iter().collect();
        clipped.push_str("..");
        clipped
    } else {
        value.to_string()
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
