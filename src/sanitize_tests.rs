use super::*;
use crate::mock::MockSurface;

fn limits() -> SanitizeLimits {
    SanitizeLimits::default()
}

#[test]
fn test_drops_non_whitelisted_attributes() {
    let mut page = MockSurface::new(800.0, 600.0);
    let button = page.element(page.root(), "button");
    page.set_attr(button, "onclick", "doThing()");
    page.set_attr(button, "aria-label", "Submit");
    page.set_attr(button, "style", "color:red");

    let output = sanitize(&page, button, &limits()).unwrap();
    assert_eq!(output, "<button aria-label=\"Submit\"></button>");
}

#[test]
fn test_keeps_whitelisted_prefixes() {
    let mut page = MockSurface::new(800.0, 600.0);
    let div = page.element(page.root(), "div");
    page.set_attr(div, "data-test-id", "cart");
    page.set_attr(div, "aria-expanded", "true");
    page.set_attr(div, "placeholder", "Search");

    let output = sanitize(&page, div, &limits()).unwrap();
    assert!(output.contains("data-test-id=\"cart\""));
    assert!(output.contains("aria-expanded=\"true\""));
    assert!(output.contains("placeholder=\"Search\""));
}

#[test]
fn test_src_reduced_to_basename() {
    let mut page = MockSurface::new(800.0, 600.0);
    let img = page.element(page.root(), "img");
    page.set_attr(img, "src", "https://cdn.example.com/assets/icons/cart.svg");

    let output = sanitize(&page, img, &limits()).unwrap();
    assert!(output.contains("src=\"cart.svg\""));
    assert!(!output.contains("cdn.example.com"));
}

#[test]
fn test_long_basename_keeps_trailing_chars() {
    let mut page = MockSurface::new(800.0, 600.0);
    let link = page.element(page.root(), "a");
    let name = "abcdefghijklmnopqrstuvwxyz0123456789.html";
    page.set_attr(link, "href", &format!("/files/{name}"));

    let output = sanitize(&page, link, &limits()).unwrap();
    let expected: String = name.chars().skip(name.chars().count() - 25).collect();
    assert!(output.contains(&format!("href=\"{expected}\"")));
}

#[test]
fn test_long_value_truncated_with_ellipsis() {
    let mut page = MockSurface::new(800.0, 600.0);
    let input = page.element(page.root(), "input");
    let value = "x".repeat(80);
    page.set_attr(input, "value", &value);

    let output = sanitize(&page, input, &limits()).unwrap();
    let expected = format!("value=\"{}..\"", "x".repeat(48));
    assert!(output.contains(&expected));
    assert!(!output.contains(&"x".repeat(49)));
}

#[test]
fn test_text_nodes_trimmed_and_empty_skipped() {
    let mut page = MockSurface::new(800.0, 600.0);
    let div = page.element(page.root(), "div");
    page.text_node(div, "  hello  ", None);
    page.text_node(div, "   ", None);
    let span = page.element(div, "span");
    page.text_node(span, "world", None);

    let output = sanitize(&page, div, &limits()).unwrap();
    assert_eq!(output, "<div>hello<span>world</span></div>");
}

#[test]
fn test_escapes_markup_characters() {
    let mut page = MockSurface::new(800.0, 600.0);
    let div = page.element(page.root(), "div");
    page.set_attr(div, "title", "a \"quoted\" <value>");
    page.text_node(div, "1 < 2 & 3 > 2", None);

    let output = sanitize(&page, div, &limits()).unwrap();
    assert!(output.contains("title=\"a &quot;quoted&quot; &lt;value&gt;\""));
    assert!(output.contains("1 &lt; 2 &amp; 3 &gt; 2"));
}

#[test]
fn test_shadow_content_not_serialized() {
    let mut page = MockSurface::new(800.0, 600.0);
    let host = page.element(page.root(), "widget-host");
    let shadow = page.attach_shadow(host);
    let hidden = page.element(shadow, "button");
    page.set_attr(hidden, "aria-label", "hidden");

    let output = sanitize(&page, host, &limits()).unwrap();
    assert_eq!(output, "<widget-host></widget-host>");
}

#[test]
fn test_truncation_is_char_boundary_safe() {
    let mut page = MockSurface::new(800.0, 600.0);
    let div = page.element(page.root(), "div");
    page.set_attr(div, "title", &"é".repeat(60));

    let output = sanitize(&page, div, &limits()).unwrap();
    assert!(output.contains(&format!("title=\"{}..\"", "é".repeat(48))));
}
