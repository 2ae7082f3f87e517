use super::*;
use crate::geometry::Rect;
use crate::mock::MockSurface;
use crate::query::DEFAULT_MAX_SHADOW_DEPTH;

#[test]
fn test_resolves_topmost_sibling() {
    let mut page = MockSurface::new(800.0, 600.0);
    let under = page.element(page.root(), "button");
    page.add_rect(under, Rect::new(0.0, 0.0, 100.0, 100.0));
    let over = page.element(page.root(), "div");
    page.add_rect(over, Rect::new(0.0, 0.0, 100.0, 100.0));

    let hit = topmost_at(&page, 50.0, 50.0, DEFAULT_MAX_SHADOW_DEPTH).unwrap();
    assert_eq!(hit, Some(over));
}

#[test]
fn test_pierces_shadow_tree() {
    let mut page = MockSurface::new(800.0, 600.0);
    let host = page.element(page.root(), "widget-host");
    page.add_rect(host, Rect::new(0.0, 0.0, 100.0, 100.0));
    let shadow = page.attach_shadow(host);
    let inner = page.element(shadow, "button");
    page.add_rect(inner, Rect::new(10.0, 10.0, 50.0, 50.0));

    let hit = topmost_at(&page, 30.0, 30.0, DEFAULT_MAX_SHADOW_DEPTH).unwrap();
    assert_eq!(hit, Some(inner));
}

#[test]
fn test_stops_when_shadow_has_no_hit() {
    let mut page = MockSurface::new(800.0, 600.0);
    let host = page.element(page.root(), "widget-host");
    page.add_rect(host, Rect::new(0.0, 0.0, 100.0, 100.0));
    let shadow = page.attach_shadow(host);
    let inner = page.element(shadow, "button");
    page.add_rect(inner, Rect::new(60.0, 60.0, 20.0, 20.0));

    // The point hits the host but nothing inside its shadow tree.
    let hit = topmost_at(&page, 5.0, 5.0, DEFAULT_MAX_SHADOW_DEPTH).unwrap();
    assert_eq!(hit, Some(host));
}

#[test]
fn test_out_of_viewport_is_none() {
    let page = MockSurface::new(800.0, 600.0);
    assert_eq!(
        topmost_at(&page, 1000.0, 50.0, DEFAULT_MAX_SHADOW_DEPTH).unwrap(),
        None
    );
}

#[test]
fn test_pierces_nested_shadow_trees() {
    let mut page = MockSurface::new(800.0, 600.0);
    let host = page.element(page.root(), "outer-host");
    page.add_rect(host, Rect::new(0.0, 0.0, 100.0, 100.0));
    let outer_shadow = page.attach_shadow(host);
    let inner_host = page.element(outer_shadow, "inner-host");
    page.add_rect(inner_host, Rect::new(0.0, 0.0, 100.0, 100.0));
    let inner_shadow = page.attach_shadow(inner_host);
    let target = page.element(inner_shadow, "span");
    page.add_rect(target, Rect::new(0.0, 0.0, 100.0, 100.0));

    let hit = topmost_at(&page, 50.0, 50.0, DEFAULT_MAX_SHADOW_DEPTH).unwrap();
    assert_eq!(hit, Some(target));
}
