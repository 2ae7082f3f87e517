use super::*;

#[test]
fn test_rect_area_and_center() {
    let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(rect.area(), 5000.0);
    assert_eq!(rect.center(), (60.0, 45.0));
    assert_eq!(rect.right(), 110.0);
    assert_eq!(rect.bottom(), 70.0);
}

#[test]
fn test_rect_contains() {
    let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert!(rect.contains(50.0, 40.0));
    assert!(rect.contains(10.0, 20.0));
    assert!(!rect.contains(0.0, 0.0));
    assert!(!rect.contains(200.0, 40.0));
}

#[test]
fn test_normalize() {
    let viewport = Viewport {
        width: 200.0,
        height: 100.0,
    };
    let rect = Rect::new(50.0, 25.0, 100.0, 50.0);
    let normalized = rect.normalize(&viewport);
    assert_eq!(normalized, NormalizedBox(0.25, 0.25, 0.75, 0.75));
}

#[test]
fn test_normalize_roundtrip() {
    let viewport = Viewport {
        width: 1366.0,
        height: 768.0,
    };
    let rect = Rect::new(13.5, 271.25, 333.0, 41.75);
    let back = rect.normalize(&viewport).denormalize(&viewport);
    assert!((back.left - rect.left).abs() < 1e-9);
    assert!((back.top - rect.top).abs() < 1e-9);
    assert!((back.width - rect.width).abs() < 1e-9);
    assert!((back.height - rect.height).abs() < 1e-9);
}

#[test]
fn test_normalize_off_screen_exceeds_unit_range() {
    let viewport = Viewport {
        width: 100.0,
        height: 100.0,
    };
    let rect = Rect::new(-10.0, 50.0, 200.0, 60.0);
    let normalized = rect.normalize(&viewport);
    assert!(normalized.0 < 0.0);
    assert!(normalized.2 > 1.0);
    assert!(normalized.3 > 1.0);
}

#[test]
fn test_viewport_serializes_as_pair() {
    let viewport = Viewport {
        width: 100.0,
        height: 50.0,
    };
    let json = serde_json::to_value(viewport).unwrap();
    assert_eq!(json, serde_json::json!([100.0, 50.0]));
}

#[test]
fn test_normalized_box_serializes_as_array() {
    let json = serde_json::to_value(NormalizedBox(0.0, 0.25, 0.5, 1.0)).unwrap();
    assert_eq!(json, serde_json::json!([0.0, 0.25, 0.5, 1.0]));
}
