//! Property-based tests for drop zone classification

use proptest::prelude::*;

use dbdock_core::layout::{DropZone, EdgeThreshold, Point, Rect, resolve_zone};

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500.0f64..500.0, -500.0f64..500.0, 50.0f64..2000.0, 50.0f64..2000.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Points in a horizontal band classify horizontally whatever their y.
    #[test]
    fn prop_horizontal_bands_win(
        bounds in rect_strategy(),
        fx in 0.0f64..0.2499,
        fy in 0.0f64..1.0,
    ) {
        let y = bounds.y + fy * bounds.height;
        let left = Point::new(bounds.x + fx * bounds.width, y);
        let right = Point::new(bounds.x + bounds.width - fx * bounds.width, y);
        prop_assert_eq!(resolve_zone(&bounds, left, EdgeThreshold::CONTENT), DropZone::Left);
        // `right` sits strictly inside the band unless fx is 0 at the very edge.
        let zone = resolve_zone(&bounds, right, EdgeThreshold::CONTENT);
        if fx > 0.0 {
            prop_assert_eq!(zone, DropZone::Right);
        }
    }

    /// The inner rectangle between all bands is center.
    #[test]
    fn prop_inner_region_is_center(
        bounds in rect_strategy(),
        fx in 0.26f64..0.74,
        fy in 0.26f64..0.74,
    ) {
        let pointer = Point::new(bounds.x + fx * bounds.width, bounds.y + fy * bounds.height);
        prop_assert_eq!(resolve_zone(&bounds, pointer, EdgeThreshold::CONTENT), DropZone::Center);
    }

    /// Vertical bands apply only outside the horizontal bands.
    #[test]
    fn prop_vertical_bands_between_horizontal_ones(
        bounds in rect_strategy(),
        fx in 0.26f64..0.74,
        fy in 0.001f64..0.2499,
    ) {
        let x = bounds.x + fx * bounds.width;
        let top = Point::new(x, bounds.y + fy * bounds.height);
        let bottom = Point::new(x, bounds.y + bounds.height - fy * bounds.height);
        prop_assert_eq!(resolve_zone(&bounds, top, EdgeThreshold::CONTENT), DropZone::Top);
        prop_assert_eq!(resolve_zone(&bounds, bottom, EdgeThreshold::CONTENT), DropZone::Bottom);
    }

    /// Classification depends only on the pointer relative to the target.
    #[test]
    fn prop_translation_invariant(
        bounds in rect_strategy(),
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
        dx in -1000i32..1000,
        dy in -1000i32..1000,
    ) {
        let pointer = Point::new(bounds.x + fx * bounds.width, bounds.y + fy * bounds.height);
        let moved = Rect::new(bounds.x + f64::from(dx), bounds.y + f64::from(dy), bounds.width, bounds.height);
        let moved_pointer = Point::new(pointer.x + f64::from(dx), pointer.y + f64::from(dy));
        let relative = Point::new(fx * bounds.width, fy * bounds.height);
        let origin = Rect::sized(bounds.width, bounds.height);
        // Integer shifts of values in a few thousand stay exact enough that
        // both classifications agree away from band edges.
        let a = resolve_zone(&origin, relative, EdgeThreshold::CONTENT);
        let b = resolve_zone(&moved, moved_pointer, EdgeThreshold::CONTENT);
        let near_edge = [0.25, 0.75].iter().any(|e| (fx - e).abs() < 1e-6 || (fy - e).abs() < 1e-6);
        if !near_edge {
            prop_assert_eq!(a, b);
        }
    }

    /// Pixel thresholds are absolute at the ends and leave the full height to center.
    #[test]
    fn prop_pixel_band_is_absolute(
        width in 200.0f64..2000.0,
        px in 4.0f64..48.0,
        offset in 0.0f64..1.0,
    ) {
        let strip = Rect::sized(width, 200.0);
        let inside = offset * (px - 0.01);
        prop_assert_eq!(
            resolve_zone(&strip, Point::new(inside, 100.0), EdgeThreshold::Pixels(px)),
            DropZone::Left
        );
        prop_assert_eq!(
            resolve_zone(&strip, Point::new(px + 1.0, 100.0), EdgeThreshold::Pixels(px)),
            DropZone::Center
        );
        prop_assert_eq!(
            resolve_zone(&strip, Point::new(width / 2.0, offset * 200.0), EdgeThreshold::Pixels(px)),
            DropZone::Center
        );
    }
}
