//! Property tests for the layout, hit-testing and viewport invariants.

use std::collections::HashSet;

use proptest::prelude::*;

use process_canvas::config::ZoomConfig;
use process_canvas::geometry::{Point, Rect, contains_local};
use process_canvas::{Grid, Step, StepKind, Viewport, compute_layout};

fn kind_strategy() -> impl Strategy<Value = StepKind> {
    prop_oneof![
        Just(StepKind::Start),
        Just(StepKind::Process),
        Just(StepKind::Decision),
        Just(StepKind::End),
    ]
}

/// Up to 30 steps with ids drawn from a small pool, so repeats happen.
fn steps_strategy() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(
        (0u8..20, kind_strategy(), prop::collection::vec(0u8..25, 0..4)),
        0..30,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(id, kind, next)| {
                Step::new(format!("S{id}"), kind)
                    .with_next(next.into_iter().map(|n| format!("S{n}")))
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_grid_holds_every_step(n in 0usize..500) {
        let grid = Grid::for_count(n);
        prop_assert!(grid.columns * grid.rows >= n);
        if n > 0 {
            // No empty trailing row.
            prop_assert!(grid.columns * (grid.rows - 1) < n);
            prop_assert!(grid.rows <= grid.columns);
        }
    }

    #[test]
    fn prop_one_position_per_unique_id(
        steps in steps_strategy(),
        width in 200.0f64..3000.0,
        height in 200.0f64..3000.0,
    ) {
        let layout = compute_layout(&steps, width, height);
        let unique: HashSet<&str> = steps.iter().map(|s| s.id.as_str()).collect();
        prop_assert_eq!(layout.positions.len(), unique.len());
        for id in &unique {
            prop_assert!(layout.position(id).is_some());
        }
    }

    #[test]
    fn prop_one_connection_per_next_id(steps in steps_strategy()) {
        let layout = compute_layout(&steps, 800.0, 600.0);
        let expected: usize = steps.iter().map(|s| s.next_ids.len()).sum();
        prop_assert_eq!(layout.connections.len(), expected);
    }

    #[test]
    fn prop_layout_is_deterministic(steps in steps_strategy()) {
        prop_assert_eq!(
            compute_layout(&steps, 1024.0, 768.0),
            compute_layout(&steps, 1024.0, 768.0)
        );
    }

    #[test]
    fn prop_center_inside_far_point_outside(
        kind in kind_strategy(),
        w in 1.0f64..500.0,
        h in 1.0f64..500.0,
        angle in 0.0f64..std::f64::consts::TAU,
    ) {
        prop_assert!(contains_local(kind, Point::ORIGIN, w, h));
        let far = Point::new(w * angle.cos(), h * angle.sin());
        prop_assert!(!contains_local(kind, far, w, h));
    }

    #[test]
    fn prop_zoom_stays_in_bounds(ops in prop::collection::vec(any::<bool>(), 0..60)) {
        let cfg = ZoomConfig::default();
        let mut vp = Viewport::new();
        for zoom_in in ops {
            if zoom_in {
                vp.zoom_in(&cfg);
            } else {
                vp.zoom_out(&cfg);
            }
            prop_assert!(vp.zoom >= cfg.min && vp.zoom <= cfg.max);
        }
    }

    #[test]
    fn prop_fit_centers_content(
        x in -2000.0f64..2000.0,
        y in -2000.0f64..2000.0,
        w in 1.0f64..3000.0,
        h in 1.0f64..3000.0,
    ) {
        let cfg = ZoomConfig::default();
        let content = Rect::new(x, y, w, h);
        let mut vp = Viewport::new();
        prop_assert!(vp.fit_to_content(Some(content), 800.0, 600.0, &cfg));
        prop_assert!(vp.zoom >= cfg.min && vp.zoom <= cfg.max);
        let c = vp.logical_to_screen(content.center());
        prop_assert!((c.x - 400.0).abs() < 1e-6);
        prop_assert!((c.y - 300.0).abs() < 1e-6);
    }
}
