use std::collections::HashSet;

use orthomark_core::Point;
use orthomark_designer::{ShapeColor, ShapeStore, SnapIndex};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    0.0f64..500.0
}

fn segments() -> impl Strategy<Value = Vec<(f64, f64, f64, f64)>> {
    prop::collection::vec((coord(), coord(), coord(), coord()), 0..20)
}

proptest! {
    /// A snap either returns the query untouched or an endpoint within the radius
    #[test]
    fn prop_snap_stays_within_threshold(
        segs in segments(),
        qx in coord(),
        qy in coord(),
        threshold in 0.5f64..30.0,
    ) {
        let mut store = ShapeStore::new();
        for (x1, y1, x2, y2) in &segs {
            store.add_line(Point::new(*x1, *y1), Point::new(*x2, *y2), ShapeColor::Blue);
        }
        let query = Point::new(qx, qy);
        let result = SnapIndex::new(&store).find_nearest(query, threshold);

        match result.shape {
            Some(id) => {
                let line = store.get(id).and_then(|s| s.as_line()).copied();
                prop_assert!(line.is_some_and(|l| l.has_endpoint(&result.point)));
                prop_assert!(result.point.distance_to(&query) <= threshold);
            }
            None => {
                prop_assert_eq!(result.point, query);
                let nearest = SnapIndex::new(&store).nearest_endpoint(query);
                prop_assert!(nearest.is_none_or(|(_, _, d)| d > threshold));
            }
        }
    }

    /// Ids stay unique across interleaved adds and removals
    #[test]
    fn prop_ids_never_reused(segs in segments(), remove_every in 1usize..4) {
        let mut store = ShapeStore::new();
        let mut seen = HashSet::new();
        for (i, (x1, y1, x2, y2)) in segs.iter().enumerate() {
            let id = store.add_line(Point::new(*x1, *y1), Point::new(*x2, *y2), ShapeColor::Red);
            prop_assert!(seen.insert(id));
            if i % remove_every == 0 {
                prop_assert!(store.remove(id).is_some());
                prop_assert!(!store.contains(id));
            }
        }
    }
}
