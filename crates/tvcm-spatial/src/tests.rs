//! Unit tests for tvcm-spatial.
//!
//! All tests use small hand-sized grids so results can be checked by eye.

#[cfg(test)]
mod grid {
    use tvcm_core::{CellId, SimRng, Vec2};

    use crate::{Grid, SpatialError};

    #[test]
    fn rejects_empty_grid() {
        assert!(Grid::new(0, 3, 10.0).is_err());
        assert!(Grid::new(3, 3, 0.0).is_err());
    }

    #[test]
    fn cell_bounds_column_major() {
        // 3 × 2 grid: cell = gx * Gy + gy
        let grid = Grid::new(3, 2, 10.0).unwrap();
        assert_eq!(grid.cell_count(), 6);
        assert_eq!(grid.cell_coords(CellId(3)), (1, 1));

        let r = grid.cell_bounds(CellId(3)).unwrap();
        assert_eq!(r.min, Vec2::new(10.0, 10.0));
        assert_eq!(r.max, Vec2::new(20.0, 20.0));

        let r = grid.cell_bounds(CellId(4)).unwrap();
        assert_eq!(r.min, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn cell_bounds_out_of_range() {
        let grid = Grid::new(2, 2, 10.0).unwrap();
        assert!(matches!(
            grid.cell_bounds(CellId(4)),
            Err(SpatialError::CellOutOfRange { cell_count: 4, .. })
        ));
    }

    #[test]
    fn cell_of_inverts_bounds() {
        let grid = Grid::new(4, 3, 25.0).unwrap();
        for c in 0..grid.cell_count() {
            let r = grid.cell_bounds(CellId(c)).unwrap();
            let mid = Vec2::new((r.min.x + r.max.x) / 2.0, (r.min.y + r.max.y) / 2.0);
            assert_eq!(grid.cell_of(mid), Some(CellId(c)));
        }
        assert_eq!(grid.cell_of(Vec2::new(-1.0, 5.0)), None);
        assert_eq!(grid.cell_of(Vec2::new(100.0, 5.0)), None);
    }

    #[test]
    fn random_cell_except_never_returns_excluded() {
        let grid = Grid::new(2, 2, 10.0).unwrap();
        let mut rng = SimRng::new(11);
        let mut seen = [false; 4];
        for _ in 0..1000 {
            let c = grid.random_cell_except(CellId(2), &mut rng);
            assert_ne!(c, CellId(2));
            seen[c.index()] = true;
        }
        assert_eq!(seen, [true, true, false, true]);
    }

    #[test]
    fn random_cell_except_single_cell_grid() {
        let grid = Grid::new(1, 1, 10.0).unwrap();
        let mut rng = SimRng::new(0);
        assert_eq!(grid.random_cell_except(CellId(0), &mut rng), CellId(0));
    }
}

#[cfg(test)]
mod layout {
    use std::collections::HashSet;

    use tvcm_core::{NodeId, SimRng};

    use crate::{CommunityLayout, Grid};

    #[test]
    fn distinct_communities_and_even_split() {
        let grid = Grid::new(6, 6, 100.0).unwrap();
        let mut rng = SimRng::new(42);
        let layout = CommunityLayout::new(&grid, 10, 505, &mut rng).unwrap();

        let distinct: HashSet<_> = layout.communities().iter().collect();
        assert_eq!(distinct.len(), 10);
        assert_eq!(layout.node_count(), 505);

        // 505 / 10 = 50, remainder 5 goes to the first community.
        assert_eq!(layout.members(0).count(), 55);
        for k in 1..10 {
            assert_eq!(layout.members(k).count(), 50);
        }
    }

    #[test]
    fn contiguous_blocks_match_home_cells() {
        let grid = Grid::new(3, 3, 10.0).unwrap();
        let mut rng = SimRng::new(5);
        let layout = CommunityLayout::new(&grid, 3, 7, &mut rng).unwrap();
        for k in 0..3 {
            let cell = layout.communities()[k];
            for node in layout.members(k) {
                assert_eq!(layout.home_cell(node), cell);
            }
        }
        assert!(layout.same_community(NodeId(0), NodeId(2)));
        assert!(!layout.same_community(NodeId(0), NodeId(6)));
    }

    #[test]
    fn too_many_communities_rejected() {
        let grid = Grid::new(2, 2, 10.0).unwrap();
        let mut rng = SimRng::new(0);
        assert!(CommunityLayout::new(&grid, 5, 10, &mut rng).is_err());
        assert!(CommunityLayout::new(&grid, 0, 10, &mut rng).is_err());
        assert!(CommunityLayout::new(&grid, 2, 0, &mut rng).is_err());
    }

    #[test]
    fn same_seed_same_layout() {
        let grid = Grid::new(6, 6, 100.0).unwrap();
        let a = CommunityLayout::new(&grid, 10, 100, &mut SimRng::new(9)).unwrap();
        let b = CommunityLayout::new(&grid, 10, 100, &mut SimRng::new(9)).unwrap();
        assert_eq!(a.home_cells(), b.home_cells());
    }
}

#[cfg(test)]
mod contact {
    use tvcm_core::{NodeId, Vec2};

    use crate::ContactDetector;

    #[test]
    fn strictly_less_than_radius() {
        let det = ContactDetector::new(5.0);
        let positions = [Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0), Vec2::new(0.0, 4.9)];
        let pairs = det.detect(&positions);
        // 0–1 exactly at the radius: excluded.  0–2 at 4.9: included.
        assert_eq!(pairs.into_iter().collect::<Vec<_>>(), vec![(NodeId(0), NodeId(2))]);
    }

    #[test]
    fn pairs_are_canonical_and_deterministic() {
        let det = ContactDetector::new(3.0);
        let positions: Vec<Vec2> = (0..30)
            .map(|i| Vec2::new((i % 6) as f64 * 2.0, (i / 6) as f64 * 2.0))
            .collect();
        let a = det.detect(&positions);
        let b = det.detect(&positions);
        assert_eq!(a, b);
        assert!(!a.is_empty());
        for (i, j) in &a {
            assert!(i < j);
            assert!(positions[i.index()].distance(positions[j.index()]) < 3.0);
        }
    }

    #[test]
    fn huge_radius_returns_every_pair() {
        let det = ContactDetector::new(1.0e6);
        let positions: Vec<Vec2> = (0..12).map(|i| Vec2::new(i as f64 * 7.0, 3.0)).collect();
        assert_eq!(det.detect(&positions).len(), 12 * 11 / 2);
    }

    #[test]
    fn coincident_points_are_in_contact() {
        let det = ContactDetector::new(1.0);
        let p = Vec2::new(4.0, 4.0);
        let pairs = det.detect(&[p, p, p]);
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn empty_and_singleton() {
        let det = ContactDetector::new(10.0);
        assert!(det.detect(&[]).is_empty());
        assert!(det.detect(&[Vec2::new(1.0, 1.0)]).is_empty());
    }
}
