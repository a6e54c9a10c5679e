use dont_touch_it::sim::{Level, LevelObject, ObjectSnapshot, is_solvable};
use dont_touch_it::{Direction, Dye, GridPoint};
use proptest::prelude::*;

fn dye() -> impl Strategy<Value = Dye> {
    prop::sample::select(Dye::ALL.to_vec())
}

proptest! {
    #[test]
    fn off_board_queries_are_false(column in -50i32..50, row in -50i32..50) {
        let level = Level::new(6, 4, GridPoint::new(0, 0), GridPoint::new(5, 3)).unwrap();
        let cell = GridPoint::new(column, row);
        let on_board = (0..6).contains(&column) && (0..4).contains(&row);
        prop_assert_eq!(level.is_on_board(cell), on_board);
        if !on_board {
            prop_assert!(!level.is_passable(cell));
            prop_assert!(!level.is_empty(cell));
        }
    }

    #[test]
    fn restore_preserves_objects(
        balls in prop::collection::vec((0i32..6, 0i32..6, dye()), 0..8),
        pedestals in prop::collection::vec((0i32..6, 0i32..6, dye()), 0..8),
    ) {
        let mut level = Level::new(6, 6, GridPoint::new(0, 0), GridPoint::new(5, 5)).unwrap();
        for &(c, r, d) in &pedestals {
            level.add_object(LevelObject::pedestal(GridPoint::new(c, r), d));
        }
        for &(c, r, d) in &balls {
            level.add_object(LevelObject::ball(GridPoint::new(c, r), d));
        }
        let snapshot = level.snapshot();
        let restored = snapshot.restore().unwrap();
        let restored_objects: Vec<ObjectSnapshot> =
            restored.objects().iter().map(LevelObject::snapshot).collect();
        // Pedestals were inserted first, so depth ordering keeps the original order
        prop_assert_eq!(restored_objects, snapshot.objects);
        for c in 0..6 {
            for r in 0..6 {
                let cell = GridPoint::new(c, r);
                prop_assert_eq!(restored.dye_at(cell), level.dye_at(cell));
                prop_assert_eq!(restored.is_empty(cell), level.is_empty(cell));
            }
        }
    }

    #[test]
    fn reachability_is_symmetric(walls in prop::collection::vec(any::<bool>(), 16)) {
        let entry = GridPoint::new(0, 0);
        let exit = GridPoint::new(3, 3);
        let mut forward = Level::new(4, 4, entry, exit).unwrap();
        let mut backward = Level::new(4, 4, exit, entry).unwrap();
        for (i, &wall) in walls.iter().enumerate() {
            let cell = GridPoint::new(i as i32 / 4, i as i32 % 4);
            if cell == entry || cell == exit {
                continue;
            }
            forward.set_passable(cell, !wall).unwrap();
            backward.set_passable(cell, !wall).unwrap();
        }
        prop_assert_eq!(is_solvable(&forward), is_solvable(&backward));
    }

    #[test]
    fn resting_ball_never_holds_lock(direction in prop::sample::select(Direction::CARDINAL.to_vec())) {
        let mut level = Level::new(5, 5, GridPoint::new(0, 0), GridPoint::new(4, 4)).unwrap();
        let ball = level.add_object(LevelObject::ball(GridPoint::new(2, 2), Dye::Red));
        prop_assert!(level.move_ball(ball, direction).unwrap());
        for _ in 0..600 {
            level.advance(1.0 / 120.0).unwrap();
        }
        prop_assert!(!level.ball(ball).unwrap().is_moving());
        prop_assert!(!level.is_in_action());
        let position = level.object(ball).unwrap().position();
        prop_assert_eq!(position, GridPoint::new(2, 2).step(direction).step(direction));
    }
}
