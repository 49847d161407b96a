use super::*;

fn motion_with_path(start: Coord, speed: f64, ease: Ease, waypoints: &[Coord]) -> (Motion, PathId) {
    let mut motion = Motion::new(start);
    let path = motion.new_path(speed, ease).unwrap();
    for wp in waypoints {
        path.new_waypoint(*wp);
    }
    let id = path.id();
    motion.activate_path(id).unwrap();
    (motion, id)
}

#[test]
fn two_waypoints_complete_once_when_final_waypoint_is_reached() {
    let p0 = Coord::new(1, 1);
    let p1 = Coord::new(1, 5);
    let (mut motion, id) = motion_with_path(p0, 1.0, Ease::Linear, &[p0, p1]);

    let mut fired = Vec::new();
    let mut first_at_p1 = None;
    for tick in 1..=10 {
        if let Some(done) = motion.step() {
            fired.push((tick, done));
        }
        if first_at_p1.is_none() && motion.current_coord() == p1 {
            first_at_p1 = Some(tick);
        }
    }

    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].1, id);
    assert_eq!(Some(fired[0].0), first_at_p1);
    assert_eq!(motion.current_coord(), p1);
    assert!(!motion.is_moving());
}

#[test]
fn linear_segment_advances_by_speed() {
    let (mut motion, _) =
        motion_with_path(Coord::new(10, 3), 2.0, Ease::Linear, &[Coord::new(2, 3)]);
    let rows: Vec<i32> = (0..4)
        .map(|_| {
            motion.step();
            motion.current_coord().row
        })
        .collect();
    assert_eq!(rows, vec![8, 6, 4, 2]);
}

#[test]
fn easing_shapes_the_segment() {
    let (mut motion, _) =
        motion_with_path(Coord::new(1, 1), 2.5, Ease::InQuad, &[Coord::new(1, 11)]);
    motion.step(); // progress 0.25 -> eased 0.0625
    assert_eq!(motion.current_coord(), Coord::new(1, 2));
    motion.step(); // progress 0.5 -> eased 0.25
    assert_eq!(motion.current_coord(), Coord::new(1, 4));
}

#[test]
fn intermediate_waypoints_do_not_fire() {
    let waypoints = [Coord::new(1, 3), Coord::new(3, 3), Coord::new(3, 1)];
    let (mut motion, id) = motion_with_path(Coord::new(1, 1), 1.0, Ease::Linear, &waypoints);
    let mut events = Vec::new();
    for _ in 0..6 {
        events.push(motion.step());
    }
    assert_eq!(events[..5], [None, None, None, None, None]);
    assert_eq!(events[5], Some(id));
    assert_eq!(motion.current_coord(), Coord::new(3, 1));
}

#[test]
fn waypoint_at_current_position_completes_on_first_tick() {
    let here = Coord::new(4, 4);
    let (mut motion, id) = motion_with_path(here, 0.1, Ease::OutBounce, &[here]);
    assert_eq!(motion.step(), Some(id));
    assert_eq!(motion.step(), None);
    assert_eq!(motion.current_coord(), here);
}

#[test]
fn reactivation_resets_traversal_from_current_position() {
    let target = Coord::new(1, 1);
    let (mut motion, id) = motion_with_path(Coord::new(3, 1), 1.0, Ease::Linear, &[target]);
    assert_eq!(motion.step(), None);
    assert_eq!(motion.step(), Some(id));

    motion.set_coordinate(Coord::new(2, 1));
    motion.activate_path(id).unwrap();
    assert!(motion.is_moving());
    assert_eq!(motion.step(), Some(id));
    assert_eq!(motion.current_coord(), target);
}

#[test]
fn only_one_path_is_active() {
    let mut motion = Motion::new(Coord::new(1, 1));
    let a = motion.new_path(1.0, Ease::Linear).unwrap();
    a.new_waypoint(Coord::new(1, 9));
    let a = a.id();
    let b = motion.new_path(1.0, Ease::Linear).unwrap();
    b.new_waypoint(Coord::new(9, 1));
    let b = b.id();

    motion.activate_path(a).unwrap();
    motion.activate_path(b).unwrap();
    assert_eq!(motion.active_path(), Some(b));
    motion.step();
    assert_eq!(motion.current_coord(), Coord::new(2, 1));

    motion.deactivate_path(a);
    assert_eq!(motion.active_path(), Some(b));
    motion.deactivate_path(b);
    assert_eq!(motion.active_path(), None);
    assert_eq!(motion.step(), None);
}

#[test]
fn invalid_paths_are_rejected() {
    let mut motion = Motion::new(Coord::new(1, 1));
    assert!(matches!(
        motion.new_path(0.0, Ease::Linear),
        Err(TermfxError::Config(_))
    ));
    assert!(motion.new_path(f64::NAN, Ease::Linear).is_err());

    let empty = motion.new_path(1.0, Ease::Linear).unwrap().id();
    assert!(matches!(
        motion.activate_path(empty),
        Err(TermfxError::Invariant(_))
    ));
    assert!(motion.activate_path(PathId(42)).is_err());
}
