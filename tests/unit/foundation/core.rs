use super::*;

#[test]
fn lerp_snaps_to_nearest_cell() {
    let a = Coord::new(10, 1);
    let b = Coord::new(1, 1);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Coord::new(6, 1)); // 5.5 rounds away from zero
}

#[test]
fn lerp_allows_overshoot() {
    let a = Coord::new(1, 1);
    let b = Coord::new(1, 11);
    assert_eq!(a.lerp(b, 1.2), Coord::new(1, 13));
    assert_eq!(a.lerp(b, -0.1), Coord::new(1, 0));
}

#[test]
fn distance_is_euclidean_in_cells() {
    assert_eq!(Coord::new(1, 1).distance(Coord::new(4, 5)), 5.0);
    assert_eq!(Coord::new(3, 3).distance(Coord::new(3, 3)), 0.0);
}

#[test]
fn output_area_bounds_and_center() {
    let area = OutputArea::new(3, 10);
    assert!(area.contains(Coord::new(1, 1)));
    assert!(area.contains(Coord::new(3, 10)));
    assert!(!area.contains(Coord::new(4, 1)));
    assert!(!area.contains(Coord::new(0, 5)));
    assert_eq!(area.center(), Coord::new(2, 6));
    assert!(OutputArea::new(0, 0).is_empty());
}
