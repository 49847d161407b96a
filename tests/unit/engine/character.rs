use super::*;
use crate::animation::ease::Ease;
use crate::foundation::error::TermfxError;

fn ch(row: i32, column: i32) -> EffectCharacter {
    EffectCharacter::new(CharId(0), "x", Coord::new(row, column))
}

fn one_frame_scene(c: &mut EffectCharacter, symbol: &str, looping: bool) -> SceneId {
    let scene = c.animation.new_scene(looping);
    scene.add_frame(symbol, 1, None).unwrap();
    scene.id()
}

fn path_to(c: &mut EffectCharacter, target: Coord, speed: f64) -> PathId {
    let path = c.motion.new_path(speed, Ease::Linear).unwrap();
    path.new_waypoint(target);
    path.id()
}

#[test]
fn idle_character_is_inactive() {
    let mut c = ch(1, 1);
    assert!(!c.is_active());
    c.tick().unwrap();
    assert_eq!(c.current_coord(), Coord::new(1, 1));
    assert_eq!(c.symbol(), "x");
}

#[test]
fn path_only_character_finishes_with_its_path() {
    let mut c = ch(1, 1);
    let p = path_to(&mut c, Coord::new(3, 1), 1.0);
    c.activate_path(p).unwrap();
    assert!(c.is_active());
    c.tick().unwrap();
    assert!(c.is_active());
    c.tick().unwrap();
    assert!(!c.is_active());
    assert_eq!(c.current_coord(), Coord::new(3, 1));
}

#[test]
fn scene_only_character_finishes_with_its_scene() {
    let mut c = ch(1, 1);
    let s = one_frame_scene(&mut c, "*", false);
    c.activate_scene(s).unwrap();
    assert_eq!(c.symbol(), "*");
    assert!(c.is_active());
    c.tick().unwrap();
    assert!(!c.is_active());
    assert_eq!(c.symbol(), "*");
}

#[test]
fn path_complete_activates_scene_within_the_same_tick() {
    let mut c = ch(1, 1);
    let rain = one_frame_scene(&mut c, "|", true);
    let fade = c.animation.new_scene(false);
    fade.add_frame("a", 1, None).unwrap();
    fade.add_frame("b", 1, None).unwrap();
    let fade = fade.id();
    let p = path_to(&mut c, Coord::new(2, 1), 1.0);
    c.register_event(Event::PathComplete(p), Action::ActivateScene(fade));
    c.activate_scene(rain).unwrap();
    c.activate_path(p).unwrap();

    c.tick().unwrap();
    assert_eq!(c.animation.active_scene(), Some(fade));
    assert_eq!(c.symbol(), "a");
    assert!(c.is_active());

    c.tick().unwrap();
    assert_eq!(c.symbol(), "b");
    assert!(!c.is_active());
}

#[test]
fn second_binding_for_same_path_replaces_first() {
    let mut c = ch(1, 1);
    let first = one_frame_scene(&mut c, "1", false);
    let second = one_frame_scene(&mut c, "2", false);
    let p = path_to(&mut c, Coord::new(1, 2), 1.0);
    c.register_event(Event::PathComplete(p), Action::ActivateScene(first));
    c.register_event(Event::PathComplete(p), Action::ActivateScene(second));
    c.activate_path(p).unwrap();

    c.tick().unwrap();
    assert_eq!(c.animation.active_scene(), Some(second));
    assert_eq!(c.symbol(), "2");
}

#[test]
fn set_complete_stops_a_looping_scene() {
    let mut c = ch(1, 1);
    let glow = one_frame_scene(&mut c, "o", true);
    let p = path_to(&mut c, Coord::new(1, 3), 1.0);
    c.register_event(Event::PathComplete(p), Action::SetComplete);
    c.activate_scene(glow).unwrap();
    c.activate_path(p).unwrap();

    c.tick().unwrap();
    assert!(c.is_active());
    c.tick().unwrap();
    assert!(!c.is_active());
}

#[test]
fn scene_complete_can_chain_a_path_and_visibility() {
    let mut c = ch(1, 1);
    let s = one_frame_scene(&mut c, "v", false);
    let p = path_to(&mut c, Coord::new(1, 2), 1.0);
    c.register_event(Event::SceneComplete(s), Action::ActivatePath(p));
    c.register_event(Event::PathComplete(p), Action::SetVisibility(true));
    c.activate_scene(s).unwrap();

    c.tick().unwrap();
    assert!(c.is_active());
    assert!(!c.is_visible());
    c.tick().unwrap();
    assert!(c.is_visible());
    assert!(!c.is_active());
}

#[test]
fn dangling_action_target_stops_the_tick() {
    let mut c = ch(1, 1);
    let p = path_to(&mut c, Coord::new(1, 1), 1.0);
    c.register_event(Event::PathComplete(p), Action::ActivateScene(SceneId(7)));
    c.activate_path(p).unwrap();
    assert!(matches!(c.tick(), Err(TermfxError::Invariant(_))));
}

#[test]
fn scene_complete_can_stop_an_unfinished_path() {
    let mut c = ch(1, 1);
    let long = path_to(&mut c, Coord::new(10, 1), 1.0);
    let spark = one_frame_scene(&mut c, "+", false);
    c.register_event(Event::SceneComplete(spark), Action::DeactivatePath(long));
    c.activate_path(long).unwrap();
    c.activate_scene(spark).unwrap();

    c.tick().unwrap();

    assert_eq!(c.motion.active_path(), None);
    assert!(!c.motion.is_moving());
    assert!(!c.is_active());
    assert_eq!(c.current_coord(), Coord::new(2, 1));

    c.tick().unwrap();
    assert_eq!(c.current_coord(), Coord::new(2, 1));
}

#[test]
fn path_complete_can_stop_a_looping_scene() {
    let mut c = ch(1, 1);
    let blink = one_frame_scene(&mut c, "o", true);
    let hop = path_to(&mut c, Coord::new(2, 1), 1.0);
    c.register_event(Event::PathComplete(hop), Action::DeactivateScene(blink));
    c.activate_scene(blink).unwrap();
    c.activate_path(hop).unwrap();
    assert!(c.is_active());

    c.tick().unwrap();

    assert_eq!(c.animation.active_scene(), None);
    assert!(!c.animation.is_playing());
    assert!(!c.is_active());
    assert_eq!(c.symbol(), "o");
}

#[test]
fn completion_can_teleport_the_character() {
    let mut c = ch(1, 1);
    let hop = path_to(&mut c, Coord::new(2, 1), 1.0);
    c.register_event(Event::PathComplete(hop), Action::SetCoordinate(Coord::new(0, 4)));
    c.activate_path(hop).unwrap();

    c.tick().unwrap();

    assert_eq!(c.current_coord(), Coord::new(0, 4));
    assert_eq!(c.input_coord(), Coord::new(1, 1));
    assert!(!c.is_active());

    let mut c = ch(3, 3);
    let flash = one_frame_scene(&mut c, "*", false);
    c.register_event(Event::SceneComplete(flash), Action::SetCoordinate(Coord::new(5, 7)));
    c.activate_scene(flash).unwrap();
    c.tick().unwrap();
    assert_eq!(c.current_coord(), Coord::new(5, 7));
}
