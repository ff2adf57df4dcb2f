//! Unit tests for FlipPlugin and StorePlugin.

use hermes_core::{Context, OutgoingKind};

use super::{robot_with_log, texts};
use crate::{flip, install_demos, FlipPlugin, StorePlugin};

#[test]
fn test_flip_says_flipped_text() {
    let (robot, said) = robot_with_log();
    robot.use_plugin(FlipPlugin).unwrap();

    robot.hear("@hermes flip abc", &Context::new()).unwrap();

    assert_eq!(texts(&said), vec![flip("abc")]);
    assert_eq!(texts(&said), vec!["ɔqɐ".to_string()]);
    assert_eq!(said.lock().unwrap()[0].kind, OutgoingKind::Say);
}

#[test]
fn test_flip_ignores_unaddressed_text() {
    let (robot, said) = robot_with_log();
    robot.use_plugin(FlipPlugin).unwrap();

    robot.hear("flip abc", &Context::new()).unwrap();

    assert!(texts(&said).is_empty());
}

#[test]
fn test_store_set_then_get() {
    let (robot, said) = robot_with_log();
    robot.use_plugin(StorePlugin).unwrap();

    robot.hear("@hermes set x 5", &Context::new()).unwrap();
    robot.hear("@hermes get x", &Context::new()).unwrap();

    let texts = texts(&said);
    assert_eq!(texts.len(), 2);
    assert!(texts[1].contains('5'), "unexpected reply: {}", texts[1]);
    assert_eq!(robot.data("x"), Some(serde_json::json!("5")));
}

#[test]
fn test_store_get_missing_and_unset() {
    let (robot, said) = robot_with_log();
    robot.use_plugin(StorePlugin).unwrap();

    robot.hear("@hermes get nope", &Context::new()).unwrap();
    robot.hear("@hermes set k some words", &Context::new()).unwrap();
    robot.hear("@hermes unset k", &Context::new()).unwrap();
    robot.hear("@hermes get k", &Context::new()).unwrap();

    assert_eq!(
        texts(&said),
        vec![
            "nope is not set",
            "Okay, k is some words.",
            "Forgot k.",
            "k is not set",
        ]
    );
}

#[test]
fn test_store_is_shared_across_contexts() {
    let (robot, said) = robot_with_log();
    install_demos(&robot).unwrap();

    robot
        .hear("@hermes set color blue", &Context::new().with_room("a"))
        .unwrap();
    robot
        .hear("@hermes get color", &Context::new().with_room("b"))
        .unwrap();

    let last = said.lock().unwrap().last().cloned().unwrap();
    assert_eq!(last.text, "color is blue");
    assert_eq!(last.context.room(), Some("b"));
}
