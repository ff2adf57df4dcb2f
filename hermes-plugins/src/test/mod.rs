//! Unit test module
//!
//! Plugin tests live here, separate from source files. Each test builds a robot, installs
//! plugins and inspects what the robot said through a generic subscriber.

mod demo_plugins_test;

use std::sync::{Arc, Mutex};

use hermes_core::{Event, Outgoing, OutgoingKind};
use hermes_robot::Robot;

/// Everything the robot sent, in order.
pub(crate) type Said = Arc<Mutex<Vec<Outgoing>>>;

pub(crate) fn robot_with_log() -> (Robot, Said) {
    let robot = Robot::new("Hermes").unwrap();
    let said: Said = Arc::new(Mutex::new(Vec::new()));
    for kind in OutgoingKind::ALL {
        let sink = said.clone();
        robot.subscribe(kind.as_str(), move |event: &Event| {
            if let Event::Outgoing(out) = event {
                sink.lock().unwrap().push(out.clone());
            }
        });
    }
    (robot, said)
}

pub(crate) fn texts(said: &Said) -> Vec<String> {
    said.lock().unwrap().iter().map(|o| o.text.clone()).collect()
}
