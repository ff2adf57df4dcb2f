//! Integration tests for [`hermes_robot::Robot`] dispatch.
//!
//! Covers: mention detection, context filter subset matching, once listeners, registration
//! order, generic subscriptions for outgoing messages, re-entrant handlers, handler errors
//! and plugin installation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use hermes_robot::{
    ChatEvent, Context, Event, HermesError, OutgoingKind, PluginFn, Response, Robot, Route,
};

fn robot() -> Robot {
    Robot::new("Hermes").unwrap()
}

/// Collects the text of every outgoing message of `kind`.
fn capture(robot: &Robot, kind: OutgoingKind) -> Arc<Mutex<Vec<String>>> {
    let said = Arc::new(Mutex::new(Vec::new()));
    let sink = said.clone();
    robot.subscribe(kind.as_str(), move |event: &Event| {
        if let Event::Outgoing(out) = event {
            sink.lock().unwrap().push(out.text.clone());
        }
    });
    said
}

fn counter(robot: &Robot, route: Route) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    robot.on(route, move |_res: &Response, _robot: &Robot| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    count
}

/// **Test: Text without the mention prefix emits hear but never mention.**
#[test]
fn test_non_mention_text_does_not_emit_mention() {
    let robot = robot();
    let hears = counter(&robot, Route::hear());
    let mentions = counter(&robot, Route::mention());

    for text in ["hello", "hermes flip", " @hermes flip", "@hermesflip", "@other hi", ""] {
        robot.hear(text, &Context::new()).unwrap();
    }

    assert_eq!(hears.load(Ordering::SeqCst), 6);
    assert_eq!(mentions.load(Ordering::SeqCst), 0);
}

/// **Test: Mention listeners see the remainder after the prefix; one mention per hear.**
#[test]
fn test_mention_passes_remainder() {
    let robot = robot();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = seen.clone();
    robot.on(Route::mention(), move |res: &Response, _robot: &Robot| {
        s.lock().unwrap().push(res.text().to_string());
        Ok(())
    });

    robot.hear("@hermes flip abc", &Context::new()).unwrap();
    robot.hear("@Hermes @hermes twice", &Context::new()).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["flip abc", "@hermes twice"]);
}

/// **Test: A room filter fires only for that room, whatever other keys are present.**
#[test]
fn test_room_filter_subset_match() {
    let robot = robot();
    let count = counter(
        &robot,
        Route::hear().filter(Context::new().with_room("R")),
    );

    robot.hear("hi", &Context::new().with_room("R")).unwrap();
    robot
        .hear("hi", &Context::new().with_room("R").with_user("ann").with("thread", "9"))
        .unwrap();
    robot.hear("hi", &Context::new().with_room("S").with_user("ann")).unwrap();
    robot.hear("hi", &Context::new().with_user("ann")).unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 2);
}

/// **Test: A listener without filter fires regardless of room.**
#[test]
fn test_listener_without_filter_ignores_room() {
    let robot = robot();
    let count = counter(&robot, Route::hear());
    robot.hear("a", &Context::new().with_room("R")).unwrap();
    robot.hear("b", &Context::new().with_room("S")).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

/// **Test: once(mention /foo/) heard twice with matching text fires exactly once.**
#[test]
fn test_once_fires_exactly_once() {
    let robot = robot();
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    robot.once(
        Route::mention().pattern("foo").unwrap(),
        move |_res: &Response, _robot: &Robot| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
    );

    robot.hear("@hermes bar", &Context::new()).unwrap();
    robot.hear("@hermes foo", &Context::new()).unwrap();
    robot.hear("@hermes foo", &Context::new()).unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(robot.listener_count(ChatEvent::Mention), 0);
}

/// **Test: A once listener re-entering hear from its own handler does not fire again.**
#[test]
fn test_once_reentrant_fires_once() {
    let robot = robot();
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    robot.once(Route::hear(), move |res: &Response, _robot: &Robot| {
        c.fetch_add(1, Ordering::SeqCst);
        res.hear("again")
    });

    robot.hear("first", &Context::new()).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

/// **Test: Listeners run in registration order.**
#[test]
fn test_listeners_run_in_registration_order() {
    let robot = robot();
    let order = Arc::new(Mutex::new(Vec::new()));
    for name in ["first", "second", "third"] {
        let o = order.clone();
        robot.on(Route::hear(), move |_res: &Response, _robot: &Robot| {
            o.lock().unwrap().push(name);
            Ok(())
        });
    }
    robot.hear("x", &Context::new()).unwrap();
    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
}

/// **Test: Response exposes captures and answers in the incoming context.**
#[test]
fn test_response_captures_and_context() {
    let robot = robot();
    let replies = Arc::new(Mutex::new(Vec::new()));
    let r = replies.clone();
    robot.subscribe("reply", move |event: &Event| {
        if let Event::Outgoing(out) = event {
            r.lock().unwrap().push((out.text.clone(), out.context.clone()));
        }
    });
    robot
        .respond(r"^add (\d+) (\d+)$", |res: &Response, _robot: &Robot| {
            let a: i64 = res.group(1).unwrap_or("0").parse().unwrap_or(0);
            let b: i64 = res.group(2).unwrap_or("0").parse().unwrap_or(0);
            assert_eq!(res.group(0), Some(res.text()));
            assert_eq!(res.user(), Some("ann"));
            res.reply((a + b).to_string());
            Ok(())
        })
        .unwrap();

    let ctx = Context::new().with_user("ann").with_room("math");
    robot.hear("@hermes add 2 3", &ctx).unwrap();

    assert_eq!(*replies.lock().unwrap(), vec![("5".to_string(), ctx)]);
}

/// **Test: Every outgoing kind is emitted under its own event name.**
#[test]
fn test_outgoing_kinds_emit_named_events() {
    let robot = robot();
    let captured: Vec<_> = OutgoingKind::ALL
        .iter()
        .map(|kind| (*kind, capture(&robot, *kind)))
        .collect();

    for kind in OutgoingKind::ALL {
        robot.send(kind, format!("via {}", kind), &Context::new());
    }

    for (kind, said) in captured {
        assert_eq!(*said.lock().unwrap(), vec![format!("via {}", kind)]);
    }
}

/// **Test: Handlers can register new listeners while being dispatched.**
#[test]
fn test_handler_registers_listener_during_dispatch() {
    let robot = robot();
    let said = capture(&robot, OutgoingKind::Say);
    robot
        .respond("^arm$", |res: &Response, _robot: &Robot| {
            res.once(
                Route::mention().pattern("^fire$")?,
                |res: &Response, _robot: &Robot| {
                    res.say("bang");
                    Ok(())
                },
            );
            res.say("armed");
            Ok(())
        })
        .unwrap();

    robot.hear("@hermes fire", &Context::new()).unwrap();
    robot.hear("@hermes arm", &Context::new()).unwrap();
    robot.hear("@hermes fire", &Context::new()).unwrap();
    robot.hear("@hermes fire", &Context::new()).unwrap();

    assert_eq!(*said.lock().unwrap(), vec!["armed", "bang"]);
}

/// **Test: A failing handler aborts the dispatch, emits error and returns the error.**
#[test]
fn test_handler_error_propagates() {
    let robot = robot();
    let errors = Arc::new(AtomicUsize::new(0));
    let e = errors.clone();
    robot.subscribe("error", move |_event: &Event| {
        e.fetch_add(1, Ordering::SeqCst);
    });
    robot.on(Route::hear(), |_res: &Response, _robot: &Robot| {
        Err(HermesError::Handler("boom".to_string()))
    });
    let after = counter(&robot, Route::hear());

    let result = robot.hear("x", &Context::new());

    assert!(matches!(result, Err(HermesError::Handler(msg)) if msg == "boom"));
    assert_eq!(errors.load(Ordering::SeqCst), 1);
    assert_eq!(after.load(Ordering::SeqCst), 0);
}

/// **Test: off removes chat and generic listeners; unknown ids return false.**
#[test]
fn test_off_removes_listeners() {
    let robot = robot();
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    let chat = robot.on(Route::hear(), move |_res: &Response, _robot: &Robot| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let generic = robot.subscribe("say", |_event: &Event| {});

    assert!(robot.off(chat));
    assert!(robot.off(generic));
    assert!(!robot.off(chat));

    robot.hear("x", &Context::new()).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(robot.emit("say", &Event::Custom(serde_json::Value::Null)), 0);
}

/// **Test: subscribe_once is called once; hear and mention are also emitted as generic events.**
#[test]
fn test_generic_hear_and_mention_events() {
    let robot = robot();
    let events = Arc::new(Mutex::new(Vec::new()));
    let ev = events.clone();
    robot.subscribe("mention", move |event: &Event| {
        ev.lock().unwrap().push(event.clone());
    });
    let hears = Arc::new(AtomicUsize::new(0));
    let h = hears.clone();
    robot.subscribe_once("hear", move |_event: &Event| {
        h.fetch_add(1, Ordering::SeqCst);
    });

    robot.hear("@hermes ping", &Context::new().with_user("ann")).unwrap();
    robot.hear("@hermes pong", &Context::new()).unwrap();

    assert_eq!(hears.load(Ordering::SeqCst), 1);
    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        Event::Mention {
            message: "ping".to_string(),
            context: Context::new().with_user("ann"),
        }
    );
}

/// **Test: use_plugin runs register once, chains and records names.**
#[test]
fn test_use_plugin_chains() {
    let robot = robot();
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();

    robot
        .use_plugin(PluginFn::new("counter", move |_robot: &Robot| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }))
        .unwrap()
        .use_plugin(|robot: &Robot| -> hermes_robot::Result<()> {
            robot.respond("^ping$", |res: &Response, _robot: &Robot| {
                res.say("pong");
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(robot.plugins(), vec!["counter", "anonymous"]);

    let said = capture(&robot, OutgoingKind::Say);
    robot.hear("@hermes ping", &Context::new()).unwrap();
    assert_eq!(*said.lock().unwrap(), vec!["pong"]);
}

/// **Test: A failing plugin is not recorded as installed.**
#[test]
fn test_failing_plugin_returns_error() {
    let robot = robot();
    let result = robot.use_plugin(|robot: &Robot| -> hermes_robot::Result<()> {
        robot.respond("(", |_res: &Response, _robot: &Robot| Ok(()))?;
        Ok(())
    });
    assert!(matches!(result, Err(HermesError::Pattern(_))));
    assert!(robot.plugins().is_empty());
}

/// **Test: Renaming the robot changes which messages count as mentions.**
#[test]
fn test_rename_changes_mention_prefix() {
    let robot = robot();
    let mentions = counter(&robot, Route::mention());
    robot.set_name("Bob").unwrap();
    assert_eq!(robot.mention(), "@bob ");

    robot.hear("@hermes hi", &Context::new()).unwrap();
    robot.hear("@bob hi", &Context::new()).unwrap();
    assert_eq!(mentions.load(Ordering::SeqCst), 1);
}
