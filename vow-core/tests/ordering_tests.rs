//! Reaction ordering tests

mod common;
use common::{delayed_fulfill, new_loop, Journal};

use vow_core::{Promise, Value};

#[test]
fn test_sync_then_microtasks_then_timers() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let journal = Journal::default();

    {
        let journal = journal.clone();
        event_loop.set_timeout(0, move || journal.push("timeout"));
    }
    Promise::resolve(&cx, 1).then(journal.tap("a")).then(journal.tap("b"));
    Promise::resolve(&cx, 2).then(journal.tap("c"));
    journal.push("sync");

    event_loop.run().unwrap();
    assert_eq!(journal.entries(), vec!["sync", "a:1", "c:2", "b:1", "timeout"]);
}

#[test]
fn test_reaction_registered_in_reaction_runs_later() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let journal = Journal::default();
    let settled = Promise::resolve(&cx, Value::str("v"));

    {
        let journal = journal.clone();
        let settled = settled.clone();
        settled.clone().then(move |value| {
            settled.then(journal.tap("inner"));
            journal.push("outer");
            Ok(value)
        });
    }
    settled.then(journal.tap("sibling"));

    event_loop.run().unwrap();
    assert_eq!(journal.entries(), vec!["outer", "sibling:v", "inner:v"]);
}

#[test]
fn test_timers_resolve_in_due_order() {
    let event_loop = new_loop();
    let journal = Journal::default();
    delayed_fulfill(&event_loop, "slow", 100).then(journal.tap("done"));
    delayed_fulfill(&event_loop, "fast", 10).then(journal.tap("done"));
    delayed_fulfill(&event_loop, "tie", 10).then(journal.tap("done"));

    let summary = event_loop.run().unwrap();
    assert_eq!(journal.entries(), vec!["done:fast", "done:tie", "done:slow"]);
    assert_eq!(summary.now_ms, 100);
    assert_eq!(summary.timers_fired, 3);
}

#[test]
fn test_long_chain_settles_in_one_drain() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let mut promise = Promise::resolve(&cx, 0);
    for _ in 0..1_000 {
        promise = promise.then(|v| Ok(Value::Int(v.as_int().unwrap_or(0) + 1)));
    }

    let summary = event_loop.run().unwrap();
    assert_eq!(promise.value(), Some(Value::Int(1_000)));
    assert_eq!(summary.turns, 1);
}

#[test]
fn test_rejection_skips_fulfillment_handlers() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let journal = Journal::default();
    let result = Promise::reject(&cx, Value::str("e"))
        .then(journal.tap("skipped"))
        .catch(journal.tap("caught"))
        .then(journal.tap("after"));

    event_loop.run().unwrap();
    assert_eq!(journal.entries(), vec!["caught:e", "after:e"]);
    assert_eq!(result.value(), Some(Value::str("e")));
}

#[test]
fn test_finally_runs_without_changing_value() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let journal = Journal::default();
    let result = {
        let journal = journal.clone();
        Promise::resolve(&cx, 5).finally(move || {
            journal.push("cleanup");
            Ok(Value::Int(100))
        })
    };

    event_loop.run().unwrap();
    assert_eq!(journal.entries(), vec!["cleanup"]);
    assert_eq!(result.value(), Some(Value::Int(5)));
}
