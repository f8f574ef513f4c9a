//! Combinator tests

mod common;
use common::{delayed_fulfill, delayed_reject, ints, new_loop};

use vow_core::{Promise, PromiseError, Settlement, Value};

#[test]
fn test_all_orders_by_input_not_completion() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let all = Promise::all(
        &cx,
        vec![
            Value::Promise(delayed_fulfill(&event_loop, 1, 30)),
            Value::Promise(delayed_fulfill(&event_loop, 2, 10)),
            Value::Int(3),
        ],
    );

    event_loop.run_until_settled(&all).unwrap();
    assert_eq!(all.value(), Some(ints(&[1, 2, 3])));
    assert_eq!(event_loop.now(), 30);
}

#[test]
fn test_all_rejects_as_soon_as_one_input_rejects() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let all = Promise::all(
        &cx,
        vec![
            Value::Promise(Promise::resolve(&cx, 1)),
            Value::Promise(delayed_reject(&event_loop, "x", 20)),
            Value::Promise(delayed_fulfill(&event_loop, 2, 200)),
        ],
    );

    event_loop.run_until_settled(&all).unwrap();
    assert_eq!(all.reason(), Some(Value::str("x")));
    assert_eq!(event_loop.now(), 20);

    // The slower input still settles on its own
    event_loop.run().unwrap();
    assert_eq!(all.reason(), Some(Value::str("x")));
}

#[test]
fn test_race_rejects_with_faster_rejection() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let race = Promise::race(
        &cx,
        vec![
            Value::Promise(delayed_fulfill(&event_loop, 1, 100)),
            Value::Promise(delayed_reject(&event_loop, "e", 10)),
        ],
    );

    event_loop.run().unwrap();
    assert_eq!(race.reason(), Some(Value::str("e")));
}

#[test]
fn test_race_fulfills_with_faster_fulfillment() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let race = Promise::race(
        &cx,
        vec![
            Value::Promise(delayed_reject(&event_loop, "e", 100)),
            Value::Promise(delayed_fulfill(&event_loop, "winner", 10)),
        ],
    );

    event_loop.run().unwrap();
    assert_eq!(race.value(), Some(Value::str("winner")));
}

#[test]
fn test_race_plain_value_beats_timers() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let race = Promise::race(
        &cx,
        vec![Value::Promise(delayed_fulfill(&event_loop, 1, 5)), Value::str("now")],
    );

    event_loop.run().unwrap();
    assert_eq!(race.value(), Some(Value::str("now")));
}

#[test]
fn test_empty_race_stays_pending_when_loop_goes_idle() {
    let event_loop = new_loop();
    let race = Promise::race(&event_loop.context(), Vec::new());
    let summary = event_loop.run().unwrap();
    assert!(race.is_pending());
    assert_eq!(summary.turns, 0);
}

#[test]
fn test_any_reports_every_reason() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let any = Promise::any(
        &cx,
        vec![
            Value::Promise(delayed_reject(&event_loop, "a", 50)),
            Value::Promise(delayed_reject(&event_loop, "b", 5)),
        ],
    );

    event_loop.run().unwrap();
    let reason = any.reason().unwrap();
    assert_eq!(
        reason.as_error(),
        Some(&PromiseError::Aggregate {
            reasons: vec![Value::str("a"), Value::str("b")]
        })
    );
    assert_eq!(
        reason.to_string(),
        "AggregateError: All promises were rejected"
    );
}

#[test]
fn test_any_ignores_rejections_before_first_fulfillment() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let any = Promise::any(
        &cx,
        vec![
            Value::Promise(delayed_reject(&event_loop, "a", 1)),
            Value::Promise(delayed_fulfill(&event_loop, 2, 20)),
            Value::Promise(delayed_fulfill(&event_loop, 3, 30)),
        ],
    );

    event_loop.run().unwrap();
    assert_eq!(any.value(), Some(Value::Int(2)));
}

#[test]
fn test_all_settled_waits_for_everything() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let settled = Promise::all_settled(
        &cx,
        vec![
            Value::Promise(delayed_fulfill(&event_loop, 1, 40)),
            Value::Promise(delayed_reject(&event_loop, "e", 10)),
        ],
    );

    event_loop.run().unwrap();
    let records = settled.value().unwrap();
    let records = records.as_list().unwrap();
    assert_eq!(
        records[0].as_settlement(),
        Some(&Settlement::Fulfilled(Value::Int(1)))
    );
    assert_eq!(
        records[1].as_settlement(),
        Some(&Settlement::Rejected(Value::str("e")))
    );
    assert_eq!(
        settled.value().unwrap().to_json(),
        serde_json::json!([
            {"status": "fulfilled", "value": 1},
            {"status": "rejected", "reason": "e"}
        ])
    );
}

#[test]
fn test_combinators_accept_nested_results() {
    let event_loop = new_loop();
    let cx = event_loop.context();
    let inner = Promise::all(&cx, vec![Value::Int(1), Value::Int(2)]);
    let outer = Promise::all(&cx, vec![Value::Promise(inner), Value::Int(3)]);

    event_loop.run().unwrap();
    assert_eq!(
        outer.value(),
        Some(Value::list([ints(&[1, 2]), Value::Int(3)]))
    );
}
