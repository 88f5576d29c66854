//! Integration tests for the counter demo store
//!
//! These tests drive the full pipeline: bound creators, logger, thunk,
//! combined reducers and listeners.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use counter::{
    APPLIED, COUNT, CounterAction, bind_counter_actions, count, count_reducer, create_counter_store,
    increment_if_odd, increment_repeatedly, root_reducer,
};
use proptest::prelude::*;
use unistore_runtime::StoreError;
use unistore_testing::{CallTrace, ReducerTest};

#[test]
fn test_counter_with_store() {
    let store = create_counter_store().unwrap();
    assert_eq!(count(&store.get_state()), 0);

    store.dispatch(CounterAction::Increment).unwrap();
    store.dispatch(CounterAction::Increment).unwrap();
    assert_eq!(count(&store.get_state()), 2);

    store.dispatch(CounterAction::Decrement).unwrap();
    assert_eq!(count(&store.get_state()), 1);

    store.dispatch(CounterAction::Reset).unwrap();
    assert_eq!(count(&store.get_state()), 0);
    assert_eq!(store.get_state().get(APPLIED), Some(&4));
}

#[test]
fn test_deferred_actions_are_not_reduced() {
    let store = create_counter_store().unwrap();
    let trace = CallTrace::new();
    store.subscribe(trace.listener("notified"));

    store.dispatch(increment_if_odd()).unwrap();
    assert_eq!(count(&store.get_state()), 0);
    assert!(trace.is_empty());

    store.dispatch(increment_repeatedly(3)).unwrap();
    assert_eq!(count(&store.get_state()), 3);
    assert_eq!(trace.len(), 3);
    // Only the three increments reached the reducers.
    assert_eq!(store.get_state().get(APPLIED), Some(&3));
}

#[test]
fn test_bound_action_creators() {
    let store = create_counter_store().unwrap();
    let actions = bind_counter_actions(store.dispatcher());

    assert_eq!(
        actions.keys().collect::<Vec<_>>(),
        vec!["increment", "decrement", "reset", "increment_if_odd"]
    );

    actions.call("increment", ()).unwrap();
    actions.call("increment_if_odd", ()).unwrap();
    assert_eq!(count(&store.get_state()), 2);

    assert_eq!(
        actions.call("double", ()),
        Err(StoreError::UnknownActionCreator("double".to_string()))
    );
}

#[test]
fn test_root_reducer_with_harness() {
    ReducerTest::new(root_reducer().unwrap())
        .given_state(unistore_core::CombinedState::new().with(COUNT, 10))
        .when_actions([CounterAction::IncrementBy(5), CounterAction::Decrement])
        .then_state(|before, after| {
            assert_eq!(count(before), 10);
            assert_eq!(count(after), 14);
            assert_eq!(after.get(APPLIED), Some(&2));
        })
        .run();
}

proptest! {
    #[test]
    fn store_count_matches_reducer(amounts in prop::collection::vec(-50_i64..50, 0..20)) {
        let store = create_counter_store().unwrap();
        for amount in &amounts {
            store.dispatch(CounterAction::IncrementBy(*amount)).unwrap();
        }
        let expected = amounts
            .iter()
            .fold(0, |total, amount| count_reducer(&total, &CounterAction::IncrementBy(*amount)));
        prop_assert_eq!(count(&store.get_state()), expected);
    }
}
