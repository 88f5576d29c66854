//! Counter demo binary
//!
//! Demonstrates the Unistore state container with a simple counter.

use counter::{APPLIED, CounterAction, bind_counter_actions, count, create_counter_store, increment_repeatedly};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counter=debug,unistore_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Counter Demo: Unistore ===\n");

    let store = create_counter_store()?;
    println!("Initial count: {}", count(&store.get_state()));

    let reader = store.clone();
    store.subscribe(move || {
        let state = reader.get_state();
        println!(
            "  listener: count = {}, actions reduced = {}",
            count(&state),
            state.get(APPLIED).copied().unwrap_or_default()
        );
    });

    let actions = bind_counter_actions(store.dispatcher());

    println!("\n>>> increment");
    actions.call("increment", ())?;

    println!("\n>>> increment_if_odd (count is odd)");
    actions.call("increment_if_odd", ())?;

    println!("\n>>> increment_if_odd (count is even, nothing happens)");
    actions.call("increment_if_odd", ())?;

    println!("\n>>> decrement");
    actions.call("decrement", ())?;

    println!("\n>>> IncrementBy(10)");
    store.dispatch(CounterAction::IncrementBy(10))?;

    println!("\n>>> increment_repeatedly(3)");
    store.dispatch(increment_repeatedly(3))?;

    println!("\n>>> reset");
    actions.call("reset", ())?;

    let final_state = store.get_state();
    println!("\nFinal count: {}", count(&final_state));
    println!("Listeners registered: {}", store.listener_count());

    println!("\n=== Demonstration Complete ===");
    println!("\nKey concepts demonstrated:");
    println!("  • State: one value, replaced on every dispatch");
    println!("  • Action: CounterAction (plain or deferred)");
    println!("  • Reducer: pure (state, action) → state, combined per key");
    println!("  • Middleware: logger and thunk around the raw dispatch");
    println!("  • Listeners: notified synchronously after each transition");
    println!("  • Action creators: bound to the store's dispatch");

    Ok(())
}
