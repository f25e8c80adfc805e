use anyhow::Context;
use modux::{ActionCreator, LoggingMiddleware, Module, Registry};
use modux_store::Store;

mod config;
mod logger;

use config::CounterConfig;

#[derive(Debug, Clone, PartialEq)]
struct Counter {
    count: i64,
}

/// Actions of the counter demo, declared up front and activated on first use
struct CounterActions {
    increment: ActionCreator<Counter, i64>,
    reset: ActionCreator<Counter, ()>,
    log_only: ActionCreator<Counter, String>,
}

fn declare(
    registry: &Registry,
    config: &CounterConfig,
) -> anyhow::Result<(Module<Counter>, Module<Vec<String>>, CounterActions)> {
    let counter = registry.create_module(
        "counter",
        Counter {
            count: config.initial_count,
        },
    )?;
    let audit = registry.create_module("audit", Vec::<String>::new())?;

    let record = audit
        .create_action::<String>("record")
        .with_reducer(|entries, entry, _| {
            let mut entries = entries.cloned().unwrap_or_default();
            entries.push(entry.clone());
            entries
        })
        .lazy();

    let threshold = config.audit_threshold;
    let increment = counter
        .create_action::<i64>("increment")
        .with_reducer(|state, step, _| Counter {
            count: state.map_or(0, |s| s.count) + step,
        })
        .with_effect(move |state, step, ctx| {
            let before = state.map_or(0, |s| s.count);
            if before <= threshold && before + step > threshold {
                let entry = format!("crossed {} ({} -> {})", threshold, before, before + step);
                if let Err(e) = record.dispatch_to(entry, ctx.dispatcher()) {
                    log::error!("Failed to record audit entry: {}", e);
                }
            }
        })
        .lazy();

    let reset = counter
        .create_action::<()>("reset")
        .with_reducer(|_, _, _| Counter { count: 0 })
        .lazy();

    let log_only = counter
        .create_action::<String>("logOnly")
        .with_effect(|state, message, _| {
            log::info!("{} (count: {})", message, state.map_or(0, |s| s.count));
        })
        .lazy();

    Ok((
        counter,
        audit,
        CounterActions {
            increment,
            reset,
            log_only,
        },
    ))
}

fn main() -> anyhow::Result<()> {
    let (config, issues) = CounterConfig::load();
    logger::init(&config.log_level).context("Failed to initialize logger")?;
    for issue in &issues {
        issue.log();
    }

    log::info!("Starting modux-counter");

    let registry = Registry::new();
    let (counter, audit, actions) =
        declare(&registry, &config).context("Failed to declare modules")?;

    let mut store = Store::new(registry.clone());
    store.add_middleware(Box::new(LoggingMiddleware::new()));
    store.add_middleware(Box::new(registry.middleware()));

    for step in &config.steps {
        actions
            .increment
            .dispatch(*step, |action| store.dispatch(action))
            .with_context(|| format!("Failed to dispatch increment by {}", step))?;
    }

    let count = counter.state(store.state()).map_or(0, |s| s.count);
    actions
        .log_only
        .dispatch(format!("after {} steps", config.steps.len()), |action| {
            store.dispatch(action)
        })?;

    println!("count: {}", count);
    for entry in audit.state(store.state()).into_iter().flatten() {
        println!("audit: {}", entry);
    }

    actions.reset.dispatch((), |action| store.dispatch(action))?;
    log::debug!("Registered modules: {:?}", registry.module_names());
    log::debug!("Activated actions: {:?}", registry.action_ids());

    log::info!("Exiting modux-counter");
    Ok(())
}
