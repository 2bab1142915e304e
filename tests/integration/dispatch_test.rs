//! Integration tests for the hook chain through the public API.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use hookchain::checkout;
use hookchain_core::ErrorKind;
use hookchain_core::error::AppError;
use hookchain_plugin::{HookArgs, HookRegistry, Next, Original, call_hooks, hook_args};

use helpers::{CallLog, logging_hook};

#[tokio::test]
async fn test_checkout_scenario_discount_then_log() {
    let registry = Arc::new(HookRegistry::new());
    let log = CallLog::default();
    let seen_by_log = Arc::new(tokio::sync::Mutex::new(Vec::new()));

    let discount_log = log.clone();
    registry
        .register_fn(
            checkout::PROCESS,
            "discount",
            move |next: Next, _original, mut args: HookArgs| {
                let log = discount_log.clone();
                async move {
                    let price: f64 = args.parse("price")?;
                    log.lock().await.push(format!("discount:received:{price}"));
                    args.set("price", price * 0.9);
                    next.call(args).await
                }
            },
        )
        .await;

    let seen = seen_by_log.clone();
    let outer_log = log.clone();
    registry
        .register_fn(
            checkout::PROCESS,
            "log",
            move |next: Next, _original, args: HookArgs| {
                let seen = seen.clone();
                let log = outer_log.clone();
                async move {
                    seen.lock().await.push(args.get_f64("price"));
                    log.lock().await.push("log:before".to_string());
                    let result = next.call(args).await;
                    log.lock().await.push("log:after".to_string());
                    result
                }
            },
        )
        .await;

    let process = checkout::wrap(registry);
    let total: f64 = process.call_as(hook_args! { "price" => 100 }).await.unwrap();

    assert!((total - 90.0).abs() < 1e-9);
    assert_eq!(*seen_by_log.lock().await, vec![Some(90.0)]);
    assert_eq!(
        *log.lock().await,
        vec!["discount:received:100", "log:before", "log:after"]
    );
}

#[tokio::test]
async fn test_unregistered_name_calls_original_once() {
    let registry = Arc::new(HookRegistry::new());
    registry
        .register("some.other.point", logging_hook("other", CallLog::default()))
        .await;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let wrapped = call_hooks(registry, "quiet.point", move |args: HookArgs| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(json!(args.positional().len()))
        }
    });

    let result = wrapped.call(hook_args![json!(1), json!(2)]).await.unwrap();
    assert_eq!(result, json!(2));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_hooks_wrap_in_nested_order() {
    let registry = Arc::new(HookRegistry::new());
    let log = CallLog::default();
    for label in ["h1", "h2", "h3"] {
        registry.register("nest.point", logging_hook(label, log.clone())).await;
    }

    let original_log = log.clone();
    let wrapped = call_hooks(registry, "nest.point", move |_args| {
        let log = original_log.clone();
        async move {
            log.lock().await.push("original".to_string());
            Ok(Value::Null)
        }
    });
    wrapped.call(HookArgs::new()).await.unwrap();

    assert_eq!(
        *log.lock().await,
        vec![
            "h1:before",
            "h2:before",
            "h3:before",
            "original",
            "h3:after",
            "h2:after",
            "h1:after",
        ]
    );
}

#[tokio::test]
async fn test_bypass_with_post_processing() {
    let registry = Arc::new(HookRegistry::new());
    let log = CallLog::default();

    registry
        .register_fn("bypass.point", "h1", |_next, original: Original, args| async move {
            let value = original.call(args).await?;
            Ok(json!(value.as_i64().unwrap_or_default() * 10))
        })
        .await;
    registry.register("bypass.point", logging_hook("h2", log.clone())).await;

    let wrapped = call_hooks(registry, "bypass.point", |args: HookArgs| async move {
        Ok(json!(args.get_i64("n").unwrap_or_default()))
    });
    let result = wrapped.call(hook_args! { "n" => 4 }).await.unwrap();

    assert_eq!(result, json!(40));
    assert!(log.lock().await.is_empty());
}

#[tokio::test]
async fn test_wrapper_original_skips_hooks() {
    let registry = Arc::new(HookRegistry::new());
    let log = CallLog::default();
    registry.register("skip.point", logging_hook("h1", log.clone())).await;

    let wrapped = call_hooks(registry, "skip.point", |_args| async { Ok(json!("core")) });
    let result = wrapped.original().call(HookArgs::new()).await.unwrap();

    assert_eq!(result, json!("core"));
    assert!(log.lock().await.is_empty());
}

#[tokio::test]
async fn test_error_from_first_hook_stops_everything() {
    let registry = Arc::new(HookRegistry::new());
    let log = CallLog::default();

    registry
        .register_fn("err.point", "h1", |_next, _original, _args| async {
            Err(AppError::authentication("plugin says no"))
        })
        .await;
    registry.register("err.point", logging_hook("h2", log.clone())).await;

    let original_log = log.clone();
    let wrapped = call_hooks(registry, "err.point", move |_args| {
        let log = original_log.clone();
        async move {
            log.lock().await.push("original".to_string());
            Ok(Value::Null)
        }
    });

    let err = wrapped.call(HookArgs::new()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "plugin says no");
    assert!(log.lock().await.is_empty());
}

#[tokio::test]
async fn test_error_from_original_passes_through_hooks() {
    let registry = Arc::new(HookRegistry::new());
    let log = CallLog::default();
    registry.register("orig.err", logging_hook("h1", log.clone())).await;

    let wrapped = call_hooks(registry, "orig.err", |_args| async {
        Err(AppError::not_found("gone"))
    });

    let err = wrapped.call(HookArgs::new()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(*log.lock().await, vec!["h1:before", "h1:after"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dispatch_during_registration() {
    let registry = Arc::new(HookRegistry::new());
    let wrapped = call_hooks(registry.clone(), "busy.point", |args: HookArgs| async move {
        Ok(json!(args.get_i64("n").unwrap_or_default()))
    });

    let mut tasks = Vec::new();
    for i in 0..16 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move {
            let increment = |next: Next, _original: Original, mut args: HookArgs| async move {
                let n = args.get_i64("n").unwrap_or_default();
                args.set("n", n + 1);
                next.call(args).await
            };
            registry
                .register_fn("busy.point", format!("p{i}"), increment)
                .await;
        }));

        let wrapped = wrapped.clone();
        tasks.push(tokio::spawn(async move {
            let n = wrapped
                .call(hook_args! { "n" => 0 })
                .await
                .unwrap()
                .as_i64()
                .unwrap();
            assert!((0..=16).contains(&n));
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }

    let n = wrapped.call(hook_args! { "n" => 0 }).await.unwrap();
    assert_eq!(n, json!(16));
}
