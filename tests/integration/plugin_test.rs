//! Integration tests for application bootstrap and compiled-in plugins.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use hookchain::checkout::{self, DiscountPlugin};
use hookchain::users;
use hookchain_core::ErrorKind;
use hookchain_core::config::plugin::PluginConfig;
use hookchain_plugin::{
    HookArgs, HookBinding, HookRegistry, Next, Plugin, PluginInfo, PluginManager, hook_args,
    hook_fn, plugin_info,
};
use plugin_audit::{AuditPhase, AuditPlugin};

#[tokio::test]
async fn test_default_bootstrap_discounts_and_audits_checkout() {
    let app = helpers::test_app("").await;

    let charged: f64 = app
        .checkout
        .call_as(hook_args! { "price" => 100 })
        .await
        .unwrap();
    assert!((charged - 90.0).abs() < 1e-9);

    let records = app.audit.records_for(checkout::PROCESS).await;
    let phases: Vec<AuditPhase> = records.iter().map(|r| r.phase).collect();
    assert_eq!(phases, vec![AuditPhase::Before, AuditPhase::After]);

    let ids: Vec<String> = app
        .plugins
        .list_plugins()
        .await
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec!["audit", "checkout-discount"]);
}

#[tokio::test]
async fn test_disabled_discount_leaves_price_alone() {
    let app = helpers::test_app(
        r#"
        [plugins]
        disabled = ["checkout-discount"]
        "#,
    )
    .await;

    let charged = app.checkout.call(hook_args! { "price" => 100 }).await.unwrap();
    assert_eq!(charged.as_f64(), Some(100.0));
    assert_eq!(app.hooks.hook_count(checkout::PROCESS).await, 1);
}

#[tokio::test]
async fn test_auto_load_off_means_plain_core_functions() {
    let app = helpers::test_app(
        r#"
        [plugins]
        auto_load = false
        "#,
    )
    .await;

    let charged = app.checkout.call(hook_args! { "price" => 100 }).await.unwrap();
    assert_eq!(charged.as_f64(), Some(100.0));
    assert!(app.hooks.registered_names().await.is_empty());
    assert!(app.audit.is_empty().await);
}

#[tokio::test]
async fn test_audit_configured_for_user_views() {
    let app = helpers::test_app(
        r#"
        [plugins]
        audited_hooks = ["users.listing", "users.public"]
        "#,
    )
    .await;

    app.users.listing.call(HookArgs::new()).await.unwrap();
    let err = app
        .users
        .public
        .call(hook_args! { "user_id" => 99 })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let listing: Vec<AuditPhase> = app
        .audit
        .records_for(users::LISTING)
        .await
        .iter()
        .map(|r| r.phase)
        .collect();
    assert_eq!(listing, vec![AuditPhase::Before, AuditPhase::After]);

    let public: Vec<AuditPhase> = app
        .audit
        .records_for(users::PUBLIC)
        .await
        .iter()
        .map(|r| r.phase)
        .collect();
    assert_eq!(public, vec![AuditPhase::Before, AuditPhase::Failed]);

    assert!(app.audit.records_for(checkout::PROCESS).await.is_empty());
}

/// Plugin that replaces the public profile of one user.
struct ProfileOverride;

#[async_trait]
impl Plugin for ProfileOverride {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            id: "profile-override",
            name: "Profile Override",
            version: "0.1.0",
            description: "Short-circuits users.public for user 1",
            author: "tests"
        )
    }

    fn hooks(&self) -> Vec<HookBinding> {
        let hook = hook_fn("profile-override", |next: Next, _original, args: HookArgs| async move {
            if args.get_i64("user_id") == Some(1) {
                return Ok(json!({ "user": { "id": 1, "name": "redacted" } }));
            }
            next.call(args).await
        });
        vec![HookBinding::new(users::PUBLIC, hook)]
    }
}

#[tokio::test]
async fn test_plugin_loaded_after_bootstrap_takes_effect() {
    let app = helpers::test_app("").await;

    let before = app.users.public.call(hook_args! { "user_id" => 1 }).await.unwrap();
    assert_eq!(before["user"]["name"], "alice");

    app.plugins.load_plugin(Arc::new(ProfileOverride)).await.unwrap();

    let after = app.users.public.call(hook_args! { "user_id" => 1 }).await.unwrap();
    assert_eq!(after["user"]["name"], "redacted");

    let other = app.users.public.call(hook_args! { "user_id" => 2 }).await.unwrap();
    assert_eq!(other["user"]["name"], "bob");
}

#[tokio::test]
async fn test_plugins_register_in_load_order() {
    let registry = Arc::new(HookRegistry::new());
    let manager = PluginManager::new(registry.clone(), PluginConfig::default());

    let audit = AuditPlugin::new([checkout::PROCESS]);
    let trail = audit.trail().clone();
    let plugins: Vec<Arc<dyn Plugin>> = vec![Arc::new(audit), Arc::new(DiscountPlugin::new(0.5))];
    assert_eq!(manager.load_all(plugins).await.unwrap(), 2);

    let chain = registry.lookup(checkout::PROCESS).await;
    let owners: Vec<&str> = chain.iter().map(|h| h.plugin_id()).collect();
    assert_eq!(owners, vec!["audit", "checkout-discount"]);

    let charged: Value = checkout::wrap(registry)
        .call(hook_args! { "price" => 80 })
        .await
        .unwrap();
    assert_eq!(charged.as_f64(), Some(40.0));
    assert_eq!(trail.len().await, 2);

    manager.shutdown().await;
}
