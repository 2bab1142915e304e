//! Integration tests for the wrapped user views.

mod helpers;

use hookchain_core::ErrorKind;
use hookchain_plugin::{HookArgs, Next, Original, hook_args};
use serde_json::json;

use helpers::listed_names;

#[tokio::test]
async fn test_listing_without_hooks() {
    let app = helpers::test_app("").await;

    let result = app.users.listing.call(HookArgs::new()).await.unwrap();
    assert_eq!(listed_names(&result), vec!["alice", "bob"]);
    assert_eq!(result["field"], "name");
    assert_eq!(result["page"], 1);
}

#[tokio::test]
async fn test_listing_search_by_website() {
    let app = helpers::test_app("").await;

    let result = app
        .users
        .listing
        .call(hook_args! { "q" => "bob.example", "field" => "website" })
        .await
        .unwrap();
    assert_eq!(listed_names(&result), vec!["bob"]);
    assert_eq!(result["q"], "bob.example");
}

#[tokio::test]
async fn test_hook_can_force_listing_filter() {
    let app = helpers::test_app("").await;
    app.hooks
        .register_fn(
            "users.listing",
            "filter-forcer",
            |next: Next, _original, mut args: HookArgs| async move {
                args.set("q", "ali");
                next.call(args).await
            },
        )
        .await;

    let result = app.users.listing.call(HookArgs::new()).await.unwrap();
    assert_eq!(listed_names(&result), vec!["alice"]);
}

#[tokio::test]
async fn test_hook_post_processes_profile() {
    let app = helpers::test_app("").await;
    app.hooks
        .register_fn(
            "users.public",
            "badges",
            |next: Next, _original, args: HookArgs| async move {
                let mut view = next.call(args).await?;
                view["badges"] = json!(["first-blood"]);
                Ok(view)
            },
        )
        .await;

    let result = app
        .users
        .public
        .call(hook_args! { "user_id" => 2 })
        .await
        .unwrap();
    assert_eq!(result["user"]["name"], "bob");
    assert_eq!(result["badges"], json!(["first-blood"]));
}

#[tokio::test]
async fn test_hidden_user_public_profile_is_not_found() {
    let app = helpers::test_app("").await;

    let err = app
        .users
        .public
        .call(hook_args! { "user_id" => 3 })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_private_profile_bypass_hook_still_enforces_login() {
    let app = helpers::test_app("").await;
    app.hooks
        .register_fn(
            "users.private",
            "straight-through",
            |_next, original: Original, args| async move { original.call(args).await },
        )
        .await;

    let err = app.users.private.call(HookArgs::new()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);

    let own = app
        .users
        .private
        .call(hook_args! { "current_user_id" => 3 })
        .await
        .unwrap();
    assert_eq!(own["user"]["name"], "carol");
}
