//! User listing and profile views, wrapped so plugins can intercept them.
//!
//! The views return JSON view models; rendering, routing, and real
//! persistence belong to the surrounding web layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use hookchain_core::error::AppError;
use hookchain_core::result::AppResult;
use hookchain_plugin::{HookArgs, HookRegistry, HookedFn, call_hooks};

/// Hook name of the user listing view.
pub const LISTING: &str = "users.listing";
/// Hook name of the public profile view.
pub const PUBLIC: &str = "users.public";
/// Hook name of the signed-in user's own profile view.
pub const PRIVATE: &str = "users.private";

/// Listing page size.
pub const PER_PAGE: usize = 50;

/// Fields the listing can be searched on. Anything else falls back to `name`.
const SEARCH_FIELDS: [&str; 3] = ["name", "affiliation", "website"];

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub banned: bool,
    #[serde(default)]
    pub hidden: bool,
}

impl User {
    /// Creates a visible, non-banned user.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            affiliation: None,
            website: None,
            banned: false,
            hidden: false,
        }
    }

    fn is_visible(&self) -> bool {
        !self.banned && !self.hidden
    }

    fn field(&self, field: &str) -> Option<&str> {
        match field {
            "affiliation" => self.affiliation.as_deref(),
            "website" => self.website.as_deref(),
            _ => Some(&self.name),
        }
    }
}

/// In-memory user store, ordered by id.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Creates a directory from the given users.
    pub fn new(mut users: Vec<User>) -> Self {
        users.sort_by_key(|u| u.id);
        Self { users }
    }

    /// Finds a user by id, hidden and banned users included.
    pub fn get(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Visible users whose `field` contains `q`, ordered by id.
    fn search(&self, field: &str, q: Option<&str>) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.is_visible())
            .filter(|u| match q {
                Some(q) => u.field(field).is_some_and(|v| v.contains(q)),
                None => true,
            })
            .collect()
    }
}

/// The three user views, each wrapped with its hook chain.
#[derive(Debug, Clone)]
pub struct UserViews {
    pub listing: HookedFn,
    pub public: HookedFn,
    pub private: HookedFn,
}

impl UserViews {
    /// Wraps the views over `directory`.
    pub fn new(registry: Arc<HookRegistry>, directory: Arc<UserDirectory>) -> Self {
        let dir = directory.clone();
        let listing = call_hooks(registry.clone(), LISTING, move |args| {
            let dir = dir.clone();
            async move { listing(&dir, &args) }
        });

        let dir = directory.clone();
        let public = call_hooks(registry.clone(), PUBLIC, move |args| {
            let dir = dir.clone();
            async move { public(&dir, &args) }
        });

        let dir = directory;
        let private = call_hooks(registry, PRIVATE, move |args| {
            let dir = dir.clone();
            async move { private(&dir, &args) }
        });

        Self {
            listing,
            public,
            private,
        }
    }
}

/// Searchable, paginated listing of visible users.
///
/// Arguments: `q` (optional substring), `field` (defaults to `name`),
/// `page` (1-based, defaults to 1).
pub fn listing(directory: &UserDirectory, args: &HookArgs) -> AppResult<Value> {
    let q = args.get_str("q").filter(|q| !q.is_empty());
    let field = args
        .get_str("field")
        .filter(|f| SEARCH_FIELDS.contains(f))
        .unwrap_or("name");
    let page = args
        .get_i64("page")
        .filter(|p| *p >= 1)
        .map_or(1, |p| usize::try_from(p).unwrap_or(usize::MAX));

    let matches = directory.search(field, q);
    let total = matches.len();
    let pages = total.div_ceil(PER_PAGE).max(1);

    let users: Vec<&User> = matches
        .into_iter()
        .skip((page - 1).saturating_mul(PER_PAGE))
        .take(PER_PAGE)
        .collect();

    Ok(json!({
        "users": users,
        "page": page,
        "prev_page": (page > 1).then(|| page - 1),
        "next_page": (page < pages).then(|| page + 1),
        "total": total,
        "q": q,
        "field": field,
    }))
}

/// Public profile of a visible user. Argument: `user_id`.
pub fn public(directory: &UserDirectory, args: &HookArgs) -> AppResult<Value> {
    let user_id: u64 = args.parse("user_id")?;

    let user = directory
        .get(user_id)
        .filter(|u| u.is_visible())
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

    Ok(json!({ "user": user }))
}

/// Profile of the signed-in user. Argument: `current_user_id`.
pub fn private(directory: &UserDirectory, args: &HookArgs) -> AppResult<Value> {
    let user_id = args
        .get("current_user_id")
        .and_then(Value::as_u64)
        .ok_or_else(|| AppError::authentication("Login required"))?;

    let user = directory
        .get(user_id)
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

    Ok(json!({ "user": user }))
}
