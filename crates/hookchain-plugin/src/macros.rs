//! Convenience macros for plugin development.

/// Macro for creating a plugin info struct.
///
/// # Example
/// ```rust,ignore
/// let info = plugin_info!(
///     id: "my-plugin",
///     name: "My Plugin",
///     version: "1.0.0",
///     description: "Does things",
///     author: "Dev"
/// );
/// ```
#[macro_export]
macro_rules! plugin_info {
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr,
        author: $author:expr
    ) => {
        $crate::prelude::PluginInfo {
            id: $id.to_string(),
            name: $name.to_string(),
            version: $version.to_string(),
            description: $desc.to_string(),
            author: $author.to_string(),
            hooks: Vec::new(),
            enabled: true,
        }
    };
}

/// Macro for quickly building a `HookArgs`.
///
/// # Example
/// ```rust,ignore
/// let args = hook_args! { "price" => 100, "currency" => "EUR" };
/// let args = hook_args![json!(1), json!("two")];
/// ```
#[macro_export]
macro_rules! hook_args {
    () => {
        $crate::prelude::HookArgs::new()
    };
    ({ $($key:expr => $value:expr),* $(,)? }) => {
        $crate::hook_args! { $($key => $value),* }
    };
    ($($key:literal => $value:expr),+ $(,)?) => {{
        let mut args = $crate::prelude::HookArgs::new();
        $(
            args.set($key, $value);
        )+
        args
    }};
    ($($value:expr),+ $(,)?) => {{
        let mut args = $crate::prelude::HookArgs::new();
        $(
            args.push($value);
        )+
        args
    }};
}
