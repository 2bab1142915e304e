//! Checkout: a core function plugins can reprice.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use hookchain_core::error::AppError;
use hookchain_core::result::AppResult;
use hookchain_plugin::{
    HookArgs, HookBinding, HookRegistry, HookedFn, Next, Plugin, PluginInfo, call_hooks, hook_fn,
    plugin_info,
};

/// Hook name of [`process`].
pub const PROCESS: &str = "checkout.process";

/// Processes a checkout and returns the charged price.
pub async fn process(args: HookArgs) -> AppResult<Value> {
    let price: f64 = args.parse("price")?;
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation(format!("Invalid price {price}")));
    }
    Ok(json!(price))
}

/// Wraps [`process`] with the `checkout.process` hooks.
pub fn wrap(registry: Arc<HookRegistry>) -> HookedFn {
    call_hooks(registry, PROCESS, process)
}

/// Plugin that scales the `price` argument before checkout runs.
#[derive(Debug, Clone)]
pub struct DiscountPlugin {
    factor: f64,
}

impl DiscountPlugin {
    /// Plugin id.
    pub const ID: &'static str = "checkout-discount";

    /// Creates a discount multiplying the price by `factor` (0.9 = 10% off).
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl Default for DiscountPlugin {
    fn default() -> Self {
        Self::new(0.9)
    }
}

#[async_trait]
impl Plugin for DiscountPlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            id: Self::ID,
            name: "Checkout Discount",
            version: env!("CARGO_PKG_VERSION"),
            description: "Applies a flat discount to checkout.process",
            author: "Hookchain Team"
        )
    }

    fn hooks(&self) -> Vec<HookBinding> {
        let factor = self.factor;
        let hook = hook_fn(Self::ID, move |next: Next, _original, mut args: HookArgs| async move {
            let price: f64 = args.parse("price")?;
            let discounted = price * factor;
            tracing::debug!(price = price, discounted = discounted, "Applying discount");
            args.set("price", discounted);
            next.call(args).await
        });

        vec![HookBinding::new(PROCESS, hook)]
    }
}
