//! Convenience macros for plugin development.

/// Builds a [`PluginInfo`](crate::registry::PluginInfo).
///
/// # Example
/// ```rust,ignore
/// let info = plugin_info!(
///     id: "trial-promo",
///     name: "Trial Promo Gate",
///     version: "1.0.0",
///     description: "Guards trial products",
///     author: "Ops",
///     hooks: [HookPoint::ShoppingCartValidateCheckout]
/// );
/// ```
#[macro_export]
macro_rules! plugin_info {
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr,
        author: $author:expr,
        hooks: [$($hook:expr),* $(,)?]
    ) => {
        $crate::plugin_info!(
            id: $id,
            name: $name,
            version: $version,
            description: $desc,
            author: $author,
            hooks: [$($hook),*],
            priority: 100
        )
    };
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr,
        author: $author:expr,
        hooks: [$($hook:expr),* $(,)?],
        priority: $priority:expr
    ) => {
        $crate::prelude::PluginInfo {
            id: $id.to_string(),
            name: $name.to_string(),
            version: $version.to_string(),
            description: $desc.to_string(),
            author: $author.to_string(),
            hooks: vec![$($hook),*],
            priority: $priority,
        }
    };
}

/// Builds a `HookPayload` from key/value pairs.
///
/// # Example
/// ```rust,ignore
/// let payload = hook_payload!(HookPoint::AdminAreaHeadOutput, {
///     "filename" => json!("configproducts"),
/// });
/// ```
#[macro_export]
macro_rules! hook_payload {
    ($hook:expr) => {
        $crate::prelude::HookPayload::new($hook)
    };
    ($hook:expr, { $($key:expr => $value:expr),* $(,)? }) => {{
        let mut payload = $crate::prelude::HookPayload::new($hook);
        $(
            payload.data.insert($key.to_string(), $value);
        )*
        payload
    }};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use serde_json::json;

    #[test]
    fn test_hook_payload_macro() {
        let payload = hook_payload!(HookPoint::AdminAreaHeadOutput, {
            "filename" => json!("configproducts"),
        });
        assert_eq!(payload.get_str("filename"), Some("configproducts"));
    }

    #[test]
    fn test_plugin_info_macro_default_priority() {
        let info = plugin_info!(
            id: "x",
            name: "X",
            version: "1.0.0",
            description: "d",
            author: "a",
            hooks: [HookPoint::AdminAreaHeadOutput]
        );
        assert_eq!(info.priority, 100);
        assert_eq!(info.hooks, vec![HookPoint::AdminAreaHeadOutput]);
    }
}
