//! Trial promo plugin, registered with the TrialGate plugin system.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use trialgate_core::config::TrialPromoConfig;
use trialgate_core::result::AppResult;
use trialgate_core::traits::HostingHistory;
use trialgate_plugin::exports::PluginExport;
use trialgate_plugin::hooks::definitions::HookPoint;
use trialgate_plugin::registry::{Plugin, PluginInfo};

use crate::annotator::AdminListAnnotator;
use crate::eligibility::TrialEligibilityChecker;
use crate::error::TrialPromoError;
use crate::hooks::{AdminHeadOutputHook, PLUGIN_ID, ValidateCheckoutHook};

/// Trial promo plugin for TrialGate.
#[derive(Debug, Default)]
pub struct TrialPromoPlugin {
    /// Validated rule settings (set on initialize)
    config: Option<Arc<TrialPromoConfig>>,
    /// Eligibility rule (set on initialize)
    checker: Option<Arc<TrialEligibilityChecker>>,
    /// Product list annotator (set on initialize)
    annotator: Option<Arc<AdminListAnnotator>>,
}

impl TrialPromoPlugin {
    /// Create an uninitialized plugin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `config` and build the checker and annotator.
    pub fn initialize(
        &mut self,
        config: TrialPromoConfig,
        history: Arc<dyn HostingHistory>,
    ) -> AppResult<()> {
        if !config.enabled {
            return Err(TrialPromoError::Disabled.into());
        }
        config.check()?;

        let config = Arc::new(config);
        self.annotator = Some(Arc::new(AdminListAnnotator::new(&config)));
        self.checker = Some(Arc::new(TrialEligibilityChecker::new(
            Arc::clone(&config),
            history,
        )));

        info!(
            product_id = config.product_id,
            failure_policy = ?config.failure_policy,
            prompt_removal = ?config.prompt_removal,
            "Trial promo plugin initialized"
        );

        self.config = Some(config);
        Ok(())
    }

    /// The eligibility checker, once initialized.
    pub fn checker(&self) -> Option<&Arc<TrialEligibilityChecker>> {
        self.checker.as_ref()
    }

    /// The annotator, once initialized.
    pub fn annotator(&self) -> Option<&Arc<AdminListAnnotator>> {
        self.annotator.as_ref()
    }

    /// Bundle the plugin and its hook handlers for the plugin manager.
    pub fn export(self) -> AppResult<PluginExport> {
        let (Some(config), Some(checker), Some(annotator)) =
            (self.config.clone(), self.checker.clone(), self.annotator.clone())
        else {
            return Err(TrialPromoError::NotInitialized.into());
        };

        let validate = ValidateCheckoutHook::new(
            checker,
            config.failure_policy,
            config.messages.lookup_unavailable.clone(),
        );
        let head_output = AdminHeadOutputHook::new(annotator);

        Ok(PluginExport::new(Arc::new(self))
            .on(HookPoint::ShoppingCartValidateCheckout, Arc::new(validate))
            .on(HookPoint::AdminAreaHeadOutput, Arc::new(head_output)))
    }
}

#[async_trait]
impl Plugin for TrialPromoPlugin {
    fn info(&self) -> PluginInfo {
        trialgate_plugin::plugin_info!(
            id: PLUGIN_ID,
            name: "Trial Promo Gate",
            version: env!("CARGO_PKG_VERSION"),
            description: "Requires a promo code for the trial product and blocks repeat trials",
            author: "TrialGate",
            hooks: [HookPoint::ShoppingCartValidateCheckout, HookPoint::AdminAreaHeadOutput],
            priority: 1
        )
    }

    async fn on_load(&self) -> AppResult<()> {
        if self.checker.is_none() {
            return Err(TrialPromoError::NotInitialized.into());
        }
        Ok(())
    }

    async fn on_stop(&self) -> AppResult<()> {
        info!("Trial promo plugin stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialgate_core::types::id::ProductId;
    use trialgate_database::MemoryHostingHistory;
    use trialgate_plugin::hooks::definitions::HookPayload;
    use trialgate_plugin::manager::PluginManager;

    #[test]
    fn test_export_requires_initialize() {
        let err = TrialPromoPlugin::new().export().unwrap_err();
        assert!(err.message.contains("not initialized"));
    }

    #[test]
    fn test_initialize_rejects_unset_product() {
        let mut plugin = TrialPromoPlugin::new();
        let err = plugin
            .initialize(
                TrialPromoConfig::for_product(ProductId::new(0)),
                Arc::new(MemoryHostingHistory::default()),
            )
            .unwrap_err();
        assert_eq!(err.kind, trialgate_core::error::ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_loads_into_manager() {
        let mut plugin = TrialPromoPlugin::new();
        plugin
            .initialize(
                TrialPromoConfig::for_product(ProductId::new(7)),
                Arc::new(MemoryHostingHistory::default()),
            )
            .unwrap();

        let manager = PluginManager::new();
        manager.load_plugin(plugin.export().unwrap()).await.unwrap();

        let payload = HookPayload::new(HookPoint::ShoppingCartValidateCheckout)
            .with_data("cart", serde_json::json!([{"pid": 7}]));
        let result = manager.dispatcher().dispatch(&payload).await;
        assert!(result.halted);
        assert_eq!(result.halted_by.as_deref(), Some(PLUGIN_ID));

        let head = HookPayload::new(HookPoint::AdminAreaHeadOutput)
            .with_string("filename", "configproducts");
        let rendered = manager.dispatcher().dispatch(&head).await.rendered_output();
        assert!(rendered.is_some_and(|html| html.contains("[7]")));
    }
}
