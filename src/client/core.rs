use crate::config::{normalize_base_url, ClientConfig};
use crate::operations::registry::{self, OperationDef};
use crate::response::{ApiResponse, ResponseBody};
use crate::{Error, ErrorContext, Result};
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

/// Bind `config` to the full operation surface.
pub fn setup_config(config: ClientConfig) -> BoundClient {
    BoundClient::new(config)
}

/// Client with a configuration bound into every operation.
///
/// Cloning is cheap; clones share the same base-URL cell. Clients created by
/// separate [`setup_config`] calls never share state.
#[derive(Clone)]
pub struct BoundClient {
    config: Arc<ArcSwap<ClientConfig>>,
}

impl BoundClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> Arc<ClientConfig> {
        self.config.load_full()
    }

    pub fn base_url(&self) -> String {
        self.config.load().base_url().to_string()
    }

    /// Point this client (and its clones) at another origin.
    ///
    /// A trailing slash is stripped. Requests already in flight keep the
    /// configuration they started with; concurrent calls are last-write-wins.
    pub fn set_base_url(&self, url: &str) -> Result<()> {
        let normalized = normalize_base_url(url)?;
        let previous = self.base_url();
        self.config
            .rcu(|current| Arc::new(current.rebased(normalized.clone())));
        info!(from = %previous, to = %normalized, "base url updated");
        Ok(())
    }

    /// Resolve an operation by its OpenAPI id. Unknown ids yield `None`.
    pub fn operation(&self, name: &str) -> Option<BoundOperation> {
        registry::find(name).map(|def| BoundOperation {
            def,
            config: Arc::clone(&self.config),
        })
    }

    pub fn has_operation(&self, name: &str) -> bool {
        registry::find(name).is_some()
    }

    /// Exactly the registered operation ids.
    pub fn operation_names(&self) -> impl Iterator<Item = &'static str> {
        registry::names()
    }

    /// Look up `name` and invoke it with `args`.
    ///
    /// Unlike [`operation`](Self::operation), an unknown name is reported as an
    /// error here since the caller is trying to invoke it.
    pub async fn call(
        &self,
        name: &str,
        args: serde_json::Value,
    ) -> Result<ApiResponse<ResponseBody>> {
        let op = self.operation(name).ok_or_else(|| {
            Error::validation_with_context(
                format!("unknown operation '{name}'"),
                ErrorContext::new()
                    .with_field_path(name.to_string())
                    .with_source("client"),
            )
        })?;
        op.call(args).await
    }
}

impl std::fmt::Debug for BoundClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundClient")
            .field("config", &*self.config.load())
            .field("operations", &registry::all().len())
            .finish()
    }
}

/// One operation with the client's configuration injected.
#[derive(Clone)]
pub struct BoundOperation {
    def: &'static OperationDef,
    config: Arc<ArcSwap<ClientConfig>>,
}

impl BoundOperation {
    pub fn name(&self) -> &'static str {
        self.def.name
    }

    pub fn definition(&self) -> &'static OperationDef {
        self.def
    }

    /// Invoke with wire-form arguments; the configuration is read when the
    /// call starts.
    pub async fn call(&self, args: serde_json::Value) -> Result<ApiResponse<ResponseBody>> {
        self.def.invoke(args, self.config.load_full()).await
    }
}

impl std::fmt::Debug for BoundOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundOperation")
            .field("name", &self.def.name)
            .finish()
    }
}
