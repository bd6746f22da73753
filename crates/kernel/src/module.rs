use async_trait::async_trait;
use axum::Router;

use crate::settings::{Environment, Settings};

/// Borrowed application state handed to each lifecycle hook
pub struct InitCtx<'a> {
    pub settings: &'a Settings,
}

impl<'a> InitCtx<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub fn environment(&self) -> &Environment {
        &self.settings.environment
    }
}

/// A slice of the API: its routes, its OpenAPI paths and its lifecycle hooks.
///
/// Hooks run in registration order; `stop` runs in reverse.
#[async_trait]
pub trait Module: Sync + Send {
    /// Registry key; must be unique
    fn name(&self) -> &'static str;

    /// Runs once before any module starts or the listener binds
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Routes relative to the API namespace
    fn routes(&self) -> Router {
        Router::new()
    }

    /// `paths` and `components.schemas` to merge into the served document
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs after the server has drained
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
