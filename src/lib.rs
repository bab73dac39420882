//! Library catalog service.
//!
//! Wires the feature modules onto the kernel, database and HTTP crates.

pub mod modules;

use anyhow::Context;
use axum::Router;
use library_kernel::{settings::Settings, InitCtx, ModuleRegistry};
use sqlx::SqlitePool;

/// A fully wired application: settings, database pool and registered modules.
pub struct Application {
    settings: Settings,
    pool: SqlitePool,
    registry: ModuleRegistry,
}

impl Application {
    /// Connect to the database and register every module.
    pub async fn build(settings: Settings) -> anyhow::Result<Self> {
        let pool = library_db::connect(&settings.database)
            .await
            .context("failed to open database")?;

        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, &pool);

        Ok(Self {
            settings,
            pool,
            registry,
        })
    }

    /// Apply pending migrations from all modules.
    pub async fn migrate(&self) -> anyhow::Result<usize> {
        let migrations = self.registry.collect_migrations();
        let applied = library_db::migrate(&self.pool, &migrations)
            .await
            .context("failed to run migrations")?;
        tracing::info!(applied, "migrations complete");
        Ok(applied)
    }

    /// Router with every module mounted, without binding a socket.
    pub fn router(&self) -> Router {
        library_http::build_router(&self.registry, &self.settings)
    }

    /// Migrate, run the module lifecycle and serve HTTP until shutdown.
    pub async fn run(self) -> anyhow::Result<()> {
        self.migrate().await?;

        let ctx = InitCtx {
            settings: &self.settings,
        };
        self.registry.init_all(&ctx).await?;
        self.registry.start_all(&ctx).await?;

        let served = library_http::start_server(&self.registry, &self.settings).await;

        self.registry.stop_all().await?;
        self.pool.close().await;
        served
    }
}
