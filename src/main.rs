use anyhow::Context;
use library_kernel::settings::Settings;
use libraryapi::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load settings")?;
    library_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "libraryapi bootstrap starting"
    );

    Application::build(settings).await?.run().await
}
