use anyhow::Context;
use clap::{Parser, Subcommand};
use library_kernel::settings::Settings;
use libraryapi::Application;

#[derive(Debug, Parser)]
#[command(name = "library-cli", version, about = "Book catalog service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply migrations and serve the HTTP API (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load settings")?;
    library_telemetry::init(&settings.telemetry)?;

    tracing::info!(env = ?settings.environment, command = ?cli.command, "library-cli starting");

    let app = Application::build(settings).await?;
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => app.run().await,
        Command::Migrate => {
            let applied = app.migrate().await?;
            println!("applied {applied} migration(s)");
            Ok(())
        }
    }
}
