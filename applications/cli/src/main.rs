/// userdir - terminal client for the user directory service
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userdir_cli::{Cli, CliConfig, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "userdir=info,userdir_cli=info,userdir_client=info,userdir_store=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    tracing::debug!(base_url = %config.server.base_url, "Configuration loaded");

    let mut session = Session::new(&config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    session.execute(cli.command, &mut out).await
}
