use clap::Parser;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, error};

use billed::app::App;
use billed::cli::{Cli, Commands};
use billed::config::Config;
use billed::session::SessionContext;
use billed::store::SqliteStore;
use billed::views::ConsoleModal;
use billed::FormState;

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "billed=info");
    }

    // Initialize logging to both console and file
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let file_appender = tracing_appender::rolling::never(".", "billed.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env())
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env())
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(database) = &cli.database {
        config.database_path = database.into();
    }
    if let Some(session) = &cli.session {
        config.session_path = session.clone();
    }
    if let Some(attachments) = &cli.attachments {
        config.attachments_dir = attachments.clone();
    }
    config.validate()?;

    if let Commands::Login { email } = &cli.command {
        SessionContext::employee(email.as_str()).save(&config.session_path)?;
        info!("Signed in as {}", email);
        return Ok(());
    }

    let session = SessionContext::load(&config.session_path).with_context(|| {
        format!(
            "No signed-in user in {}. Run 'billed login <email>' first",
            config.session_path.display()
        )
    })?;
    let store = SqliteStore::new(config.database_path_str(), config.attachments_dir.clone()).await?;
    let app = App::new(config, Arc::new(store), session, Arc::new(ConsoleModal));

    match &cli.command {
        Commands::Bills => {
            print!("{}", app.bills_page().await);
        }

        Commands::New { file, .. } => {
            let form = cli
                .command
                .new_bill_form()
                .context("Missing new bill form values")?;

            match app.submit_new_bill(&form, file.as_deref()).await {
                Ok(FormState::Submitted) => {
                    if let Some(page) = app.render_pending().await {
                        print!("{}", page);
                    }
                }
                Ok(state) => error!("Bill was not submitted ({:?})", state),
                Err(e) => error!("Bill was not submitted: {}", e),
            }
        }

        Commands::Show { url } => {
            app.show_receipt(url);
        }

        Commands::Import { file } => {
            let json = std::fs::read_to_string(file)
                .with_context(|| format!("Cannot read {}", file.display()))?;
            match app.import_bills(&json).await {
                Ok(count) => info!("Successfully imported {} bills", count),
                Err(e) => error!("Import failed: {}", e),
            }
        }

        Commands::Login { .. } => {}
    }

    Ok(())
}
