use clap::Parser;
use forms_gateway::adapters::mailer::{HttpMailer, NoopMailer};
use forms_gateway::adapters::store::{JsonlStore, MemoryStore};
use forms_gateway::config::{AppConfig, Args};
use forms_gateway::domain::ports::{DocumentStore, Notifier};
use forms_gateway::http::{self, AppState};
use forms_gateway::utils::error::ErrorSeverity;
use forms_gateway::utils::{logger, validation::Validate};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting forms-gateway");

    let config = match AppConfig::resolve(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(3);
    }

    tracing::info!("✅ Configuration loaded and validated");
    tracing::info!(
        "📨 Notifications: {} -> {} ({})",
        config.notify_from,
        config.notify_to,
        config
            .mail_endpoint
            .as_deref()
            .unwrap_or("mail transport disabled")
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("🌐 Listening on {}", listener.local_addr()?);

    let result = match (config.in_memory, config.mail_endpoint.clone()) {
        (true, Some(endpoint)) => {
            tracing::info!("💾 Using in-memory store");
            run(
                listener,
                Arc::new(MemoryStore::new()),
                Arc::new(HttpMailer::new(endpoint, config.mail_api_key.clone())),
                &config,
            )
            .await
        }
        (true, None) => {
            tracing::info!("💾 Using in-memory store");
            run(
                listener,
                Arc::new(MemoryStore::new()),
                Arc::new(NoopMailer),
                &config,
            )
            .await
        }
        (false, Some(endpoint)) => {
            tracing::info!("💾 Storing submissions under {}", config.data_dir);
            run(
                listener,
                Arc::new(JsonlStore::new(&config.data_dir)),
                Arc::new(HttpMailer::new(endpoint, config.mail_api_key.clone())),
                &config,
            )
            .await
        }
        (false, None) => {
            tracing::info!("💾 Storing submissions under {}", config.data_dir);
            run(
                listener,
                Arc::new(JsonlStore::new(&config.data_dir)),
                Arc::new(NoopMailer),
                &config,
            )
            .await
        }
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<S, N>(
    listener: tokio::net::TcpListener,
    store: Arc<S>,
    notifier: Arc<N>,
    config: &AppConfig,
) -> forms_gateway::Result<()>
where
    S: DocumentStore + 'static,
    N: Notifier + 'static,
{
    let state = AppState::new(store, notifier, config);
    let app = http::router(state, config)?;
    http::serve(listener, app).await
}
