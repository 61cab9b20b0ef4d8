use anyhow::Result;
use magazine_cms::application::{
    ports::{
        mailer::Mailer,
        rate_limit::RateLimiter,
        security::{PasswordHasher, TokenManager},
        time::Clock,
        util::SlugGenerator,
    },
    services::{ApplicationDependencies, ApplicationServices},
};
use magazine_cms::config::AppConfig;
use magazine_cms::infrastructure::{
    database,
    mail::{LogMailer, SmtpMailer},
    rate_limit::FixedWindowRateLimiter,
    repositories::{
        PostgresCommentRepository, PostgresContactRepository, PostgresContentReadRepository,
        PostgresContentWriteRepository, PostgresIssueRepository, PostgresSettingsRepository,
        PostgresSubmissionRepository, PostgresSubscriptionRepository, PostgresUserRepository,
    },
    security::{password::Argon2PasswordHasher, token::BiscuitTokenManager},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use magazine_cms::presentation::http::{
    routes::{RouterOptions, build_router_with_rate_limiter},
    state::HttpState,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.database_max_connections()).await?;
    database::run_migrations(&pool).await?;
    info!("database migrations applied");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let mailer: Arc<dyn Mailer> = match config.smtp() {
        Some(smtp) => {
            info!(host = %smtp.host, port = smtp.port, "smtp delivery enabled");
            Arc::new(SmtpMailer::new(smtp.clone())?)
        }
        None => {
            warn!("SMTP_HOST not set; outgoing mail is only logged");
            Arc::new(LogMailer)
        }
    };

    let services = Arc::new(ApplicationServices::new(ApplicationDependencies {
        user_repo: Arc::new(PostgresUserRepository::new(pool.clone())),
        content_write_repo: Arc::new(PostgresContentWriteRepository::new(pool.clone())),
        content_read_repo: Arc::new(PostgresContentReadRepository::new(pool.clone())),
        issue_repo: Arc::new(PostgresIssueRepository::new(pool.clone())),
        comment_repo: Arc::new(PostgresCommentRepository::new(pool.clone())),
        subscription_repo: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        settings_repo: Arc::new(PostgresSettingsRepository::new(pool.clone())),
        contact_repo: Arc::new(PostgresContactRepository::new(pool.clone())),
        submission_repo: Arc::new(PostgresSubmissionRepository::new(pool)),
        password_hasher,
        token_manager,
        mailer,
        clock: Arc::clone(&clock),
        slugger,
        site_url: config.site_url().to_string(),
    }));

    let rate_limiter: Arc<dyn RateLimiter> = Arc::new(FixedWindowRateLimiter::new(
        clock,
        config.rate_limit_max_requests(),
        config.rate_limit_window(),
    ));
    let state = HttpState {
        services,
        rate_limiter,
    };

    let options = RouterOptions {
        allowed_origins: config.allowed_origins().to_vec(),
        governor_per_second: config.governor_per_second(),
        governor_burst: config.governor_burst(),
    };
    let app = build_router_with_rate_limiter(state, &options);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    info!(%address, "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("server stopped");
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info,sqlx=warn"));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal received");
}
