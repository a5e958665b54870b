/// Roster Server - users service
use clap::{Parser, Subcommand};
use roster_client::{ClientConfig, RosterClient};
use roster_core::{CreateUser, UserStore};
use roster_server::{create_router, config::ServerConfig, services::AuthService, state::AppState};
use roster_storage::LocalUserStore;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roster-server")]
#[command(about = "Roster users service", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./roster.toml when present)
    #[arg(short, long, global = true, env = "ROSTER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password (users without one cannot log in)
        #[arg(short, long)]
        password: Option<String>,
        /// Grant administrative rights
        #[arg(long)]
        admin: bool,
    },
    /// List all users
    ListUsers,
    /// Print the users list as HTML
    Render {
        /// Fetch users from a running service instead of the local database
        #[arg(long)]
        url: Option<String>,
        /// Render the whole page rather than just the list
        #[arg(long)]
        page: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddUser {
            username,
            email,
            password,
            admin,
        } => {
            let mut request = CreateUser::new(username, email);
            request.password = password;
            request.admin = admin;
            add_user(config, request).await?;
        }
        Commands::ListUsers => list_users(config).await?,
        Commands::Render { url, page } => render(config, url, page).await?,
    }

    Ok(())
}

async fn open_store(config: &ServerConfig) -> anyhow::Result<LocalUserStore> {
    let pool = roster_storage::create_pool(&config.storage.database_url).await?;
    roster_storage::run_migrations(&pool).await?;
    Ok(LocalUserStore::new(pool))
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    )
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Roster server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let store = open_store(&config).await?;
    let user_count = store.count_users().await?;
    tracing::info!(users = user_count, "Database connected");

    let app_state = AppState::new(Arc::new(store), Arc::new(auth_service(&config)));
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

async fn add_user(config: ServerConfig, request: CreateUser) -> anyhow::Result<()> {
    request.validate()?;

    let store = open_store(&config).await?;

    let password_hash = match request.password.as_deref() {
        Some(password) => Some(auth_service(&config).hash_password(password)?),
        None => None,
    };

    let user = store.create_user(request, password_hash).await?;
    tracing::info!(user_id = user.id, admin = user.admin, "User created");
    println!("Created user {} ({})", user.username, user.id);

    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let store = open_store(&config).await?;
    let users = store.get_all_users().await?;

    println!("Users:");
    for user in users {
        let state = if user.active { "active" } else { "inactive" };
        println!("  {} - {} <{}> [{}]", user.id, user.username, user.email, state);
    }

    Ok(())
}

async fn render(config: ServerConfig, url: Option<String>, page: bool) -> anyhow::Result<()> {
    let users = match url {
        Some(url) => RosterClient::new(ClientConfig::new(url))?.list_users().await?,
        None => open_store(&config).await?.get_all_users().await?,
    };

    if page {
        println!("{}", roster_view::render_page(&users));
    } else {
        println!("{}", roster_view::users_list(&users).to_html());
    }

    Ok(())
}
