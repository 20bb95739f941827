use std::net::SocketAddr;
use std::process;
use std::sync::Arc;

use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use roster::api;
use roster::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use roster::handlers;
use roster::models::{AppState, UserRecord};
use roster::view::UserDirectoryView;

// Embed the default stylesheet in the binary
const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(format!("Roster/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
}

/// Read the backend endpoint and key from the environment, exiting when
/// either is missing. Configuration errors are startup errors, not runtime
/// ones.
fn require_api_config() -> (String, String) {
    let api_base_url = config::get_api_base_url();
    let api_key = config::get_api_key();
    if api_base_url.is_empty() {
        eprintln!("{}", yansi::Paint::new("API_BASE_URL is not configured").red());
        process::exit(1);
    }
    if api_key.is_empty() {
        eprintln!("{}", yansi::Paint::new("API_KEY is not configured").red());
        process::exit(1);
    }
    (api_base_url, api_key)
}

fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);
    let (api_base_url, api_key) = require_api_config();
    let client = build_client();
    let view = UserDirectoryView::new(client, api_base_url.clone(), api_key);
    AppState {
        view: Arc::new(Mutex::new(view)),
        api_base_url,
        custom_css: None,
    }
}

fn build_app(state: AppState) -> Router {
    // Always serve styles.css - use custom if provided, otherwise the embedded default
    let stylesheet_content = state
        .custom_css
        .clone()
        .unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());

    Router::new()
        .route("/", get(handlers::directory::directory_get))
        .route("/users", post(handlers::directory::users_submit))
        .route("/users/:id/edit", post(handlers::directory::users_edit))
        .route("/users/:id/delete", post(handlers::directory::users_delete))
        .route("/edit/cancel", post(handlers::directory::users_cancel_edit))
        .route("/refresh", post(handlers::directory::directory_refresh))
        .route(
            "/static/styles.css",
            get(move || {
                let css = stylesheet_content.clone();
                async move { ([(axum::http::header::CONTENT_TYPE, "text/css")], css) }
            }),
        )
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=31536000, immutable"),
                ))
                .service(ServeDir::new("static")),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!(
                    "{} {}: {}",
                    yansi::Paint::red("Failed to read custom stylesheet at"),
                    path,
                    e
                );
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };

    // Initial fetch: the directory is presented from in-memory state, so
    // populate it once before the first request.
    {
        let mut view = state.view.lock().await;
        view.load().await;
        tracing::info!(count = view.records().len(), "Loaded user directory");
    }

    let app = build_app(state.clone());
    tracing::info!(%addr, "Starting Roster server");
    println!(
        "{} {}",
        yansi::Paint::new("Web server running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new(
                    "Please stop any process using this port, or start the server with a different --port value."
                )
                .yellow()
            );
            process::exit(1);
        }
    }
}

fn print_users_table(users: &[UserRecord]) {
    if users.is_empty() {
        println!("(no users)");
        return;
    }
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w - 4);
    }
    table.set_header(vec!["ID", "Name", "Email"]);
    for u in users {
        table.add_row(vec![&u.id, &u.name, &u.email]);
    }
    println!("\n{table}\n");
}

#[derive(Parser)]
#[command(
    name = "roster",
    author,
    version,
    about = "Roster command-line tool",
    long_about = r#"Roster — a small console for a hosted user table.

Serve a single-page directory of user records (name, email) backed by a
remote data API, or manage the same records straight from the terminal.
Provide the backend endpoint and access key via `API_BASE_URL` / `API_KEY`
environment variables or an `--env-file`.

Examples:
  1) Build & run (dev):
      cargo run -- serve --host 127.0.0.1 --port 8080
  2) Manage users:
      roster users list
      roster users add "Alice" a@x.com
"#,
    after_help = "Use `roster <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Validate configuration (env vars / API credentials)
    #[command(
        about = "Validate configuration and ensure API connectivity.",
        long_about = "Validate the environment variables required by Roster, then validate the configured access key by listing users from the remote data API."
    )]
    CheckConfig { env_file: Option<String> },
    /// Manage user records via the configured API
    Users {
        #[command(subcommand)]
        sub: UserCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    #[command(about = "List user records", long_about = "Fetch every user record (id, name, email) from the remote table.")]
    List,
    #[command(about = "Add a user record", long_about = "Insert a record with the given name and email; the backend assigns the id.")]
    Add { name: String, email: String },
    #[command(about = "Update a user record", long_about = "Overwrite the name and email of the record with the given id.")]
    Update {
        id: String,
        name: String,
        email: String,
    },
    #[command(about = "Remove a user record", long_about = "Delete the record with the given id from the remote table.")]
    Remove { id: String },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // CLI parsing
    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    // Dispatch CLI commands. If no command provided, serve the web app by default
    if cli.command.is_none() {
        let state = build_state_from_env(None);
        start_server(state, DEFAULT_HOST, DEFAULT_PORT, None).await;
        return;
    }
    match cli.command.unwrap() {
        Commands::Serve {
            host,
            port,
            env_file,
            stylesheet,
        } => {
            let state = build_state_from_env(env_file.as_deref());
            start_server(state, &host, port, stylesheet).await;
        }
        Commands::CheckConfig { env_file } => {
            config::load_env_file(env_file.as_deref());
            let (api_base_url, api_key) = require_api_config();
            let client = build_client();
            match api::list_users(&client, &api_base_url, &api_key).await {
                Ok(users) => {
                    println!(
                        "{}",
                        yansi::Paint::new(format!(
                            "Configuration looks valid ({} users returned)",
                            users.len()
                        ))
                        .green()
                    );
                    process::exit(0);
                }
                Err(e) => {
                    eprintln!(
                        "{}: {}",
                        yansi::Paint::new("Configuration appears invalid").red(),
                        e
                    );
                    process::exit(1);
                }
            }
        }
        Commands::Users { sub } => {
            config::load_env_file(None);
            let (api_base_url, api_key) = require_api_config();
            let client = build_client();
            match sub {
                UserCommands::List => match api::list_users(&client, &api_base_url, &api_key).await
                {
                    Ok(users) => print_users_table(&users),
                    Err(e) => {
                        eprintln!("{}: {}", yansi::Paint::new("Failed to list users").red(), e);
                        process::exit(1);
                    }
                },
                UserCommands::Add { name, email } => {
                    let name = name.trim();
                    let email = email.trim();
                    if name.is_empty() || email.is_empty() {
                        eprintln!("{}", yansi::Paint::new("Provide a name and an email").red());
                        process::exit(1);
                    }
                    match api::insert_user(&client, &api_base_url, &api_key, name, email).await {
                        Ok(created) => {
                            for u in &created {
                                println!(
                                    "{} {} <{}> (id {})",
                                    yansi::Paint::new("Added").green(),
                                    u.name,
                                    u.email,
                                    u.id
                                );
                            }
                        }
                        Err(e) => {
                            eprintln!("{}: {}", yansi::Paint::new("Failed to add user").red(), e);
                            process::exit(1);
                        }
                    }
                }
                UserCommands::Update { id, name, email } => {
                    let name = name.trim();
                    let email = email.trim();
                    if name.is_empty() || email.is_empty() {
                        eprintln!("{}", yansi::Paint::new("Provide a name and an email").red());
                        process::exit(1);
                    }
                    match api::update_user(&client, &api_base_url, &api_key, &id, name, email).await
                    {
                        Ok(updated) if updated.is_empty() => {
                            eprintln!(
                                "{} '{}' {}",
                                yansi::Paint::new("User").red(),
                                id,
                                yansi::Paint::new("not found").red()
                            );
                            process::exit(1);
                        }
                        Ok(updated) => {
                            for u in &updated {
                                println!(
                                    "{} {} <{}> (id {})",
                                    yansi::Paint::new("Updated").green(),
                                    u.name,
                                    u.email,
                                    u.id
                                );
                            }
                        }
                        Err(e) => {
                            eprintln!(
                                "{}: {}",
                                yansi::Paint::new("Failed to update user").red(),
                                e
                            );
                            process::exit(1);
                        }
                    }
                }
                UserCommands::Remove { id } => {
                    match api::delete_user(&client, &api_base_url, &api_key, &id).await {
                        Ok(()) => {
                            println!(
                                "{} '{}' {}",
                                yansi::Paint::new("User").green(),
                                id,
                                yansi::Paint::new("removed").green()
                            );
                        }
                        Err(e) => {
                            eprintln!(
                                "{}: {}",
                                yansi::Paint::new("Failed to remove user").red(),
                                e
                            );
                            process::exit(1);
                        }
                    }
                }
            }
        }
    }
}
