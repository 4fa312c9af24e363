use std::net::SocketAddr;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use yansi::Paint;

use sheetsync::api::HttpTransport;
use sheetsync::config::{self, AppConfig, DEFAULT_HOST, DEFAULT_PORT};
use sheetsync::models::AppState;
use sheetsync::routes::build_router;
use sheetsync::view::{Field, TerminalView, View};
use sheetsync::{FetchOutcome, FormSyncClient};

#[derive(Parser)]
#[command(
    name = "sheetsync",
    author,
    version,
    about = "Send name/role entries to a spreadsheet endpoint and view its rows",
    long_about = r#"sheetsync writes a name/role pair to a spreadsheet-backed web endpoint and shows the sheet's rows as a table.

The endpoint URL comes from SCRIPT_URL (environment or .env file). Set ACCESS_CONTROL=true when the endpoint expects an access key on every request.

Examples:
  1) Run the web form:
      sheetsync serve --port 8080
  2) Add a row from the terminal:
      sheetsync submit --name Alice --role Admin
  3) Print the sheet:
      sheetsync fetch
"#,
    after_help = "Use `sheetsync <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Hide the debug log lines
    #[arg(long, global = true)]
    quiet: bool,
    /// Require an access key on every request (overrides ACCESS_CONTROL)
    #[arg(long, global = true)]
    access_control: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web form
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
    },
    /// Submit one name/role entry, then print the refreshed sheet
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        /// Access key (access-control mode only)
        #[arg(long)]
        key: Option<String>,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Print the sheet as a table
    Fetch {
        /// Access key (access-control mode only)
        #[arg(long)]
        key: Option<String>,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Validate configuration
    #[command(
        about = "Validate configuration",
        long_about = "Check that SCRIPT_URL is set and the remaining variables parse. Does not contact the endpoint."
    )]
    CheckConfig {
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
}

fn build_config(cli: &Cli, env_file: Option<&str>) -> AppConfig {
    config::load_env_file(env_file);
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(%e, "Invalid configuration");
            eprintln!("{}: {}", "Invalid configuration".red(), e);
            process::exit(1);
        }
    };
    cfg.with_cli_overrides(cli.access_control, cli.quiet)
}

fn build_transport(cfg: &AppConfig) -> HttpTransport {
    match HttpTransport::new(cfg.request_timeout) {
        Ok(transport) => transport,
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", "Failed to create HTTP client".red(), e);
            process::exit(1);
        }
    }
}

async fn start_server(cfg: AppConfig, host: &str, port: u16) {
    let transport = build_transport(&cfg);
    let state = AppState::new(cfg, transport);
    state.client().announce_config();

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", "Invalid host/port format".red(), e);
            process::exit(1);
        }
    };
    let app = build_router(state);
    tracing::info!(%addr, "Starting sheetsync server");
    println!("{} {}", "Web form running on".green(), format!("http://{}", addr).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", "Server error".red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                format!("Failed to bind to {}", addr).red(),
                e,
                "Please stop any process using this port, or start the server with a different --port value.".yellow()
            );
            process::exit(1);
        }
    }
}

fn terminal_client(cfg: AppConfig, view: TerminalView) -> FormSyncClient<HttpTransport, TerminalView> {
    let transport = build_transport(&cfg);
    let client = FormSyncClient::new(cfg, transport, view);
    client.announce_config();
    client
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    let command = cli.command.as_ref();
    match command {
        None => {
            let cfg = build_config(&cli, None);
            start_server(cfg, DEFAULT_HOST, DEFAULT_PORT).await;
        }
        Some(Commands::Serve { host, port, env_file }) => {
            let cfg = build_config(&cli, env_file.as_deref());
            start_server(cfg, host, *port).await;
        }
        Some(Commands::Submit {
            name,
            role,
            key,
            env_file,
        }) => {
            let cfg = build_config(&cli, env_file.as_deref());
            let view = TerminalView::new(cfg.debug_log)
                .with_field(Field::Name, name.as_str())
                .with_field(Field::Role, role.as_str())
                .with_field(Field::Key, key.clone().unwrap_or_default());
            let client = terminal_client(cfg, view);
            match client.submit().await {
                Ok(outcome) => {
                    println!("{}", "Saved to sheet".green());
                    if outcome.refresh.is_err() {
                        process::exit(1);
                    }
                }
                Err(e) => {
                    eprintln!("{}", e.to_string().red());
                    process::exit(1);
                }
            }
        }
        Some(Commands::Fetch { key, env_file }) => {
            let cfg = build_config(&cli, env_file.as_deref());
            let view = TerminalView::new(cfg.debug_log);
            if let Some(key) = key {
                view.set_field(Field::Key, key);
            }
            let client = terminal_client(cfg, view);
            match client.fetch_data().await {
                Ok(FetchOutcome::Rendered { rows }) => {
                    println!("{}", format!("{} rows", rows.saturating_sub(1)).dim());
                }
                Ok(FetchOutcome::Empty) => {}
                Err(e) => {
                    eprintln!("{}", e.to_string().red());
                    process::exit(1);
                }
            }
        }
        Some(Commands::CheckConfig { env_file }) => {
            let cfg = build_config(&cli, env_file.as_deref());
            println!("{:<22}{}", "SCRIPT_URL", if cfg.is_configured() { cfg.script_url.as_str() } else { "(not set)" });
            println!("{:<22}{}", "ACCESS_CONTROL", cfg.access_control);
            println!("{:<22}{}", "DEBUG_LOG", cfg.debug_log);
            println!(
                "{:<22}{}",
                "REQUEST_TIMEOUT_SECS",
                cfg.request_timeout
                    .map(|t| t.as_secs().to_string())
                    .unwrap_or_else(|| "(none)".into())
            );
            match cfg.validate() {
                Ok(()) => println!("{}", "Configuration looks valid".green()),
                Err(e) => {
                    eprintln!("{}", e.to_string().red());
                    process::exit(1);
                }
            }
        }
    }
}
