use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reach::axl::{AxlClient, AxlConfig};
use reach::models::{LineRef, PhoneSearch};
use reach::provision::{provision, verify, ProvisionRequest};

#[derive(Parser)]
#[command(name = "reachctl")]
#[command(about = "Provision and verify Single Number Reach on Cisco Unified CM")]
struct Cli {
    /// AXL server host (or REACH_SERVER)
    #[arg(long, global = true)]
    server: Option<String>,

    /// AXL application user (or REACH_USER)
    #[arg(long, global = true)]
    user: Option<String>,

    /// AXL password (or REACH_PASSWORD)
    #[arg(long, global = true)]
    password: Option<String>,

    /// AXL schema version (or REACH_VERSION, default 12.5)
    #[arg(long, global = true)]
    version: Option<String>,

    /// Accept the server's certificate without validation
    #[arg(long, global = true)]
    insecure: bool,

    /// Tries per request on network failure (1 = no retry)
    #[arg(long, global = true, default_value = "1")]
    attempts: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision Single Number Reach for a user
    Provision {
        #[arg(long)]
        user_id: String,

        /// Mobile number calls are extended to
        #[arg(long)]
        mobile: String,

        /// Desk line pattern
        #[arg(long)]
        pattern: String,

        /// Desk line route partition
        #[arg(long)]
        partition: String,

        #[arg(long)]
        device_pool: String,

        #[arg(long)]
        css: Option<String>,

        #[arg(long)]
        reroute_css: Option<String>,

        #[arg(long)]
        mobility_css: Option<String>,
    },
    /// Read back live Single Number Reach state for a user
    Verify {
        #[arg(long)]
        user_id: String,
    },
    /// Find phones by line association and/or substring filters
    SearchPhones {
        /// Line pattern (requires --partition)
        #[arg(long, requires = "partition")]
        pattern: Option<String>,

        /// Line route partition
        #[arg(long)]
        partition: Option<String>,

        /// Case-insensitive description substring
        #[arg(long)]
        description: Option<String>,

        /// Case-insensitive owner substring
        #[arg(long)]
        owner: Option<String>,

        /// Case-insensitive device-name substring
        #[arg(long)]
        name: Option<String>,

        /// Cap on matches expanded to full detail
        #[arg(long, default_value = "25")]
        limit: usize,
    },
    /// Restart every device carrying a line
    ResetLine {
        #[arg(long)]
        pattern: String,

        #[arg(long)]
        partition: String,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "reach=info".into()),
    );
    // Reports go to stdout as JSON; keep logging on stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_client(cli: &Cli) -> anyhow::Result<AxlClient> {
    let pick = |flag: &Option<String>, env: &str| -> Option<String> {
        flag.clone().or_else(|| std::env::var(env).ok())
    };
    let server = pick(&cli.server, "REACH_SERVER").unwrap_or_default();
    let user = pick(&cli.user, "REACH_USER").unwrap_or_default();
    let password = pick(&cli.password, "REACH_PASSWORD").unwrap_or_default();
    let version =
        pick(&cli.version, "REACH_VERSION").unwrap_or_else(|| "12.5".to_string());

    let config = AxlConfig::new(server, user, password, version)
        .insecure(cli.insecure)
        .max_attempts(cli.attempts);
    Ok(AxlClient::new(config)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let client = build_client(&cli)?;

    match cli.command {
        Commands::Provision {
            user_id,
            mobile,
            pattern,
            partition,
            device_pool,
            css,
            reroute_css,
            mobility_css,
        } => {
            let mut request = ProvisionRequest::new(
                user_id,
                mobile,
                LineRef::new(pattern, partition),
                device_pool,
            );
            request.calling_search_space = css;
            request.reroute_calling_search_space = reroute_css;
            request.mobility_calling_search_space = mobility_css;

            let report = provision(&client, &request).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.fully_applied() {
                bail!("one or more provisioning steps failed");
            }
        }
        Commands::Verify { user_id } => {
            let snapshot = verify(&client, &user_id).await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::SearchPhones {
            pattern,
            partition,
            description,
            owner,
            name,
            limit,
        } => {
            let line = match (pattern, partition) {
                (Some(pattern), Some(partition)) => Some(LineRef::new(pattern, partition)),
                _ => None,
            };
            let criteria = PhoneSearch {
                line,
                description,
                owner,
                name,
                limit,
            };
            let result = client.search_phones(&criteria).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            if result.truncated {
                tracing::warn!(limit, "result truncated; raise --limit for the full set");
            }
        }
        Commands::ResetLine { pattern, partition } => {
            let line = LineRef::new(pattern, partition);
            client.reset_line(&line).await?;
            tracing::info!(pattern = %line.pattern, "reset submitted");
        }
    }

    Ok(())
}
