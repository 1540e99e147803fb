//! Maintenance commands run outside the API server.

use std::io::Write;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hostwatch_db::repositories::UserRepo;
use hostwatch_db::DbPool;
use hostwatch_events::{DispatchScheduler, Dispatcher};

#[derive(Parser)]
#[command(name = "hostwatch-worker")]
#[command(about = "Hostwatch background jobs")]
#[command(version)]
struct Cli {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send every queued notification
    SendNotifications {
        /// Keep running, dispatching every N seconds until Ctrl-C
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Activate a registered account so it can authenticate
    ActivateUser {
        username: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hostwatch_worker=info,hostwatch_events=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let pool = hostwatch_db::create_pool(&cli.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Command::SendNotifications { interval: None } => send_once(pool).await,
        Command::SendNotifications {
            interval: Some(secs),
        } => send_repeatedly(pool, secs).await,
        Command::ActivateUser { username } => activate_user(&pool, &username).await,
    }
}

fn dispatcher(pool: DbPool) -> anyhow::Result<Dispatcher> {
    let transport = hostwatch_events::transport_from_env().context("Invalid SMTP configuration")?;
    Ok(Dispatcher::new(pool, transport))
}

async fn send_once(pool: DbPool) -> anyhow::Result<()> {
    let dispatcher = dispatcher(pool)?;

    print!("Sending notifications... ");
    std::io::stdout().flush()?;
    let report = dispatcher.dispatch().await?;
    println!("done. ({} sent, {} failed)", report.sent, report.failed);
    Ok(())
}

async fn send_repeatedly(pool: DbPool, secs: u64) -> anyhow::Result<()> {
    if secs == 0 {
        bail!("--interval must be at least 1 second");
    }
    let scheduler = DispatchScheduler::new(dispatcher(pool)?, Duration::from_secs(secs));

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    println!("Sending notifications every {secs}s, press Ctrl-C to stop.");
    scheduler.run(cancel).await;
    println!("done.");
    Ok(())
}

async fn activate_user(pool: &DbPool, username: &str) -> anyhow::Result<()> {
    let Some(user) = UserRepo::find_by_username(pool, username).await? else {
        bail!("No user named '{username}'");
    };
    if user.is_active {
        println!("{username} is already active.");
        return Ok(());
    }
    UserRepo::set_active(pool, user.id, true).await?;
    tracing::info!(user_id = user.id, %username, "User activated");
    println!("{username} activated.");
    Ok(())
}
