mod activity;
mod channel_name;
mod config;
mod error;
mod handler;
mod monitor;
mod outbox;

use crate::config::Config;
use crate::error::Error;
use crate::handler::{App, Handler};
use serenity::all::{Client, GatewayIntents, OnlineStatus};
use serenity::gateway::ShardManager;
use serenity::http::Http;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("starting up...");

    let cfg = Config::load()?;
    let app = Arc::new(App::new(&cfg));

    // Presences are needed to see what people are playing, voice states to
    // see who is in which channel
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::GUILD_PRESENCES;
    let mut client = Client::builder(&cfg.bot_token, intents)
        .event_handler(Handler { app: app.clone() })
        .await?;

    {
        let http = client.http.clone();
        let shard_manager = client.shard_manager.clone();
        tokio::spawn(shutdown_on_signal(http, shard_manager, app));
    }

    if let Err(e) = client.start().await {
        tracing::error!("An error occurred while running the client: {}", e);
        return Err(e.into());
    }

    Ok(())
}

// goodbye message, invisible presence, exit
async fn shutdown_on_signal(http: Arc<Http>, shard_manager: Arc<ShardManager>, app: Arc<App>) {
    wait_for_signal().await;
    tracing::info!("Exiting...");

    app.stop(&*http).await;

    for runner in shard_manager.runners.lock().await.values() {
        runner.runner_tx.set_presence(None, OnlineStatus::Invisible);
    }
    shard_manager.shutdown_all().await;

    std::process::exit(0);
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Unable to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Unable to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
