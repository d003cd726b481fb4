mod bot;
mod config;

use bot::Bot;
use color_eyre::{eyre::WrapErr, Result};
use config::ServerConfig;
use futures::future::join_all;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use unoref::{bus::MessageBus, inspect, player::Roster, referee::Referee};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config = ServerConfig::from_env()?;
    let roster = Roster::new(config.players.clone()).wrap_err("Invalid player list")?;
    info!(players = ?roster.ids(), "starting game");

    // A network gate would expose both buses; here every seat is an
    // in-process bot.
    let bus = MessageBus::new();
    let inspect_bus = MessageBus::new();

    let referee = Referee::new(bus.clone(), roster.clone(), config.game.clone());
    let game = referee.game();
    let inspector = tokio::spawn(inspect::serve(
        inspect_bus,
        referee.game(),
        referee.shutdown_signal(),
    ));

    let mut rng = config.game.rng();
    let bots = roster
        .iter()
        .map(|id| {
            let bot = Bot::new(id.clone(), bus.clone(), config.forget_uno_chance, &mut rng);
            tokio::spawn(bot.run())
        })
        .collect::<Vec<_>>();

    let winner = referee.run().await.wrap_err("Game aborted")?;

    for bot in join_all(bots).await {
        bot??;
    }
    inspector.await??;

    let board = game.with(|table| table.board()).await;
    info!(%winner, board = %serde_json::to_string(&board)?, "final board");

    bus.close();
    Ok(())
}
