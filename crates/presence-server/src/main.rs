use anyhow::Result;

use presence_core::Config;
use presence_server::{routes, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    presence_core::init()?;

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;

    tracing::info!(
        "Presence listening on 127.0.0.1:{}, scanning {} calendar(s)",
        config.server.port,
        config.calendar.calendar_ids.len()
    );

    warp::serve(routes(state))
        .run(([127, 0, 0, 1], config.server.port))
        .await;

    Ok(())
}
