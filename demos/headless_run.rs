//! Run the Dockside start headless for a few seconds of simulated wall time
//! and print the final board as JSON.
//!
//!     cargo run --example headless_run [config.json]

use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::prelude::*;

use dockside_sim::{
    CardType, SimConfig, SimContext, StartingState, VerbCard, VerbKind, VerbResolution,
    VerbSlotBoard,
};

const FRAME_MS: u64 = 16;
const RUN_MS: u64 = 12_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };
    let mut ctx = SimContext::new(config.clone(), &StartingState::dockside())?;
    let mut board = VerbSlotBoard::new(ctx.queue(), config.slot_cooldown_ms);

    let inbox: Arc<Mutex<Vec<VerbResolution>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = inbox.clone();
    ctx.on_resolution(move |resolution| sink.lock().push(resolution.clone()));

    board.drop_card(
        VerbKind::Work,
        VerbCard::new("the-docks", "The Docks", CardType::Location),
    );
    board.drop_card(
        VerbKind::Scheme,
        VerbCard::new(
            "shipment-window",
            "Shipment Looking the Other Way",
            CardType::Situation,
        ),
    );
    board.drop_card(
        VerbKind::Scheme,
        VerbCard::new("intel", "Intel", CardType::Resource),
    );

    let mut now_ms = 0;
    while now_ms < RUN_MS {
        now_ms += FRAME_MS;
        board.tick(FRAME_MS, now_ms);
        ctx.advance(FRAME_MS);

        for resolution in inbox.lock().drain(..) {
            tracing::info!(verb = %resolution.slot_id, "{}", resolution.line);
            board.record_resolution(&resolution);
        }
    }

    let snapshot = ctx
        .read_snapshot()
        .ok_or("world was not ready after seeding")?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
