//! Brick Tower entry point
//!
//! Headless native runner: builds towers in simulated time and logs what
//! happens. Usage: `brick-tower [settings.json]`

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use brick_tower::sim::{BuildOutcome, Game};
use brick_tower::Settings;

fn main() {
    env_logger::init();
    log::info!("Brick Tower (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    log::info!("Seed: {}", seed);

    let mut game = Game::new(seed);
    let frame = Duration::from_millis(settings.frame_ms);

    for _ in 0..settings.frame_count() {
        for outcome in game.advance(frame) {
            if let BuildOutcome::RowCompleted { row, multiplier } = outcome {
                let state = game.state();
                log::info!(
                    "Row {} at {:.1}x, tower worth {} (speed {:.2}x)",
                    row + 1,
                    multiplier,
                    state.tower_value_display(),
                    state.speed_multiplier()
                );
            }
        }

        if let Some(rows) = settings.auto_sell_rows {
            if game.state().tower_height() >= rows && game.state().can_sell() {
                game.sell_tower();
            }
        }
    }

    let state = game.state();
    println!(
        "After {:.1}s: gold {}, towers sold {}, current tower {} rows / {} bricks (worth {})",
        game.now().as_secs_f32(),
        state.gold_display(),
        state.towers_sold(),
        state.tower_height(),
        state.total_bricks_placed(),
        state.tower_value_display()
    );

    if settings.print_snapshot {
        match serde_json::to_string_pretty(&game.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Could not serialize snapshot: {}", e),
        }
    }
}
