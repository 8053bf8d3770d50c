//! Headless tick-loop demo
//!
//! Activates a celebration session and drives it at a simulated 60fps,
//! printing a few sampled entities per second. Run with:
//!
//! ```sh
//! cargo run -p ovation_engine --example headless
//! ```

use ovation_engine::{EngineConfig, EntityKind, OverlayEngine, Viewport};

fn main() -> ovation_engine::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let config = EngineConfig::with_viewport(Viewport::new(390.0, 844.0));
    let mut engine = OverlayEngine::new(config)?;
    engine.activate(7);

    let frame_ms = 1_000.0 / 60.0;
    for frame_index in 0..240u32 {
        let now = frame_index as f64 * frame_ms;
        let frame = engine.tick(now);

        if frame_index % 60 == 0 {
            let session = engine.session().expect("session is active");
            let mut particles = 0usize;
            let mut visible = 0usize;
            for (id, kind) in session.entities() {
                if let EntityKind::Particle(_) = kind {
                    particles += 1;
                    if frame[&id].opacity > 0.0 {
                        visible += 1;
                    }
                }
            }
            println!(
                "t={:>6.0}ms  entities={}  particles={} ({} visible)",
                now,
                frame.len(),
                particles,
                visible
            );
        }
    }

    engine.deactivate();
    println!("torn down, active clocks = {}", engine.clock_count());
    Ok(())
}
