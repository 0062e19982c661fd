//! Watches a synthetic stream and prints quality reports as they arrive.
//!
//! Run with: cargo run -p streamlens-capture --example watch

use std::sync::Arc;
use std::time::Duration;

use streamlens_capture::{SessionConfig, SessionEvent, StreamSession, SyntheticConnector};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== StreamLens Synthetic Watch ===\n");

    let connector = Arc::new(SyntheticConnector::new(640, 480));
    let mut config = SessionConfig::default();
    config.analysis_interval = 5;

    let mut session = StreamSession::new("synthetic://demo", config, connector);
    let events = session.events();
    session.start()?;
    println!("✓ Capturing from {}", session.url());

    let mut frames = 0u64;
    let mut reports = 0u32;
    while reports < 5 {
        match events.recv_timeout(Duration::from_secs(5))? {
            SessionEvent::FrameProduced(frame) => {
                frames += 1;
                if frames % 30 == 0 {
                    println!(
                        "  {} frames so far ({}x{} {:?})",
                        frames, frame.width, frame.height, frame.format
                    );
                }
            }
            SessionEvent::QualityComputed(report) => {
                reports += 1;
                println!("  quality #{}: {}", reports, report.message());
            }
            SessionEvent::ConnectionStateChanged { connected, message } => {
                let direction = if connected { "up" } else { "down" };
                println!("  connection {}: {}", direction, message);
            }
            SessionEvent::ConnectionLost => {
                println!("  connection lost, reconnecting");
            }
            SessionEvent::ErrorOccurred(err) => {
                println!("  session error: {}", err);
                break;
            }
        }
    }

    session.stop();

    let snap = session.metrics().snapshot();
    println!("\n--- Session Summary ---");
    println!("  Frames read:     {}", snap.frames_read);
    println!("  Frames analyzed: {}", snap.frames_analyzed);
    println!("  Capture FPS:     {:.1}", snap.capture_fps);
    println!("  Disconnects:     {}", snap.disconnects);
    println!("✓ Stopped cleanly");

    Ok(())
}
