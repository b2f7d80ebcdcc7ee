//! hand_studio — interactive entry point.

use hand_studio::app::{config_from_args, run, SourceConfig, USAGE};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return;
    }

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Hand Studio — Pinch, Drag & Paddle Playground         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let cfg = match config_from_args(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match &cfg.source {
        SourceConfig::Simulator      => println!("  Hands: mouse simulation (hold left button to pinch)"),
        SourceConfig::Replay { path } => println!("  Hands: replaying {}", path.display()),
    }
    println!("  Mode:  {}   Surface: {}x{}", cfg.mode.label(), cfg.surface.width, cfg.surface.height);
    println!();
    println!("  Opening window…  (RUST_LOG=debug for gesture tracing)");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
