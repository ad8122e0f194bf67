//! Example: List open windows and show what the resolver makes of them.
//!
//! Run with: cargo run -p kicad-presence-context --example list_titles

use chrono::Utc;
use kicad_presence_context::{
    classify, platform, ApplicationMode, PollOutcome, PresenceResolver, WindowTitleSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt()
        .with_env_filter("kicad_presence_context=debug")
        .init();

    let source = platform::detect()?;
    let titles = source.list_window_titles()?;

    println!("=== {} open windows ===", titles.len());
    for title in &titles {
        println!("  {title:?}");
    }

    println!("\n=== KiCad windows ===");
    let matches = classify(&titles);
    if matches.is_empty() {
        println!("  (none)");
    }
    for mode in ApplicationMode::PRIORITY {
        if let Some(title) = matches.get(mode) {
            println!("  {:<16} {title}", mode.label());
        }
    }

    println!("\n=== Presence ===");
    let mut resolver = PresenceResolver::new(Utc::now());
    match resolver.resolve(&titles) {
        PollOutcome::Active(state) => {
            println!("  {}", state.details);
            println!("  {}", state.state_text);
        }
        PollOutcome::Idle => println!("  KiCad is open but its title could not be read"),
        PollOutcome::Absent(_) => println!("  KiCad is not running"),
    }

    Ok(())
}
