use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod library;
mod metadata;
mod runtime;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics go to stderr so the stdout narrative and prompt stay readable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    runtime::run()
}
