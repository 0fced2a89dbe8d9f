/// Configure tracing once at application startup for the entire process.
///
/// Verbosity comes from `RUST_LOG` (default `info`), e.g.
/// `RUST_LOG=order_register::clients=debug`. Output goes to stderr so that
/// stdout carries only the rendered tables.
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
