// Logging setup
// The stores log through the `log` facade only; the embedding host calls
// `init` once (or installs its own logger instead).

use log::LevelFilter;

/// Install a stderr logger at `level`.
///
/// Returns an error if a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

/// Install a stderr logger with the level taken from `WORDFORGE_LOG`
/// (defaults to `info`).
pub fn init_from_env() -> Result<(), fern::InitError> {
    let level = match std::env::var("WORDFORGE_LOG").as_deref() {
        Ok("off") => LevelFilter::Off,
        Ok("error") => LevelFilter::Error,
        Ok("warn") => LevelFilter::Warn,
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    init(level)
}
