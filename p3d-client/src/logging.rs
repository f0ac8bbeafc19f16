//! Logger setup.
//!
//! Lines go to stderr as `[time level target] message`. Debug builds log at
//! `Debug`, release builds at `Info`.

/// Installs the global logger. Fails if a logger is already installed.
pub fn init() -> Result<(), log::SetLoggerError> {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Warn)
        .level_for("pyramid3d", level)
        .level_for("p3d_core", level)
        .chain(std::io::stderr())
        .apply()
}
