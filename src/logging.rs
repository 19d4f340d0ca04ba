//! Logger setup.
//!
//! Installs a [`fern`] dispatcher behind the [`log`] facade. Lines look like
//! `[12:04:31.207][INFO][hello_gl::render] rotating axis: ...`.

use log::LevelFilter;

use crate::config::LogConfig;

/// Parses a level name, falling back to `Info` for anything unknown.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Installs the global logger.
///
/// Output always goes to stdout, and is additionally appended to `config.file` when set.
pub fn init(config: &LogConfig) -> Result<(), String> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(parse_level(&config.level))
        .chain(std::io::stdout());

    if let Some(path) = &config.file {
        let file = fern::log_file(path)
            .map_err(|e| format!("Failed to open log file {}: {e}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    dispatch.apply().map_err(|e| e.to_string())
}
