//! Stderr log output for the command-line tool

use log::LevelFilter;

/// Log level selected by the `--quiet` and `--verbose` flags
///
/// Quiet wins over verbose. Without either only warnings and errors are shown.
pub const fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Off,
        (false, true) => LevelFilter::Info,
        (false, false) => LevelFilter::Warn,
    }
}

/// Install the global logger writing `[LEVEL target] message` lines to stderr
///
/// Returns `false` if a logger was already installed, which leaves the existing
/// one in place.
pub fn init(level: LevelFilter) -> bool {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .is_ok()
}
