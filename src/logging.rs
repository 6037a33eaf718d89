//! Logger setup.
//!
//! Installs a [`fern`] dispatch behind the [`log`] facade. The level filter
//! comes from the `EMBER_LOG` environment variable (`trace` .. `off`),
//! defaulting to `info`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Installs the global logger once. Subsequent calls are ignored.
pub fn init() {
    INIT.call_once(|| {
        let level = std::env::var("EMBER_LOG")
            .ok()
            .and_then(|value| value.parse::<log::LevelFilter>().ok())
            .unwrap_or(log::LevelFilter::Info);

        let result = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    chrono::Local::now().format("%H:%M:%S"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stdout())
            .apply();

        if let Err(e) = result {
            eprintln!("failed to install logger: {e}");
        }
    });
}
