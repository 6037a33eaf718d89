use std::path::Path;

use crate::application::Application;
use crate::config::EngineConfig;

mod abs;
mod application;
mod config;
mod error;
mod logging;
mod scene;

const CONFIG_PATH: &str = "ember3d.json";

fn main() {
    logging::init();

    let config = match EngineConfig::load_or_default(Path::new(CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid engine config: {e}");
            std::process::exit(1);
        }
    };

    let mut application = match Application::new(config) {
        Ok(application) => application,
        Err(e) => {
            log::error!("failed to initialize application: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = application.run() {
        log::error!("frame loop aborted: {e}");
        std::process::exit(1);
    }
}
