//! `tableau [OPTIONS.toml]`
//!
//! Opens the scene window. The optional argument is a TOML options file;
//! missing sections fall back to their defaults.

use std::path::Path;

use tableau::{KeyAction, Options, Viewer};

fn main() {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => {
                log::info!("loaded options from {path}");
                options
            }
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    log::info!(
        "keys: {:?} linear pan, {:?} spiral, {:?} quit",
        options.keybindings.keys_for(KeyAction::LinearPath),
        options.keybindings.keys_for(KeyAction::SpiralPath),
        options.keybindings.keys_for(KeyAction::Quit),
    );

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
