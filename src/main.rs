use std::path::Path;

use molview::{options::Options, Viewer};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(structure) = args.next() else {
        log::error!("Usage: molview <structure.pdb> [options.toml]");
        std::process::exit(1);
    };

    let options = match args.next() {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let title = format!("molview - {structure}");
    let result = Viewer::builder()
        .with_path(structure)
        .with_options(options)
        .with_title(title)
        .build()
        .run();

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
