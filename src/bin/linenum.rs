extern crate log;
extern crate simplelog;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::process::exit;

use log::info;

use linenum::diagnostics::Tracing;
use linenum::*;

fn main() {
    let config = configure_cli().get_matches();

    if let Some(level) = get_log_level(&config) {
        configure_logging(level).expect("Failed to configure logger.")
    }

    let config_path = get_config_path(&config);
    let mut store = match SettingsStore::load(&config_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to load configuration {}: {}", config_path.display(), e);
            exit(ERR_CONFIG_ERROR)
        }
    };

    let enable = get_enable_override(&config).unwrap_or(store.settings().enable_linenumber());
    if config.is_present("save") {
        if let Err(e) = store.configure(enable) {
            eprintln!("Failed to save configuration {}: {}", config_path.display(), e);
            exit(ERR_CONFIG_ERROR)
        }
    } else {
        store.settings_mut().set_enable_linenumber(enable);
    }
    info!("{}: {}", linenum::config::DISPLAY_NAME, enable);

    let tracing = match get_tracing(&config) {
        Ok(tracing) => tracing,
        Err(msg) => {
            eprintln!("{}", msg);
            exit(ERR_CONFIG_ERROR)
        }
    };

    let mut output: Box<dyn Write> = match config.value_of("output") {
        None => Box::new(BufWriter::new(io::stdout())),
        Some(path) => match File::create(path) {
            Ok(f) => Box::new(BufWriter::new(f)),
            Err(e) => {
                eprintln!("Failed to create output file {}: {}", path, e);
                exit(ERR_IO_ERROR)
            }
        },
    };

    let factory = LineNumberFactory::new(store.settings());
    for input in get_inputs(&config) {
        let mut stream = ConsoleStream::new(&factory, Context::new(input));
        stream.set_tracing(tracing);

        let result = if input == STDIN {
            let stdin = io::stdin();
            let lock = stdin.lock();
            stream.annotate_all(lock, &mut output)
        } else {
            match File::open(Path::new(input)) {
                Ok(f) => stream.annotate_all(BufReader::new(f), &mut output),
                Err(e) => Err(e),
            }
        };

        match result {
            Ok(lines) => info!("Annotated {} lines of {}", lines, input),
            Err(e) => {
                eprintln!("Failed to annotate {}: {}", input, e);
                exit(ERR_IO_ERROR)
            }
        }
    }
}
