mod app;

use env_logger::{Builder, Target};
use log::LevelFilter;

fn main() {
    // Status output is the program's product, so it goes to stdout.
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .init();

    if let Err(err) = app::run() {
        log::error!("{:#}", err);
    }
}
