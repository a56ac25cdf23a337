//! Command-line entry point for the derrick crane and carousel demos.

use std::path::PathBuf;

use derrick::{
    options::Options,
    viewer::{Demo, Viewer},
};

const USAGE: &str = "Usage: derrick [crane|carousel] [--options FILE]";

struct Args {
    demo: Demo,
    options: Option<PathBuf>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        demo: Demo::default(),
        options: None,
    };
    let mut args = args.peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--options" | "-o" => {
                let path = args
                    .next()
                    .ok_or_else(|| format!("{arg} needs a file path"))?;
                parsed.options = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => parsed.demo = other.parse()?,
        }
    }
    Ok(parsed)
}

fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!("{USAGE}");
            std::process::exit(2);
        }
    };

    let options = match &args.options {
        Some(path) => match Options::load(path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    log::info!("starting {} demo", args.demo);
    if let Err(e) = Viewer::builder()
        .with_demo(args.demo)
        .with_options(options)
        .build()
        .run()
    {
        log::error!("{e}");
        std::process::exit(1);
    }
}
