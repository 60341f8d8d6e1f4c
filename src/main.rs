use clap::Parser;
use log::{error, info};

use littlewood_roots::{
    config::{Args, Config},
    pipeline,
};

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = Config::from(&args);

    let result = pipeline::run(&config).and_then(|raster| raster.save(&args.output));
    match result {
        Ok(()) => info!("wrote {}", args.output.display()),
        Err(error) => {
            let mut message = error.to_string();
            let mut source = std::error::Error::source(&error);
            while let Some(cause) = source {
                message.push_str(&format!(": {cause}"));
                source = cause.source();
            }
            error!("{}", message);
            std::process::exit(1);
        }
    }
}
