use clap::Parser;

use glsteps::config::Config;
use glsteps::lesson::Lesson;

mod app;
mod args;

use app::{App, AppError};
use args::Args;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    let app = match load_config(&args).and_then(|config| App::new(args.lesson.into(), config)) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(-1);
        }
    };

    app.run();
}

fn load_config(args: &Args) -> Result<Config, AppError> {
    let mut config = match &args.config {
        Some(path) => {
            let config = Config::load_from_path(path)?;
            log::info!("Read config from {:?}", path);
            config
        }
        None => Config::default(),
    };

    if let Some(dir) = &args.shader_dir {
        config.shader_dir = dir.clone();
    }

    log::debug!("Lesson {} with {:?}", Lesson::from(args.lesson), config);

    Ok(config)
}
