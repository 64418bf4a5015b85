//! Section Timer - A terminal countdown scheduler
//!
//! This is the main entry point for the section-timer application.

use std::{fs::File, io::ErrorKind, sync::Mutex};
use tokio::sync::mpsc;
use tracing::{error, info};

use section_timer::{
    config::{write_sample, Config, ScheduleFile},
    tasks::keyboard_input_task,
    ui::TerminalRenderer,
    utils::quit_on_signal,
    Error, Outcome, Scheduler,
};

fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(config.log_filter());
    match &config.log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn load_schedule(config: &Config) -> ScheduleFile {
    match ScheduleFile::load(&config.config) {
        Ok(file) => file,
        Err(Error::ConfigRead { source, .. }) if source.kind() == ErrorKind::NotFound => {
            eprintln!("could not load config file, creating a default config instead");
            if let Err(e) = write_sample(&config.config) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            eprintln!(
                "created default config at {}, edit it and run the application again",
                config.config.display()
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(&config)?;

    info!("Starting section-timer v{}", env!("CARGO_PKG_VERSION"));

    let file = load_schedule(&config);
    let built = file
        .build_sections()
        .and_then(|sections| file.options().map(|options| (sections, options)));
    let (mut sections, options) = match built {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    info!("Loaded {} sections from {}", sections.len(), config.config.display());

    let (input_tx, mut input_rx) = mpsc::channel(32);
    let signal_task = quit_on_signal(input_tx.clone())?;
    tokio::spawn(signal_task);

    let renderer = TerminalRenderer::new()?;
    tokio::spawn(keyboard_input_task(input_tx));

    let mut scheduler = Scheduler::new(renderer, options);
    let result = scheduler.run(&mut sections, &mut input_rx).await;
    // restore the terminal before anything is printed
    drop(scheduler);

    match result {
        Ok(report) => {
            if report.outcome == Outcome::Quit {
                info!("Quit after {} sections", report.sections.len());
            }
            info!("Shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}
