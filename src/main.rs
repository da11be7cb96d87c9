use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::KeyEventKind;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use sysgauge::app::App;
use sysgauge::config::{Config, load_config, load_config_from_path, parse_level};
use sysgauge::event::{Event, EventHandler};
use sysgauge::headless::JsonLinesSink;
use sysgauge::logging::{LogTarget, default_log_path, init_tracing};
use sysgauge::scheduler::Scheduler;
use sysgauge::system::collector::Collector;
use sysgauge::system::source::MetricSource;
use sysgauge::ui;

#[derive(Parser)]
#[command(
    name = "sysgauge",
    about = "Live CPU, memory, network and disk usage in the terminal"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Samples retained per metric
    #[arg(long)]
    history_capacity: Option<usize>,

    /// Filesystem path whose disk usage is reported
    #[arg(long)]
    disk_path: Option<PathBuf>,

    /// Print one JSON object per sample to stdout instead of drawing the UI.
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Stop after this many samples (headless only).
    #[arg(long, requires = "headless", value_parser = clap::value_parser!(u64).range(1..))]
    ticks: Option<u64>,

    /// Log level: error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,

    /// Log file (defaults to the user cache directory; stderr when headless)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli)?;
    config.validate()?;
    init_logging(&cli, &config)?;

    info!(
        interval_ms = config.sampler.interval_ms,
        history_capacity = config.sampler.history_capacity,
        disk_path = %config.sampler.disk_path.display(),
        headless = cli.headless,
        "starting sysgauge"
    );

    if cli.headless {
        return run_headless(&config, cli.ticks).await;
    }

    // ratatui::init installs a panic hook that restores the terminal.
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &config).await;

    ratatui::restore();
    info!("exiting");

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: &Config) -> Result<()> {
    let mut app = App::new(config);
    let mut scheduler = new_scheduler(config);
    let mut events = EventHandler::new(config.sampler.interval());
    let tx = events.sender();

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let mut should_draw = false;
        match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    let action = app.map_key(key);
                    app.dispatch(action);
                    if app.take_sample_request() {
                        start_cycle(&mut scheduler, &tx);
                    }
                    should_draw = true;
                }
            }
            Event::Tick => start_cycle(&mut scheduler, &tx),
            Event::Sampled(reading) => {
                scheduler.on_sampled(reading, &mut app);
                should_draw = true;
            }
            Event::Resize => should_draw = true,
        }
        if should_draw {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(())
}

async fn run_headless(config: &Config, ticks: Option<u64>) -> Result<()> {
    let mut scheduler = new_scheduler(config);
    let mut events = EventHandler::headless(config.sampler.interval());
    let tx = events.sender();
    let mut sink = JsonLinesSink::new(std::io::stdout());

    while let Some(event) = events.next().await {
        match event {
            Event::Tick => start_cycle(&mut scheduler, &tx),
            Event::Sampled(reading) => {
                scheduler.on_sampled(reading, &mut sink);
                if ticks.is_some_and(|limit| sink.rendered() >= limit) {
                    break;
                }
            }
            Event::Key(_) | Event::Resize => {}
        }
    }

    info!(rendered = sink.rendered(), "headless run finished");
    Ok(())
}

fn new_scheduler(config: &Config) -> Scheduler<Collector> {
    Scheduler::new(
        Collector::new(&config.sampler.disk_path),
        config.sampler.history_capacity,
        config.sampler.sample_timeout(),
    )
}

fn start_cycle<S>(scheduler: &mut Scheduler<S>, tx: &UnboundedSender<Event>)
where
    S: MetricSource + Send + 'static,
{
    let tx = tx.clone();
    scheduler.on_tick(move |reading| {
        let _ = tx.send(Event::Sampled(reading));
    });
}

fn load_config_for_cli(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path)?,
        None => load_config()?,
    };

    if let Some(interval) = cli.interval_ms {
        config.sampler.interval_ms = interval;
    }
    if let Some(capacity) = cli.history_capacity {
        config.sampler.history_capacity = capacity;
    }
    if let Some(ref path) = cli.disk_path {
        config.sampler.disk_path = path.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.log.level = level.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.log.file = Some(file.clone());
    }

    Ok(config)
}

fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    // validate() has already rejected unknown levels.
    let level = parse_level(&config.log.level).unwrap_or(tracing::Level::INFO);

    let target = match (&config.log.file, cli.headless) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => LogTarget::Stderr,
        (None, false) => match default_log_path() {
            Some(path) => LogTarget::File(path),
            // Nowhere to log without drawing over the UI.
            None => return Ok(()),
        },
    };
    init_tracing(&target, level)
}
