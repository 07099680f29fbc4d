// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;
mod cli;

use anyhow::{Context, Result};
use campaign_board::{
    Config, Controller, FilterSelection, MemoryView, RecordStore, ViewRenderer, VERSION,
};
use cli::{Args, Command, OutputFormat};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse_args();
    let command = args.command_or_default();

    // No config or logging needed to write the default config
    if command == Command::InitConfig {
        return handle_init_config();
    }

    let config = Config::discover(args.config.as_deref())?;
    init_logging(&args, &config, command == Command::Tui);

    info!("campaign-board v{}", VERSION);
    debug!("Arguments: {:?}", args);

    let store = load_store(&args, &config)?;

    match command {
        Command::Print { filter, format } => {
            let selection = filter.unwrap_or(config.display.default_filter);
            run_print(store, &config, selection, format)
        }
        Command::Tui => run_ui_mode(store, &config),
        Command::InitConfig => handle_init_config(),
    }
}

/// Write a default .campaign-board.toml
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(campaign_board::config::CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", path.display());
        std::process::exit(1);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✅ Created {} with default settings.", path.display());
    Ok(())
}

/// RUST_LOG wins; otherwise -v/-q, then the config level.
/// The TUI owns the screen, so it only gets warnings unless asked otherwise.
fn init_logging(args: &Args, config: &Config, tui: bool) {
    let configured = if tui && !args.verbose { "warn" } else { config.logging.level.as_str() };
    let directive = args.log_directive(configured);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_store(args: &Args, config: &Config) -> Result<RecordStore> {
    match args.data.as_ref().or(config.data.path.as_ref()) {
        Some(path) => RecordStore::from_path(path)
            .with_context(|| format!("Failed to load campaign data from {}", path.display())),
        None => RecordStore::sample().context("Failed to load bundled sample data"),
    }
}

fn run_print(
    store: RecordStore,
    config: &Config,
    selection: FilterSelection,
    format: OutputFormat,
) -> Result<()> {
    let renderer = ViewRenderer::new(MemoryView::new()).with_currency(config.display.currency.as_str());
    let mut controller = Controller::start(store, renderer);
    controller.select(selection);

    let view = controller.into_view();
    match format {
        OutputFormat::Text => print!("{}", view.to_text(&config.slots)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&view.to_json(&config.slots))?
        ),
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(store: RecordStore, config: &Config) -> Result<()> {
    println!("🖥️  Loading Campaign Board...\n");
    println!("✓ Loaded {} campaigns", store.len());
    println!("Starting UI... (Press 'q' to quit)\n");

    let renderer = ViewRenderer::new(ui::TerminalView::default()).with_currency(config.display.currency.as_str());
    let mut controller = Controller::start(store, renderer);
    controller.select(config.display.default_filter);

    let mut app = ui::App::new(controller, config.slots.clone());
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_store: RecordStore, _config: &Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print the board: campaign-board print");
    std::process::exit(1);
}
