//! Sentinel - terminal front end for message analysis
//!
//! Reads commands from stdin and prints views to stdout. Analysis requests
//! run in the background; their results are applied as they arrive.

use anyhow::{Context, Result};
use log::{error, info, warn};
use moderation::{
    AnalysisCompletion, AnalysisCoordinator, BuiltinDataset, CredentialStore, DashboardFilter,
    DatasetProvider, FileCredentialStore, HttpAnalysisClient, JsonDataset, SessionManager,
    Settings,
};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

mod app;
mod input;
mod views;

use app::{Output, SentinelApp};

enum Event {
    Input(Option<String>),
    Completion(AnalysisCompletion),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Falling back to default settings: {:#}", e);
            if let Some(path) = Settings::default_settings_path() {
                warn!("Fix or remove {} to use your own settings", path.display());
            }
            Settings::default()
        }
    };

    let mut app = build_app(&settings)?;
    info!("Sentinel started (analysis endpoint: {})", settings.analyze_url);

    print_output(app.start());
    run(&mut app).await?;

    info!("Sentinel exiting");
    Ok(())
}

fn build_app(settings: &Settings) -> Result<SentinelApp> {
    let store: Arc<dyn CredentialStore> = match &settings.session_file {
        Some(path) => Arc::new(FileCredentialStore::open(path)?),
        None => Arc::new(FileCredentialStore::open_default()?),
    };

    let mut sessions = SessionManager::new(store, Arc::new(settings.credential_repository()));
    if let Err(e) = sessions.restore() {
        warn!("Could not restore previous session: {:#}", e);
    }

    let dataset: Box<dyn DatasetProvider> = match &settings.dataset_path {
        Some(path) => Box::new(JsonDataset::new(path)),
        None => Box::new(BuiltinDataset),
    };
    let emails = dataset.emails().context("Failed to load emails")?;
    let rows = dataset
        .dashboard_rows()
        .context("Failed to load dashboard rows")?;
    info!("Loaded {} emails and {} dashboard rows", emails.len(), rows.len());

    let client = Arc::new(HttpAnalysisClient::new(&settings.analyze_url)?);
    let inbox = AnalysisCoordinator::new(client, emails);

    Ok(SentinelApp::new(sessions, inbox, DashboardFilter::new(rows)))
}

async fn run(app: &mut SentinelApp) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt();
        let event = tokio::select! {
            line = lines.next_line() => Event::Input(line?),
            Some(completion) = app.inbox_mut().next_completion() => Event::Completion(completion),
            else => Event::Input(None),
        };

        match event {
            Event::Input(None) => break,
            Event::Input(Some(line)) => match input::parse(&line) {
                Ok(command) => {
                    let output = app.handle(command);
                    let quit = output.quit;
                    print_output(output);
                    if quit {
                        break;
                    }
                }
                Err(message) if message.is_empty() => {}
                Err(message) => println!("{}", message),
            },
            Event::Completion(completion) => {
                println!();
                print_output(app.on_completion(completion));
            }
        }
    }
    Ok(())
}

fn prompt() {
    print!("> ");
    // A missing prompt is cosmetic
    let _ = std::io::stdout().flush();
}

fn print_output(output: Output) {
    for line in output.lines {
        println!("{}", line);
    }
}
