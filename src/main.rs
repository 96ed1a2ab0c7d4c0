use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use tokio::sync::{mpsc, watch};

use stock_pulse::config::Config;
use stock_pulse::event::{AppEvent, LogLevel, LogRecord};
use stock_pulse::finnhub::FinnhubRestClient;
use stock_pulse::notify::{ensure_permission, LinePrompt, NotificationSink, TerminalNotifier};
use stock_pulse::poller::spawn_poller;
use stock_pulse::ui::{self, AppState};
use stock_pulse::ui_handlers::{handle_key, KeyOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required by rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("failed to install rustls crypto provider"))?;

    // Load config
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure .env file exists with FINNHUB_API_KEY");
            std::process::exit(1);
        }
    };

    // Init tracing (log to file so it doesn't interfere with TUI)
    let log_file = std::fs::File::create("stock-pulse.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.level))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    let default_symbol = config.finnhub.default_symbol();
    tracing::info!(
        symbol = %default_symbol,
        rest_url = %config.finnhub.rest_base_url,
        interval_secs = config.polling.interval_secs,
        "Starting stock-pulse"
    );

    // Notification permission is settled once, before the terminal goes raw.
    let mut notifier = TerminalNotifier::new(std::io::stdout(), config.notifications.permission);
    let mut prompt = LinePrompt::new(std::io::stdin().lock(), std::io::stdout());
    let permission = ensure_permission(&mut notifier, &mut prompt);
    drop(prompt);

    let rest_client = Arc::new(
        FinnhubRestClient::new(
            &config.finnhub.rest_base_url,
            &config.finnhub.api_key,
            config.finnhub.request_timeout(),
        )
        .context("failed to build Finnhub client")?,
    );

    // Channels
    let (app_tx, mut app_rx) = mpsc::channel::<AppEvent>(256);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let poller = spawn_poller(
        rest_client,
        config.polling.interval(),
        app_tx,
        shutdown_rx.clone(),
    );

    // Ctrl+C handler
    let ctrl_c_shutdown = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Ctrl+C received");
        let _ = ctrl_c_shutdown.send(true);
    });

    // TUI main loop
    let mut terminal = ratatui::init();
    let mut app_state = AppState::new(&default_symbol);
    app_state.push_log(LogRecord::new(
        LogLevel::Info,
        "app.start",
        format!("stock-pulse started | notifications {:?}", permission),
    ));
    poller.track(&app_state.tracked_symbol);

    loop {
        terminal.draw(|frame| ui::render(frame, &app_state))?;

        // Handle input (non-blocking with timeout)
        if crossterm::event::poll(Duration::from_millis(config.ui.refresh_rate_ms))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        tracing::info!("User quit");
                        break;
                    }
                    match handle_key(&key.code, &mut app_state) {
                        KeyOutcome::Quit => {
                            tracing::info!("User quit");
                            break;
                        }
                        KeyOutcome::Track(symbol) => poller.track(&symbol),
                        KeyOutcome::None => {}
                    }
                }
            }
        }

        // Drain events from channel
        while let Ok(evt) = app_rx.try_recv() {
            if let Some(notification) = app_state.apply(evt) {
                if notifier.dispatch(&notification) {
                    app_state.record_notification(notification);
                }
            }
        }

        // Check shutdown
        if *shutdown_rx.borrow() {
            break;
        }
    }

    let _ = shutdown_tx.send(true);
    poller.join().await;

    ratatui::restore();
    tracing::info!("Shutdown complete");
    println!("Goodbye! Check stock-pulse.log for details.");
    Ok(())
}
