use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};

use crate::config::normalize_symbol;
use crate::error::QuoteError;
use crate::event::AppEvent;
use crate::model::quote::Quote;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Anything that can produce a quote for a symbol.
pub trait QuoteSource: Send + Sync {
    fn fetch_quote(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Quote, QuoteError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Polling { symbol: String, generation: u64 },
}

impl PollPhase {
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Polling { symbol, .. } => Some(symbol),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollTransition {
    Started { symbol: String, generation: u64 },
    Stopped,
}

/// Cadence owner: one immediate fetch per tracked symbol, then one per
/// `period`. Fetches run in their own tasks and are never cancelled.
pub struct Poller<S> {
    source: Arc<S>,
    period: Duration,
    app_tx: mpsc::Sender<AppEvent>,
    phase: PollPhase,
    generation: u64,
}

impl<S: QuoteSource + 'static> Poller<S> {
    pub fn new(source: Arc<S>, period: Duration, app_tx: mpsc::Sender<AppEvent>) -> Self {
        Self {
            source,
            period,
            app_tx,
            phase: PollPhase::Idle,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &PollPhase {
        &self.phase
    }

    /// Move to the phase implied by `desired`. Re-observing the current
    /// symbol is not a change.
    pub fn observe(&mut self, desired: Option<&str>) -> Option<PollTransition> {
        let desired = desired.map(normalize_symbol).filter(|s| !s.is_empty());
        match desired {
            Some(symbol) if self.phase.symbol() == Some(symbol.as_str()) => None,
            Some(symbol) => {
                self.generation += 1;
                self.phase = PollPhase::Polling {
                    symbol: symbol.clone(),
                    generation: self.generation,
                };
                Some(PollTransition::Started {
                    symbol,
                    generation: self.generation,
                })
            }
            None if self.phase == PollPhase::Idle => None,
            None => {
                self.phase = PollPhase::Idle;
                Some(PollTransition::Stopped)
            }
        }
    }

    fn new_ticker(&self) -> Interval {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }

    fn spawn_fetch(&self) {
        let PollPhase::Polling { symbol, generation } = &self.phase else {
            return;
        };
        let source = Arc::clone(&self.source);
        let tx = self.app_tx.clone();
        let symbol = symbol.clone();
        let generation = *generation;
        tokio::spawn(async move {
            if tx
                .send(AppEvent::FetchStarted {
                    symbol: symbol.clone(),
                    generation,
                })
                .await
                .is_err()
            {
                return;
            }
            let result = source.fetch_quote(&symbol).await;
            if let Err(e) = &result {
                tracing::warn!(symbol = %symbol, generation, error = %e, "Quote fetch failed");
            }
            let _ = tx
                .send(AppEvent::QuoteFetched {
                    symbol,
                    generation,
                    result,
                })
                .await;
        });
    }

    async fn emit(&self, transition: PollTransition) {
        let event = match transition {
            PollTransition::Started { symbol, generation } => {
                tracing::info!(symbol = %symbol, generation, period_secs = self.period.as_secs(), "Polling started");
                AppEvent::PollingStarted { symbol, generation }
            }
            PollTransition::Stopped => {
                tracing::info!("Polling stopped");
                AppEvent::PollingStopped
            }
        };
        let _ = self.app_tx.send(event).await;
    }

    /// Run until `shutdown` flips to true or every symbol sender is gone.
    pub async fn run(
        mut self,
        mut symbol_rx: watch::Receiver<Option<String>>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut ticker: Option<Interval> = None;
        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            let desired = symbol_rx.borrow_and_update().clone();
            if let Some(transition) = self.observe(desired.as_deref()) {
                // Dropping the old interval is what cancels the old cadence.
                ticker = match transition {
                    PollTransition::Started { .. } => Some(self.new_ticker()),
                    PollTransition::Stopped => None,
                };
                self.emit(transition).await;
            }

            tokio::select! {
                _ = next_tick(&mut ticker) => self.spawn_fetch(),
                changed = symbol_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        drop(ticker);
        if self.observe(None).is_some() {
            self.emit(PollTransition::Stopped).await;
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Control side of a spawned poller.
pub struct PollerHandle {
    symbol_tx: watch::Sender<Option<String>>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Replace the tracked symbol. Blank input is ignored.
    pub fn track(&self, symbol: &str) {
        let symbol = normalize_symbol(symbol);
        if symbol.is_empty() {
            return;
        }
        self.symbol_tx.send_replace(Some(symbol));
    }

    /// Stop polling without tearing the task down.
    pub fn untrack(&self) {
        self.symbol_tx.send_replace(None);
    }

    pub fn tracked(&self) -> Option<String> {
        self.symbol_tx.borrow().clone()
    }

    pub async fn join(self) {
        drop(self.symbol_tx);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Poller task ended abnormally");
        }
    }
}

pub fn spawn_poller<S: QuoteSource + 'static>(
    source: Arc<S>,
    period: Duration,
    app_tx: mpsc::Sender<AppEvent>,
    shutdown: watch::Receiver<bool>,
) -> PollerHandle {
    let (symbol_tx, symbol_rx) = watch::channel(None);
    let poller = Poller::new(source, period, app_tx);
    let task = tokio::spawn(poller.run(symbol_rx, shutdown));
    PollerHandle { symbol_tx, task }
}
