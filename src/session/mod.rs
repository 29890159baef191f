use crate::catalog::{assemble, CatalogEntry, CatalogStore};
use crate::generate::GenerationClient;
use crate::summarize;
use crate::wire::{LogEntry, LogSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Market,
    Lab,
    Dashboard,
    Dna,
}

impl ActiveView {
    pub fn parse(raw: &str) -> Option<ActiveView> {
        match raw.trim().to_lowercase().as_str() {
            "market" => Some(ActiveView::Market),
            "lab" => Some(ActiveView::Lab),
            "dashboard" => Some(ActiveView::Dashboard),
            "dna" => Some(ActiveView::Dna),
            _ => None,
        }
    }
}

/// State of the generate control: disabled while `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStatus {
    Idle,
    Pending,
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(CatalogEntry),
    Failed,
    Rejected(&'static str),
}

/// Puts a `Pending` status back to `Idle` if the submit future is dropped
/// before the call resolved.
struct PendingGuard<'a>(&'a mut GenerationStatus);

impl PendingGuard<'_> {
    fn finish(self) {
        *self.0 = GenerationStatus::Done;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if *self.0 == GenerationStatus::Pending {
            *self.0 = GenerationStatus::Idle;
        }
    }
}

pub const FAILURE_MESSAGE: &str = "Error: Quantum Interference Detected. Generation Failed.";

/// Caller side of the generation flow: owns the store, the active view and
/// the status of the generate control.
pub struct Session {
    client: GenerationClient,
    store: CatalogStore,
    view: ActiveView,
    status: GenerationStatus,
    last_message: String,
    log: Vec<LogEntry>,
}

impl Session {
    pub fn new(client: GenerationClient, store: CatalogStore) -> Self {
        let mut s = Self {
            client,
            store,
            view: ActiveView::Market,
            status: GenerationStatus::Idle,
            last_message: "Ready for input...".to_string(),
            log: Vec::new(),
        };
        let mode = if s.client.is_simulated() { "SIMULATION" } else { "LIVE" };
        s.record(LogSource::System, format!("Session started. Generation mode: {mode}."));
        s
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn set_view(&mut self, view: ActiveView) {
        self.view = view;
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn last_message(&self) -> &str {
        &self.last_message
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn is_simulated(&self) -> bool {
        self.client.is_simulated()
    }

    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        self.store.list(query)
    }

    /// Validate, generate, insert. The store is only touched after the call resolved.
    pub async fn submit(&mut self, prompt: &str) -> SubmitOutcome {
        if self.status == GenerationStatus::Pending {
            return SubmitOutcome::Rejected("a generation is already in progress");
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            self.last_message = "Prompt is empty; describe the asset to generate.".to_string();
            return SubmitOutcome::Rejected("empty prompt");
        }

        self.status = GenerationStatus::Pending;
        self.record(LogSource::AiAgent, format!("Generation requested: {prompt}"));
        self.last_message = "Initializing generation agent...".to_string();

        let result = {
            let pending = PendingGuard(&mut self.status);
            let result = self.client.generate(prompt).await;
            pending.finish();
            result
        };

        match result {
            Some(partial) => {
                let entry = assemble(partial);
                let prefix = if self.client.is_simulated() { "[SIMULATION] " } else { "" };
                self.last_message =
                    format!("{prefix}Success: {} added to Marketplace.", entry.title);
                self.record(LogSource::AiAgent, format!("Created {} ({})", entry.id, entry.title));
                self.store.insert(entry.clone());
                self.view = ActiveView::Market;
                SubmitOutcome::Created(entry)
            }
            None => {
                self.last_message = FAILURE_MESSAGE.to_string();
                self.record(LogSource::Network, "Generation failed".to_string());
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn status_report(&self) -> String {
        let lines: Vec<String> = self.log.iter().map(LogEntry::line).collect();
        summarize::summarize(&self.client, &lines).await
    }

    fn record(&mut self, source: LogSource, message: String) {
        self.log.push(LogEntry::new(source, message));
    }
}
