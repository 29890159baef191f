use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

use crate::catalog::CatalogEntry;
use crate::session::{ActiveView, Session};

/// Static snapshot shown on the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct SystemMetrics {
    pub quantum_stability: f64,
    pub neural_load: f64,
    pub token_velocity: f64,
    pub active_agents: u32,
    pub temperature_kelvin: f64,
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self {
            quantum_stability: 98.2,
            neural_load: 73.4,
            token_velocity: 346.7,
            active_agents: 8_442,
            temperature_kelvin: 0.0,
        }
    }
}

pub fn render_entry(e: &CatalogEntry) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}  {}  {}\n",
        format!("[{}]", e.category.code()).cyan().bold(),
        e.title.bold(),
        format!("${:.2}", e.price).green()
    ));
    out.push_str(&format!("    {}\n", e.description));
    if !e.tags.is_empty() {
        out.push_str(&format!("    tags: {}\n", e.tags.join(", ").magenta()));
    }
    out.push_str(&format!(
        "    {}  size: {}  by: {}  id: {}",
        e.origin_signature.dimmed(),
        e.size.as_deref().unwrap_or("UNKNOWN SIZE"),
        e.created_by.as_deref().unwrap_or("Unknown Agent"),
        e.id.dimmed()
    ));
    out
}

pub fn print_market(entries: &[&CatalogEntry], total: usize, query: &str) {
    println!("\n{}", "=== ECOSYSTEM MARKETPLACE ===".bold());
    let filter = if query.is_empty() { String::new() } else { format!(" | filter: \"{query}\"") };
    println!("Available Assets: {}{}", total, filter);
    println!();
    if entries.is_empty() {
        println!("{}", "NO ASSETS FOUND IN CURRENT SECTOR.".dimmed());
        return;
    }
    for e in entries {
        println!("{}", render_entry(e));
        println!();
    }
}

pub fn print_dashboard(m: &SystemMetrics) {
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━ Quantum Metrics ━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    println!(
        "  {}: {:.1}%   {}: {:.1}%   {}: {:.1}T/s",
        "Stability".cyan().bold(), m.quantum_stability,
        "Neural load".magenta().bold(), m.neural_load,
        "Token velocity".yellow().bold(), m.token_velocity
    );
    println!(
        "  {}: {}   {}: {:.1}K",
        "Active agents".green().bold(), m.active_agents,
        "Temperature".blue().bold(), m.temperature_kelvin
    );
    println!("{}", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());
}

pub fn print_view(session: &Session, query: &str) {
    match session.view() {
        ActiveView::Market => {
            let entries = session.search(query);
            print_market(&entries, session.store().len(), query);
        }
        ActiveView::Lab => {
            println!("\n{}", "=== AI AGENT LAB ===".bold());
            let mode = if session.is_simulated() { "SIMULATION".yellow() } else { "LIVE".green() };
            println!("mode: {}  status: {:?}", mode, session.status());
            println!("{}", session.last_message());
        }
        ActiveView::Dashboard => print_dashboard(&SystemMetrics::default()),
        ActiveView::Dna => {
            println!("\n{}", "ORIGIN DNA DATABASE".bold());
            println!("{}", "Access Restricted. Level 5 Clearance Required.".dimmed());
        }
    }
}

/// Spinner shown while a generation is pending.
pub fn pending_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn read_line(prompt: &str) -> Option<String> {
    print!("{} ", prompt.cyan().bold());
    let _ = io::stdout().flush();
    let mut s = String::new();
    match io::stdin().read_line(&mut s) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(s.trim_end_matches(&['\r', '\n'][..]).to_string()),
    }
}
