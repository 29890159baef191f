use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::Path;

use quantum_nexus::catalog::CatalogStore;
use quantum_nexus::cli::{Args, Command};
use quantum_nexus::config::Config;
use quantum_nexus::generate::GenerationClient;
use quantum_nexus::session::{ActiveView, Session, SubmitOutcome};
use quantum_nexus::ux;
use quantum_nexus::{logging, summarize};

fn build_config(args: &Args) -> Result<Config> {
    let mut cfg = Config::load(args.config.as_deref().map(Path::new))?;
    if let Some(p) = args.provider {
        cfg.provider = p;
    }
    if let Some(m) = &args.model {
        cfg.model = m.clone();
    }
    if let Some(t) = args.timeout_secs {
        cfg.timeout_secs = t;
    }
    Ok(cfg)
}

async fn submit_with_spinner(session: &mut Session, prompt: &str) -> SubmitOutcome {
    let spinner = ux::pending_spinner("PROCESSING DNA...");
    let outcome = session.submit(prompt).await;
    spinner.finish_and_clear();
    outcome
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.quiet, args.verbose)?;

    let cfg = build_config(&args)?;

    match args.command {
        Command::List { query } => {
            let store = CatalogStore::seeded();
            ux::print_market(&store.list(&query), store.len(), &query);
        }
        Command::Dashboard => ux::print_dashboard(&ux::SystemMetrics::default()),
        Command::Summarize { lines } => {
            let client = GenerationClient::from_config(&cfg)?;
            println!("{}", summarize::summarize(&client, &lines).await);
        }
        Command::Generate { prompt } => {
            let client = GenerationClient::from_config(&cfg)?;
            let mut session = Session::new(client, CatalogStore::seeded());
            let outcome = submit_with_spinner(&mut session, &prompt).await;
            println!("{}", session.last_message());
            if let SubmitOutcome::Created(_) = outcome {
                ux::print_view(&session, "");
            }
        }
        Command::Session => {
            let client = GenerationClient::from_config(&cfg)?;
            run_session(Session::new(client, CatalogStore::seeded())).await
        }
    }

    Ok(())
}

fn print_help() {
    println!("{}", "commands:".bold());
    println!("  gen <prompt>     generate a listing");
    println!("  find [query]     search the market by title/tag");
    println!("  view <name>      market | lab | dashboard | dna");
    println!("  status           one-line status report of this session");
    println!("  help | quit");
}

async fn run_session(mut session: Session) {
    if session.is_simulated() {
        println!("{}", "No credential configured: generation runs in SIMULATION mode.".yellow());
    }
    print_help();
    ux::print_view(&session, "");

    while let Some(line) = ux::read_line(">") {
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        match cmd {
            "" => continue,
            "quit" | "exit" => break,
            "help" => print_help(),
            "gen" => {
                session.set_view(ActiveView::Lab);
                let outcome = submit_with_spinner(&mut session, rest).await;
                println!("{}", session.last_message());
                if matches!(outcome, SubmitOutcome::Created(_)) {
                    ux::print_view(&session, "");
                }
            }
            "find" => {
                session.set_view(ActiveView::Market);
                ux::print_view(&session, rest.trim());
            }
            "view" => match ActiveView::parse(rest) {
                Some(v) => {
                    session.set_view(v);
                    ux::print_view(&session, "");
                }
                None => println!("unknown view: {}", rest.trim()),
            },
            "status" => println!("{}", session.status_report().await),
            other => println!("unknown command: {other} (try 'help')"),
        }
    }
}
