use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(alias = "google")]
    Gemini,
    #[value(alias = "open-ai", alias = "openai")]
    OpenAI,
}

#[derive(Parser, Debug)]
#[command(name = "quantum-nexus", version, about = "Synthetic marketplace with prompt-driven listing generation")]
pub struct Args {
    /// TOML config file; CLI flags override its values.
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, value_enum, global = true)]
    pub provider: Option<ProviderKind>,

    #[arg(long, global = true)]
    pub model: Option<String>,

    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[arg(long, short, global = true, default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the seeded marketplace, optionally filtered by title/tag substring.
    List {
        #[arg(default_value = "")]
        query: String,
    },
    /// Generate one listing from a prompt and show the updated marketplace.
    Generate {
        prompt: String,
    },
    /// One-line status report for the given log lines.
    Summarize {
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Static metrics dashboard.
    Dashboard,
    /// Interactive session: generate, search and switch views.
    Session,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_with_global_flags() {
        let args = Args::parse_from([
            "quantum-nexus",
            "generate",
            "crypto bundle",
            "--provider",
            "openai",
            "--timeout-secs",
            "5",
        ]);
        assert_eq!(args.provider, Some(ProviderKind::OpenAI));
        assert_eq!(args.timeout_secs, Some(5));
        assert!(matches!(args.command, Command::Generate { ref prompt } if prompt == "crypto bundle"));
    }

    #[test]
    fn list_query_defaults_to_empty() {
        let args = Args::parse_from(["quantum-nexus", "list"]);
        assert!(matches!(args.command, Command::List { ref query } if query.is_empty()));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["quantum-nexus", "-v", "-q", "dashboard"]).is_err());
    }
}
