use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;

use autoreply::{AutoResponder, AutoreplyConfig, InMemoryRuleStore, RuleDraft, RuleStore, import_into};

const DEMO_TENANT: &str = "demo";

/// Answer one visitor message from a keyword rule set.
#[derive(Parser, Debug)]
#[command(name = "autoreply")]
#[command(about = "Match a chat message against keyword rules and print the reply")]
struct Cli {
    /// Engine configuration (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rules to load (CSV with keyword,response headers); built-in demo rules otherwise
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Visitor message
    #[arg(required = true)]
    message: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => AutoreplyConfig::from_file(path)?,
        None => AutoreplyConfig::default(),
    };
    let (responder, _) = AutoResponder::from_config(&cfg)?;

    let store = InMemoryRuleStore::with_matcher_config(cfg.matcher.clone());
    match &cli.rules {
        Some(path) => {
            let report = import_into(&store, DEMO_TENANT, &fs::read_to_string(path)?)?;
            eprintln!(
                "loaded {} rules ({} skipped)",
                report.created.len(),
                report.skipped
            );
        }
        None => {
            store.create(
                DEMO_TENANT,
                RuleDraft {
                    synonyms: vec!["cost".into(), "price".into()],
                    priority: 10,
                    ..RuleDraft::new("pricing", "Plans start at $9/month.")
                },
            )?;
            store.create(
                DEMO_TENANT,
                RuleDraft {
                    regex_pattern: Some(r"\b(help|support)\b".into()),
                    ..RuleDraft::new("support", "Email support@example.com.")
                },
            )?;
        }
    }

    let message = cli.message.join(" ");
    let result = responder.respond_from_store(&store, DEMO_TENANT, &message);
    match &result.response {
        Some(response) => println!(
            "{response}  [{} {:.2}]",
            result.match_type.as_str(),
            result.confidence
        ),
        None => println!("{}", cfg.widget.welcome_message),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags_and_message_words() {
        let cli = Cli::try_parse_from([
            "autoreply", "--config", "engine.yaml", "--rules", "rules.csv", "how", "much",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("engine.yaml")));
        assert_eq!(cli.rules, Some(PathBuf::from("rules.csv")));
        assert_eq!(cli.message, ["how", "much"]);
    }

    #[test]
    fn rejects_missing_message_and_unknown_flags() {
        assert!(Cli::try_parse_from(["autoreply"]).is_err());
        assert!(Cli::try_parse_from(["autoreply", "--config"]).is_err());
        assert!(Cli::try_parse_from(["autoreply", "--verbose", "pricing"]).is_err());
    }
}
