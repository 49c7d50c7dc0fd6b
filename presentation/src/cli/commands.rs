//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable console output
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for triage_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => triage_domain::OutputFormat::Text,
            OutputFormat::Json => triage_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for symptom-triage
#[derive(Parser, Debug)]
#[command(name = "symptom-triage")]
#[command(author, version, about = "Match symptoms to candidate diseases and recommend a specialist")]
#[command(long_about = r#"
Symptom Triage maps a set of symptoms to ranked disease candidates and
recommends medical specialists from a database of labelled cases.

Symptoms are given as identifiers such as `chest_pain`; spaces, case,
British spellings and severity suffixes (`_severe`, `_mild`) are normalised.
Results are not medical advice.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./triage.toml       Project-level config
3. ~/.config/symptom-triage/config.toml   Global config
4. TRIAGE_* environment variables, e.g. TRIAGE_RECOMMENDER__TOP_N=3

Example:
  symptom-triage diagnose diarrhoea vomiting dehydration
  symptom-triage recommend "joint pain" stiffness --top-n 3
  symptom-triage assess toothache,jaw_pain,facial_swelling -o json
  symptom-triage symptoms
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print results, no headers
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Knowledge base file (TOML or JSON), overrides the config file
    #[arg(long, value_name = "PATH", global = true)]
    pub knowledge_base: Option<PathBuf>,

    /// Case database file (TOML or JSON), overrides the config file
    #[arg(long, value_name = "PATH", global = true)]
    pub cases: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rank candidate diseases for a set of symptoms
    Diagnose {
        /// Symptoms, space or comma separated
        #[arg(required = true, value_delimiter = ',')]
        symptoms: Vec<String>,

        /// Maximum number of diseases to return
        #[arg(short = 'n', long, value_name = "N")]
        max_results: Option<usize>,
    },

    /// Recommend specialists from similar historical cases
    Recommend {
        /// Symptoms, space or comma separated
        #[arg(required = true, value_delimiter = ',')]
        symptoms: Vec<String>,

        /// Maximum number of specialists to return
        #[arg(short = 't', long, value_name = "N")]
        top_n: Option<usize>,
    },

    /// Run both and print a combined report
    Assess {
        /// Symptoms, space or comma separated
        #[arg(required = true, value_delimiter = ',')]
        symptoms: Vec<String>,

        /// Maximum number of diseases to return
        #[arg(short = 'n', long, value_name = "N")]
        max_results: Option<usize>,

        /// Maximum number of specialists to return
        #[arg(short = 't', long, value_name = "N")]
        top_n: Option<usize>,
    },

    /// List every known symptom with its category
    Symptoms,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_diagnose() {
        let cli = Cli::parse_from(["symptom-triage", "diagnose", "cough", "fever", "-n", "2"]);
        assert_eq!(
            cli.command,
            Some(Command::Diagnose {
                symptoms: vec!["cough".to_string(), "fever".to_string()],
                max_results: Some(2),
            })
        );
        assert_eq!(cli.output, None);
    }

    #[test]
    fn test_comma_separated_symptoms() {
        let cli = Cli::parse_from(["symptom-triage", "recommend", "joint pain,stiffness", "-o", "json"]);
        match cli.command {
            Some(Command::Recommend { symptoms, top_n }) => {
                assert_eq!(symptoms, vec!["joint pain", "stiffness"]);
                assert_eq!(top_n, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.output, Some(OutputFormat::Json));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "symptom-triage",
            "assess",
            "toothache",
            "--top-n",
            "1",
            "-vv",
            "--no-color",
            "--cases",
            "cases.json",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
        assert_eq!(cli.cases, Some(PathBuf::from("cases.json")));
    }

    #[test]
    fn test_diagnose_requires_symptoms() {
        assert!(Cli::try_parse_from(["symptom-triage", "diagnose"]).is_err());
    }

    #[test]
    fn test_show_config_without_command() {
        let cli = Cli::parse_from(["symptom-triage", "--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
