//! llef CLI: Welsh words to phones, syllables and pronunciation lexicons.

use std::collections::BTreeSet;
use std::io::{BufRead, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;

use llef_core::config::PhonemizerConfig;
use llef_core::lexicon::build_lexicon;
use llef_core::{Exceptions, G2p, G2pError};

// ─── Top-level CLI ───────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "llef",
    about = "Rule-based Welsh grapheme-to-phoneme conversion",
    version,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Show verbose output
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// JSON config file (default: $LLEF_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pronunciation dictionary, overrides the config
    #[arg(long, global = true)]
    dictionary: Option<PathBuf>,

    /// Phone substitution table, overrides the config
    #[arg(long, global = true)]
    phone_map: Option<PathBuf>,

    /// Extra unstressed exceptions, overrides the config
    #[arg(long, global = true)]
    exceptions: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Unstressed phones for each word
    Phones(WordArgs),
    /// Stressed phones for each word
    Stressed(WordArgs),
    /// Syllable breakdown for each word
    Syllables(WordArgs),
    /// Read lines from stdin and print the stressed reading of every word
    Read,
    /// Build a pronunciation lexicon from a word list
    Lexicon(LexiconArgs),
}

#[derive(Args, Debug)]
struct WordArgs {
    /// Words to convert
    #[arg(required = true)]
    words: Vec<String>,

    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct LexiconArgs {
    /// Word list, whitespace separated (default: stdin)
    file: Option<PathBuf>,
}

// ─── Main ────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    // Init logging
    let log_level = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let result = load_config(&cli.global).and_then(|config| match cli.command {
        Command::Phones(args) => run_phones(&config, args),
        Command::Stressed(args) => run_stressed(&config, args),
        Command::Syllables(args) => run_syllables(&config, args),
        Command::Read => run_read(&config),
        Command::Lexicon(args) => run_lexicon(&config, args),
    });

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Resolve the config file, then apply per-flag overrides.
fn load_config(args: &GlobalArgs) -> Result<PhonemizerConfig> {
    let config = PhonemizerConfig::resolve(args.config.as_deref())?;
    Ok(apply_overrides(config, args))
}

fn apply_overrides(mut config: PhonemizerConfig, args: &GlobalArgs) -> PhonemizerConfig {
    if let Some(path) = &args.dictionary {
        config.dictionary = Some(path.clone());
    }
    if let Some(path) = &args.phone_map {
        config.phone_map = Some(path.clone());
    }
    if let Some(path) = &args.exceptions {
        config.exceptions = Some(path.clone());
    }
    config
}

// ─── Word runners ────────────────────────────────────────────────

fn run_phones(config: &PhonemizerConfig, args: WordArgs) -> Result<()> {
    let table = config.exceptions()?;
    let g2p = G2p::new(&table);
    let mut failed = Vec::new();
    let mut records = Vec::new();

    for word in &args.words {
        match g2p.unstressed_phones(word) {
            Ok(u) => {
                if args.json {
                    records.push(json!({
                        "word": word,
                        "phones": u.phones,
                        "diagnostics": u.diagnostics,
                    }));
                } else {
                    println!("{}\t{}", word, u.phones.join(" "));
                }
            }
            Err(e) => {
                records.push(json!({ "word": word, "error": report(e) }));
                failed.push(word.as_str());
            }
        }
    }

    finish(args.json, &records, &failed)
}

fn run_stressed(config: &PhonemizerConfig, args: WordArgs) -> Result<()> {
    let table = config.exceptions()?;
    let g2p = G2p::new(&table);
    let mut failed = Vec::new();
    let mut records = Vec::new();

    for word in &args.words {
        match g2p.stressed_phones(word) {
            Ok(phones) => {
                if args.json {
                    records.push(json!({ "word": word, "phones": phones }));
                } else {
                    println!("{}\t{}", word, phones.join(" "));
                }
            }
            Err(e) => {
                records.push(json!({ "word": word, "error": report(e) }));
                failed.push(word.as_str());
            }
        }
    }

    finish(args.json, &records, &failed)
}

fn run_syllables(config: &PhonemizerConfig, args: WordArgs) -> Result<()> {
    let table = config.exceptions()?;
    let g2p = G2p::new(&table);
    let mut failed = Vec::new();
    let mut records = Vec::new();

    for word in &args.words {
        match g2p.syllables(word) {
            Ok(syllables) => {
                if args.json {
                    records.push(json!({ "word": word, "syllables": syllables }));
                } else {
                    let shown: String = syllables.iter().map(|s| s.short()).collect();
                    println!("{}\t{}", word, shown);
                }
            }
            Err(e) => {
                records.push(json!({ "word": word, "error": report(e) }));
                failed.push(word.as_str());
            }
        }
    }

    finish(args.json, &records, &failed)
}

/// Log a conversion error with its cause chain and return the message.
fn report(e: G2pError) -> String {
    let message = format!("{:#}", anyhow::Error::from(e));
    log::warn!("{}", message);
    message
}

/// Print collected JSON records, then fail if any word failed.
fn finish(json: bool, records: &[serde_json::Value], failed: &[&str]) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
    }
    if !failed.is_empty() {
        bail!("Failed to convert {} word(s): {}", failed.len(), failed.join(" "));
    }
    Ok(())
}

// ─── Batch runners ───────────────────────────────────────────────

/// Words in a line: letter runs, keeping apostrophes inside a word.
fn split_words(line: &str) -> Vec<&str> {
    line.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’'))
        .map(|w| w.trim_matches(|c: char| c == '\'' || c == '’'))
        .filter(|w| !w.is_empty())
        .collect()
}

fn run_read(config: &PhonemizerConfig) -> Result<()> {
    let table: Exceptions = config.exceptions()?;
    let g2p = G2p::new(&table);
    let mut bad_words = BTreeSet::new();

    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let readings: Vec<String> = split_words(&line)
            .into_iter()
            .map(|word| match g2p.stressed_phones(word) {
                Ok(phones) => phones.join(" "),
                Err(e) => {
                    log::debug!("{:#}", anyhow::Error::from(e));
                    bad_words.insert(word.to_string());
                    "??".to_string()
                }
            })
            .collect();
        println!("{}", readings.join(" | "));
    }

    if !bad_words.is_empty() {
        let words: Vec<&str> = bad_words.iter().map(|w| w.as_str()).collect();
        bail!("Bad words: {}", words.join(" "));
    }
    Ok(())
}

fn run_lexicon(config: &PhonemizerConfig, args: LexiconArgs) -> Result<()> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list: {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };

    let phonemizer = config.phonemizer()?;
    let lexicon = build_lexicon(&phonemizer, text.split_whitespace());
    print!("{}", lexicon);

    log::info!(
        "{} entries, {} phones",
        lexicon.entries.len(),
        lexicon.phone_set().len()
    );
    if let Some(message) = failure_summary(&lexicon.failed) {
        log::warn!("{}", message);
    }
    Ok(())
}

fn failure_summary(failed: &[String]) -> Option<String> {
    if failed.is_empty() {
        return None;
    }
    Some(format!(
        "Failed to phonemize {} word(s): {}",
        failed.len(),
        failed.join(" ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("Mae'n braf, on’d yw?"), vec!["Mae'n", "braf", "on’d", "yw"]);
        assert_eq!(split_words("'dw i ddim'"), vec!["dw", "i", "ddim"]);
        assert!(split_words(" -- ").is_empty());
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["llef", "stressed", "cymraeg", "--json", "-v"]).unwrap();
        assert!(cli.global.verbose);
        match cli.command {
            Command::Stressed(args) => {
                assert_eq!(args.words, vec!["cymraeg"]);
                assert!(args.json);
            }
            _ => panic!("expected stressed"),
        }
    }

    #[test]
    fn test_lexicon_failure_summary_names_words() {
        let failed = vec!["bcd".to_string(), "'".to_string()];
        assert_eq!(
            failure_summary(&failed).as_deref(),
            Some("Failed to phonemize 2 word(s): bcd '")
        );
        assert_eq!(failure_summary(&[]), None);
    }

    #[test]
    fn test_flags_override_config() {
        let args = GlobalArgs {
            verbose: false,
            config: None,
            dictionary: Some(PathBuf::from("dict.txt")),
            phone_map: None,
            exceptions: None,
        };
        let base = PhonemizerConfig {
            dictionary: Some(PathBuf::from("base.dict")),
            phone_map: Some(PathBuf::from("map.tsv")),
            exceptions: None,
        };
        let config = apply_overrides(base, &args);
        assert_eq!(config.dictionary, Some(PathBuf::from("dict.txt")));
        // fields without a flag keep the config value
        assert_eq!(config.phone_map, Some(PathBuf::from("map.tsv")));
    }
}
