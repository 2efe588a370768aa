//! Betcode CLI - parse, check, fix and settle lottery bet codes

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Read;
use std::path::{Path, PathBuf};

use betcode::models::{BetSettings, DrawResult, Money, ParsedBetCode};
use betcode::{
    calculate_prize, calculate_stake, detect, fix, match_bet_code, parse_bet_code, suggest_fixes,
};

#[derive(Parser)]
#[command(name = "betcode")]
#[command(author, version, about = "Lottery bet-code interpreter CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a bet code and show the interpreted station and lines
    Parse {
        /// Input file, or `-` for stdin
        input: String,
    },

    /// Parse and report detected errors; exits non-zero when errors remain
    Check {
        /// Input file, or `-` for stdin
        input: String,

        /// Evaluation date for schedule checks (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Apply best-effort fixes and print the rewritten code
    Fix {
        /// Input file, or `-` for stdin
        input: String,

        /// Evaluation date for schedule checks (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Compute the total stake owed for a bet code
    Stake {
        /// Input file, or `-` for stdin
        input: String,

        /// House stake multiplier
        #[arg(long, default_value = "0.8")]
        multiplier: f64,
    },

    /// Compute the maximum potential prize for a bet code
    Prize {
        /// Input file, or `-` for stdin
        input: String,
    },

    /// Match a bet code against published draw results
    Verify {
        /// Input file, or `-` for stdin
        input: String,

        /// JSON file holding an array of draw results
        #[arg(short, long)]
        results: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { input } => run_parse(&input, cli.json),
        Commands::Check { input, date } => run_check(&input, date, cli.json),
        Commands::Fix { input, date } => run_fix(&input, date, cli.json),
        Commands::Stake { input, multiplier } => run_stake(&input, multiplier, cli.json),
        Commands::Prize { input } => run_prize(&input, cli.json),
        Commands::Verify { input, results } => run_verify(&input, &results, cli.json),
    }
}

/// Read the bet-code text from a file, or stdin for `-`
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}

/// Group a đồng amount into dot-separated thousands
fn format_money(amount: Money) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-{}₫", grouped)
    } else {
        format!("{}₫", grouped)
    }
}

fn print_parsed(parsed: &ParsedBetCode) {
    match &parsed.station {
        Some(station) => println!("{}: {}", "Station".green().bold(), station.describe()),
        None => {
            let reason = parsed
                .station_error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "not found".to_string());
            println!("{}: {}", "Station".red().bold(), reason);
        }
    }
    println!();

    for (i, line) in parsed.lines.iter().enumerate() {
        let status = if line.valid {
            "ok".green()
        } else {
            "invalid".red()
        };
        let bet_type = line
            .bet_type
            .map(|k| format!("{} ({})", k.canonical_alias(), k.label()))
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{:>3}. [{}] {} | {} | {}",
            i + 1,
            status,
            line.numbers.join(" "),
            bet_type,
            format_money(line.amount)
        );
        for extra in &line.additional_bets {
            println!(
                "       + {} | {}",
                extra.bet_type.canonical_alias(),
                format_money(extra.amount)
            );
        }
        if let Some(error) = &line.error {
            println!("       {}", error.to_string().red());
        }
    }
}

fn run_parse(input: &str, json: bool) -> Result<()> {
    let text = read_input(input)?;
    let parsed = parse_bet_code(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    print_parsed(&parsed);
    println!();
    if parsed.success {
        println!("{}", "Parsed successfully.".green());
    } else {
        println!("{}", "Parse finished with problems.".yellow());
    }
    Ok(())
}

fn run_check(input: &str, date: Option<NaiveDate>, json: bool) -> Result<()> {
    let text = read_input(input)?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let parsed = parse_bet_code(&text);
    let report = detect(&parsed, date);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.errors.is_empty() {
        println!("{}", "No problems found.".green());
    } else {
        for finding in &report.errors {
            let severity = match finding.severity {
                betcode::models::Severity::Error => "error".red().bold(),
                betcode::models::Severity::Warning => "warning".yellow().bold(),
            };
            let location = finding
                .line_index
                .map(|i| format!(" (line {})", i + 1))
                .unwrap_or_default();
            println!("{}{}: {}", severity, location, finding.message);
        }
        for suggestion in suggest_fixes(&text, &report) {
            println!("{}: {}", "hint".cyan(), suggestion.message);
        }
    }

    if report.has_errors {
        std::process::exit(1);
    }
    Ok(())
}

fn run_fix(input: &str, date: Option<NaiveDate>, json: bool) -> Result<()> {
    let text = read_input(input)?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let parsed = parse_bet_code(&text);
    let report = detect(&parsed, date);
    let result = fix(&text, &report);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.changes.is_empty() {
        println!("{}", "Nothing to fix.".green());
        return Ok(());
    }

    println!("{}", "Changes:".yellow().bold());
    for change in &result.changes {
        println!(
            "  line {}: {} -> {}",
            change.line_index + 1,
            change.old_line.red(),
            change.new_line.replace('\n', " / ").green()
        );
    }
    println!();
    println!("{}", "Fixed code:".green().bold());
    println!("{}", result.fixed_text);
    Ok(())
}

fn run_stake(input: &str, multiplier: f64, json: bool) -> Result<()> {
    let text = read_input(input)?;
    let parsed = parse_bet_code(&text);
    let settings = BetSettings {
        stake_multiplier: multiplier,
    };
    let result = calculate_stake(&parsed, &settings);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !result.success {
        anyhow::bail!(result.error.unwrap_or_else(|| "stake failed".to_string()));
    }

    println!("{}", "Stake breakdown:".yellow().bold());
    println!(
        "{:>5} {:>6} {:>9} {:>7} {:>12} {:>14}",
        "line", "type", "numbers", "combos", "amount", "subtotal"
    );
    println!("{}", "-".repeat(58));
    for d in &result.details {
        println!(
            "{:>5} {:>6} {:>9.1} {:>7} {:>12} {:>14}",
            d.line_index + 1,
            d.bet_type.map(|k| k.canonical_alias()).unwrap_or("?"),
            d.multiplicand,
            d.combination_count,
            format_money(d.amount),
            if d.valid {
                format_money(d.subtotal).normal()
            } else {
                "invalid".red()
            }
        );
    }
    println!();
    println!(
        "{}: {}",
        "Total stake".green().bold(),
        format_money(result.total)
    );
    Ok(())
}

fn run_prize(input: &str, json: bool) -> Result<()> {
    let text = read_input(input)?;
    let parsed = parse_bet_code(&text);
    let result = calculate_prize(&parsed, &BetSettings::default());

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !result.success {
        anyhow::bail!(result.error.unwrap_or_else(|| "prize failed".to_string()));
    }

    println!("{}", "Potential prize breakdown:".yellow().bold());
    for d in &result.details {
        let rate = d
            .payout_rate
            .map(|r| format!("×{}", r))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  line {} {} {} -> {}",
            d.line_index + 1,
            d.bet_type.map(|k| k.canonical_alias()).unwrap_or("?"),
            rate,
            if d.valid {
                format_money(d.subtotal).normal()
            } else {
                "invalid".red()
            }
        );
    }
    println!();
    println!(
        "{}: {}",
        "Maximum prize".green().bold(),
        format_money(result.total)
    );
    Ok(())
}

fn run_verify(input: &str, results_path: &Path, json: bool) -> Result<()> {
    let text = read_input(input)?;
    let results_text = std::fs::read_to_string(results_path)
        .with_context(|| format!("Failed to read {:?}", results_path))?;
    let draws: Vec<DrawResult> = serde_json::from_str(&results_text)
        .with_context(|| format!("Invalid draw results in {:?}", results_path))?;

    let parsed = parse_bet_code(&text);
    let matches = match_bet_code(&parsed, &draws);

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    let mut total: Money = 0;
    for (i, result) in matches.iter().enumerate() {
        if result.matched {
            total += result.win_amount;
            println!(
                "{:>3}. {} {} -> {}",
                i + 1,
                "WIN".green().bold(),
                result.matched_numbers.join(" "),
                format_money(result.win_amount)
            );
            if result.bonus_factor > 0.0 {
                println!("       nháy bonus ×{}", result.bonus_factor);
            }
        } else {
            println!("{:>3}. {}", i + 1, "miss".dimmed());
        }
    }
    println!();
    println!(
        "{}: {}",
        "Total winnings".green().bold(),
        format_money(total)
    );
    Ok(())
}
