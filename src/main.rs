use anyhow::Result;
use clap::Parser;

use dtree::ui::cli::commands;
use dtree::ui::cli::{Cli, Command};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_GREY: &str = "\x1b[90m";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Train(args) => {
            let report = commands::train(&args)?;
            if !args.quiet {
                header("Train");
                println!(
                    "{FG_GREEN}{BOLD}✔{RESET} trained on {} records, model saved to {}",
                    report.records,
                    args.out.display()
                );
                println!("{DIM}target={}{RESET}", report.config.category_attr);
                for line in report.stats.to_string().lines() {
                    println!("  {line}");
                }
            }
        }
        Command::Predict(args) => {
            let rows = commands::predict(&args)?;
            if let Some(out) = &args.out {
                println!("{FG_GREEN}{BOLD}✔{RESET} {rows} predictions written to {}", out.display());
            }
        }
        Command::Visualize(args) => {
            commands::visualize(&args)?;
            println!("{FG_GREEN}{BOLD}✔{RESET} HTML visualization written to {}", args.out.display());
            if let Some(dot) = &args.dot {
                println!("{FG_GREEN}{BOLD}✔{RESET} DOT file written to {}", dot.display());
            }
        }
        Command::Stats(args) => {
            let stats = commands::stats(&args)?;
            header("Model statistics");
            println!("{stats}");
        }
    }

    Ok(())
}

fn header(title: &str) {
    println!("{BOLD}{FG_CYAN}▶ {title}{RESET}  {}", timestamp_now());
    println!(
        "{FG_GREY}────────────────────────────────────────────────────────────────────────{RESET}"
    );
}

fn timestamp_now() -> String {
    use chrono::{Local, SecondsFormat};
    let now = Local::now();
    format!(
        "{DIM}{}{}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        RESET
    )
}
