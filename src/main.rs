use clap::Parser;
use cond_filter::{Filter, MapContext};
use serde::Serialize;
use tracing::Level;

/// Evaluate a condition filter such as `age between [18|65]`.
///
/// With `--data` the filter runs in literal mode against each value; otherwise it runs in
/// context mode against the `--var` variables.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Filter expression: subject, comparator, controls
    filter: String,
    /// Literal value to test (repeatable)
    #[arg(long)]
    data: Vec<String>,
    /// Also test a missing (null) literal value
    #[arg(long)]
    null: bool,
    /// Variable for `${name}` placeholders, as NAME=VALUE (repeatable)
    #[arg(long = "var", value_parser = parse_var)]
    vars: Vec<(String, String)>,
    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
    /// Log evaluation details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report {
    filter: Filter,
    mode: &'static str,
    results: Vec<Outcome>,
}

#[derive(Serialize)]
struct Outcome {
    input: Option<String>,
    matched: bool,
}

fn parse_var(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))
}

fn main() {
    // Parse CLI arguments.
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let filter = match Filter::parse(&args.filter) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let literal = !args.data.is_empty() || args.null;
    let results = if literal {
        let inputs = args
            .data
            .iter()
            .map(|d| Some(d.as_str()))
            .chain(args.null.then_some(None));
        let mut results = Vec::new();
        for input in inputs {
            match filter.matches_literal(input) {
                Ok(matched) => results.push(Outcome { input: input.map(str::to_string), matched }),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(2);
                }
            }
        }
        results
    } else {
        let ctx: MapContext = args.vars.into_iter().collect();
        vec![Outcome { input: None, matched: filter.matches(&ctx) }]
    };

    let all_matched = results.iter().all(|r| r.matched);
    let report = Report { filter, mode: if literal { "literal" } else { "context" }, results };
    let out = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    match out {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to render report: {e}");
            std::process::exit(2);
        }
    }

    std::process::exit(if all_matched { 0 } else { 1 });
}
