//! The `pathfault` command-line interface

use anyhow::{bail, Context};
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pathfault_bank::{
    assemble_entries, missing_combination_report, parse_model_output, validate_and_fix,
    validate_combinations, CorruptionBank, Difficulty, ErrorType, Operation,
};
use pathfault_core::{run_corruption, RunConfig};
use pathfault_pathway::load_pathway_file;
use pathfault_sampler::RngStreams;
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("pathfault")
        .version("0.1.0")
        .about("Deterministic fault injection for biological pathway descriptions")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("corrupt")
                .about("Run one corruption: sample a plan and apply it to a pathway")
                .arg(
                    Arg::new("pathway")
                        .long("pathway")
                        .value_parser(value_parser!(PathBuf))
                        .help("Reference pathway .tsv file"),
                )
                .arg(
                    Arg::new("bank")
                        .long("bank")
                        .value_parser(value_parser!(PathBuf))
                        .help("Corruption bank .tsv file"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Base output directory"),
                )
                .arg(
                    Arg::new("errors")
                        .long("errors")
                        .value_delimiter(',')
                        .help("Error types to introduce (comma-separated; default: all)"),
                )
                .arg(
                    Arg::new("difficulty")
                        .long("difficulty")
                        .default_value("1")
                        .value_parser(value_parser!(u8))
                        .help("Difficulty level of the corruptions (1-2)"),
                )
                .arg(
                    Arg::new("fraction")
                        .long("fraction")
                        .default_value("0.5")
                        .value_parser(value_parser!(f64))
                        .help("Fraction (0-1] of the pathway that should become erroneous"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("split-streams")
                        .long("split-streams")
                        .action(ArgAction::SetTrue)
                        .help("Use a derived second random stream for step-index sampling"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("YAML run configuration; explicit flags override it"),
                ),
        )
        .subcommand(
            Command::new("bank")
                .about("Corruption bank maintenance")
                .subcommand_required(true)
                .subcommand(
                    Command::new("validate")
                        .about("Report completeness and anchor consistency of a bank")
                        .arg(
                            Arg::new("bank")
                                .long("bank")
                                .required(true)
                                .value_parser(value_parser!(PathBuf))
                                .help("Corruption bank .tsv file"),
                        )
                        .arg(
                            Arg::new("pathway")
                                .long("pathway")
                                .required(true)
                                .value_parser(value_parser!(PathBuf))
                                .help("Reference pathway .tsv file"),
                        ),
                )
                .subcommand(
                    Command::new("ingest")
                        .about("Parse raw model output into a validated bank file")
                        .arg(
                            Arg::new("raw")
                                .long("raw")
                                .required(true)
                                .value_parser(value_parser!(PathBuf))
                                .help("Raw model output (JSON, possibly fenced or malformed)"),
                        )
                        .arg(
                            Arg::new("pathway")
                                .long("pathway")
                                .required(true)
                                .value_parser(value_parser!(PathBuf))
                                .help("Reference pathway .tsv file"),
                        )
                        .arg(
                            Arg::new("model-name")
                                .long("model-name")
                                .required(true)
                                .help("Model that produced the output (provenance)"),
                        )
                        .arg(
                            Arg::new("seed")
                                .long("seed")
                                .default_value("42")
                                .value_parser(value_parser!(u64))
                                .help("Generation seed (provenance)"),
                        )
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .required(true)
                                .value_parser(value_parser!(PathBuf))
                                .help("Output bank .tsv file"),
                        ),
                ),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let matches = cli().get_matches();
    let result = match matches.subcommand() {
        Some(("corrupt", args)) => run_corrupt(args),
        Some(("bank", args)) => match args.subcommand() {
            Some(("validate", args)) => run_bank_validate(args),
            Some(("ingest", args)) => run_bank_ingest(args),
            _ => unreachable!("subcommand_required"),
        },
        _ => unreachable!("arg_required_else_help"),
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run_corrupt(args: &ArgMatches) -> anyhow::Result<()> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => RunConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => {
            let pathway = args
                .get_one::<PathBuf>("pathway")
                .context("--pathway is required without --config")?;
            let bank = args
                .get_one::<PathBuf>("bank")
                .context("--bank is required without --config")?;
            let out = args
                .get_one::<PathBuf>("out")
                .context("--out is required without --config")?;
            RunConfig::new(pathway, bank, out)
        }
    };

    // Explicit flags override the config file.
    if let Some(pathway) = args.get_one::<PathBuf>("pathway") {
        config.pathway = pathway.clone();
    }
    if let Some(bank) = args.get_one::<PathBuf>("bank") {
        config.bank = bank.clone();
    }
    if let Some(out) = args.get_one::<PathBuf>("out") {
        config.out_dir = out.clone();
    }
    if let Some(errors) = args.get_many::<String>("errors") {
        config.error_types = errors
            .map(|s| s.parse::<ErrorType>())
            .collect::<Result<Vec<_>, _>>()?;
    }
    if args.value_source("difficulty") == Some(ValueSource::CommandLine) {
        config.difficulty = Difficulty::try_from(*args.get_one::<u8>("difficulty").unwrap())?;
    }
    if args.value_source("fraction") == Some(ValueSource::CommandLine) {
        config.fraction = *args.get_one::<f64>("fraction").unwrap();
    }
    if args.value_source("seed") == Some(ValueSource::CommandLine) {
        config.seed = *args.get_one::<u64>("seed").unwrap();
    }
    if args.get_flag("split-streams") {
        config.rng_streams = RngStreams::Split;
    }

    let output = run_corruption(&config)?;
    println!(
        "Applied {} corruptions; corrupted pathway written to {}",
        output.applied.len(),
        output.pathway_file.display()
    );
    println!("Metadata written to {}", output.metadata_file.display());
    Ok(())
}

fn run_bank_validate(args: &ArgMatches) -> anyhow::Result<()> {
    let bank_path = args.get_one::<PathBuf>("bank").unwrap();
    let pathway_path = args.get_one::<PathBuf>("pathway").unwrap();

    let bank = CorruptionBank::load(bank_path)?;
    let pathway = load_pathway_file(pathway_path)?;

    let mut findings: Vec<String> = missing_combination_report(&bank)
        .into_iter()
        .map(|err| err.to_string())
        .collect();

    for entry in bank.for_pathway(&pathway.id).entries() {
        if entry.anchor_step_index >= pathway.len() {
            findings.push(format!(
                "entry {}: anchor_step_index {} out of bounds (pathway has {} steps)",
                entry.corruption_id,
                entry.anchor_step_index,
                pathway.len()
            ));
            continue;
        }
        if entry.operation == Operation::Replace {
            let expected = pathway.steps[entry.anchor_step_index].trim();
            let actual = entry.original_statement.as_deref().unwrap_or_default().trim();
            if expected != actual {
                findings.push(format!(
                    "entry {}: original_statement mismatch at step {} (expected {expected:?}, got {actual:?})",
                    entry.corruption_id, entry.anchor_step_index
                ));
            }
        }
    }

    if findings.is_empty() {
        println!(
            "Bank OK: {} entries, {} for pathway {}",
            bank.len(),
            bank.for_pathway(&pathway.id).len(),
            pathway.id
        );
        return Ok(());
    }

    for finding in &findings {
        println!("FINDING: {finding}");
    }
    bail!("{} validation findings", findings.len());
}

fn run_bank_ingest(args: &ArgMatches) -> anyhow::Result<()> {
    let raw_path = args.get_one::<PathBuf>("raw").unwrap();
    let pathway_path = args.get_one::<PathBuf>("pathway").unwrap();
    let model_name = args.get_one::<String>("model-name").unwrap();
    let seed = *args.get_one::<u64>("seed").unwrap();
    let out_path = args.get_one::<PathBuf>("out").unwrap();

    let pathway = load_pathway_file(pathway_path)?;
    let raw = std::fs::read_to_string(raw_path)
        .with_context(|| format!("reading {}", raw_path.display()))?;

    let mut parsed = parse_model_output(&raw)?;
    let corrections = validate_and_fix(&mut parsed.corruptions, &pathway.steps)?;
    if corrections > 0 {
        println!("Auto-corrected {corrections} replace statements");
    }

    let entries = assemble_entries(parsed.corruptions, &pathway, model_name, seed);
    let bank = CorruptionBank::new(entries);
    validate_combinations(&bank)?;
    bank.save(out_path)?;

    println!(
        "Ingested {} corruptions for pathway {} into {}",
        bank.len(),
        pathway.id,
        out_path.display()
    );
    Ok(())
}
