//! # RCC Beam CLI
//!
//! Command-line front end for the table-driven beam reinforcement estimate.
//!
//! ```text
//! rcc_cli design --beam-type ss --span 6 --width 0.3
//! rcc_cli design --beam-type cantilever --span 5 --width 0.3 --json
//! rcc_cli interactive
//! rcc_cli export-dataset beams.json
//! ```

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{debug, Level};

use rcc_core::calculations::design::{DEFAULT_FCK, DEFAULT_FY};
use rcc_core::equations::PctAreaPolicy;
use rcc_core::{
    calculate, load_dataset, load_settings, save_dataset, BeamType, CalcError, CalcResult, Dataset,
    DesignQuery, DesignResult, DesignSettings,
};

#[derive(Parser, Debug)]
#[command(name = "rcc_cli", version, about = "Estimate RCC beam reinforcement from a design table")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate reinforcement for one beam
    Design(DesignArgs),
    /// Prompt for the beam inputs, then estimate
    Interactive(SourceArgs),
    /// Write the built-in design table to a dataset file
    ExportDataset {
        /// Output file
        path: PathBuf,
        /// Description stored in the file metadata
        #[arg(long, default_value = "Built-in RCC beam design table")]
        description: String,
    },
}

#[derive(Args, Debug)]
struct DesignArgs {
    /// Support condition: ss, cantilever or continuous
    #[arg(long)]
    beam_type: BeamType,

    /// Span in metres
    #[arg(long)]
    span: f64,

    /// Width in metres
    #[arg(long)]
    width: f64,

    /// Concrete grade (N/mm²)
    #[arg(long, default_value_t = DEFAULT_FCK)]
    fck: u32,

    /// Steel grade (N/mm²)
    #[arg(long, default_value_t = DEFAULT_FY)]
    fy: u32,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Dataset file to use instead of the built-in table
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Area percentage formula: depth-only or averaged-with-ast
    #[arg(long)]
    pct_area_policy: Option<PctAreaPolicy>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Command) -> CalcResult<()> {
    match command {
        Command::Design(args) => {
            let query = DesignQuery::new(args.beam_type, args.span, args.width).with_grades(args.fck, args.fy);
            estimate(&query, &args.source)
        }
        Command::Interactive(source) => {
            let query = prompt_query()?;
            println!();
            estimate(&query, &source)
        }
        Command::ExportDataset { path, description } => {
            save_dataset(Dataset::builtin(), &description, &path)?;
            println!("Wrote {} rows to {}", Dataset::builtin().len(), path.display());
            Ok(())
        }
    }
}

fn estimate(query: &DesignQuery, source: &SourceArgs) -> CalcResult<()> {
    let settings = resolve_settings(source)?;
    let loaded;
    let dataset = match &source.dataset {
        Some(path) => {
            loaded = load_dataset(path)?;
            &loaded
        }
        None => Dataset::builtin(),
    };
    debug!(?query, policy = %settings.pct_area_policy, rows = dataset.len(), "running estimate");

    let result = calculate(query, dataset, &settings)?;

    if source.json {
        let json = serde_json::to_string_pretty(&result).map_err(|e| CalcError::serialization(e.to_string()))?;
        println!("{}", json);
    } else {
        print_result(query, &result);
    }
    Ok(())
}

fn resolve_settings(source: &SourceArgs) -> CalcResult<DesignSettings> {
    let settings = match &source.config {
        Some(path) => load_settings(path)?,
        None => DesignSettings::default(),
    };
    Ok(match source.pct_area_policy {
        Some(policy) => settings.with_pct_area_policy(policy),
        None => settings,
    })
}

fn print_result(query: &DesignQuery, result: &DesignResult) {
    println!("═══════════════════════════════════════");
    println!("  OPTIMISED BEAM RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Beam Type: {}", result.beam_type);
    println!("  Span:      {:.2} m", query.span_m);
    println!("  Width:     {:.2} m", query.width_m);
    println!("  Grades:    M{} / Fe{}", result.fck, result.fy);
    println!();
    println!("Reinforcement:");
    println!("  Depth of Beam:  {} m", result.depth_m);
    println!("  Tension:        {} bars of {} mm dia", result.tension_bars, result.tension_dia_mm);
    println!("  Compression:    {} bars of {} mm dia", result.compression_bars, result.compression_dia_mm);
    println!("  Stirrups:       {} mm dia @ {} mm c/c", result.stirrup_dia_mm, result.stirrup_spacing_mm);
    println!();
    println!("Optimisation:");
    println!("  Area Optimised (%): {}  [{}]", result.pct_area, result.pct_area_policy);
    println!("  AST Optimised (%):  {}", result.pct_ast);
    println!();
    println!(
        "Design row #{} (span {} m, width {} m, score {:.3})",
        result.matched.row_index, result.matched.row_span_m, result.matched.row_width_m, result.matched.score
    );
}

fn prompt_query() -> CalcResult<DesignQuery> {
    println!("RCC Beam Reinforcement Estimator");
    println!("================================");
    println!();
    for (i, beam) in BeamType::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, beam);
    }

    let beam_type = parse_beam_answer(&read_answer("Type of beam [1]: ")?)?;
    let span_m = parse_answer("span_m", &read_answer("Span (m) [6.0]: ")?, 6.0)?;
    let width_m = parse_answer("width_m", &read_answer("Width (m) [0.30]: ")?, 0.30)?;
    let fck = parse_answer(
        "fck",
        &read_answer(&format!("Grade of concrete, fck [{}]: ", DEFAULT_FCK))?,
        DEFAULT_FCK,
    )?;
    let fy = parse_answer("fy", &read_answer(&format!("Grade of steel, fy [{}]: ", DEFAULT_FY))?, DEFAULT_FY)?;

    Ok(DesignQuery::new(beam_type, span_m, width_m).with_grades(fck, fy))
}

/// Print `prompt` and read one line from stdin. End of input reads as blank.
fn read_answer(prompt: &str) -> CalcResult<String> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| CalcError::file_error("write", "<stdout>", e.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| CalcError::file_error("read", "<stdin>", e.to_string()))?;
    Ok(input)
}

/// Blank input takes `default`; anything else must parse.
fn parse_answer<T>(field: &str, input: &str, default: T) -> CalcResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let answer = input.trim();
    if answer.is_empty() {
        return Ok(default);
    }
    answer
        .parse()
        .map_err(|e| CalcError::invalid_input(field, answer, format!("Not a valid value ({})", e)))
}

fn parse_beam_answer(input: &str) -> CalcResult<BeamType> {
    let answer = input.trim();
    if answer.is_empty() {
        return Ok(BeamType::SimplySupported);
    }
    answer.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_design() {
        let cli = Cli::try_parse_from([
            "rcc_cli", "design", "--beam-type", "cantilever", "--span", "5.5", "--width", "0.3", "--json",
        ])
        .unwrap();
        match cli.command {
            Command::Design(args) => {
                assert_eq!(args.beam_type, BeamType::Cantilever);
                assert_eq!(args.fck, DEFAULT_FCK);
                assert!(args.source.json);
                assert!(args.source.dataset.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_beam_type() {
        let parsed = Cli::try_parse_from(["rcc_cli", "design", "--beam-type", "arch", "--span", "5", "--width", "0.3"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_cli_policy_flag() {
        let cli = Cli::try_parse_from([
            "rcc_cli",
            "-vv",
            "design",
            "--beam-type",
            "ss",
            "--span",
            "6",
            "--width",
            "0.3",
            "--pct-area-policy",
            "averaged-with-ast",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Design(args) = cli.command else {
            panic!("expected design command");
        };
        assert_eq!(args.source.pct_area_policy, Some(PctAreaPolicy::AveragedWithAst));
        let settings = resolve_settings(&args.source).unwrap();
        assert_eq!(settings.pct_area_policy, PctAreaPolicy::AveragedWithAst);
    }

    #[test]
    fn test_blank_answer_takes_default() {
        assert_eq!(parse_answer("span_m", "\n", 6.0).unwrap(), 6.0);
        assert_eq!(parse_answer("fck", "   ", DEFAULT_FCK).unwrap(), DEFAULT_FCK);
        assert_eq!(parse_beam_answer("\n").unwrap(), BeamType::SimplySupported);
    }

    #[test]
    fn test_answer_is_trimmed_and_parsed() {
        assert!((parse_answer("span_m", " 5.5 \n", 6.0_f64).unwrap() - 5.5).abs() < 1e-12);
        assert_eq!(parse_answer("fy", "500\n", DEFAULT_FY).unwrap(), 500);
        assert_eq!(parse_beam_answer("cantilever\n").unwrap(), BeamType::Cantilever);
        assert_eq!(parse_beam_answer("3").unwrap(), BeamType::Continuous);
    }

    #[test]
    fn test_unparsable_answer_is_rejected() {
        let error = parse_answer("span_m", "6,5\n", 6.0).unwrap_err();
        assert_eq!(error.error_code(), "INVALID_INPUT");
        match error {
            CalcError::InvalidInput { field, value, .. } => {
                assert_eq!(field, "span_m");
                assert_eq!(value, "6,5");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(parse_answer("fck", "M25", DEFAULT_FCK).is_err());
        assert_eq!(parse_beam_answer("cantilver").unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_default_settings_without_config() {
        let source = SourceArgs {
            dataset: None,
            config: None,
            pct_area_policy: None,
            json: false,
        };
        assert_eq!(resolve_settings(&source).unwrap(), DesignSettings::default());
    }
}
