use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use log::{debug, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;
use tm_validator::{DescriptionLoader, MachineCatalog, MachineDescription, TuringMachineError};

/// Exit code for a malformed command line.
const USAGE_EXIT_CODE: u8 = 2;
/// Exit code for unreadable, malformed or invalid descriptions.
const FAILURE_EXIT_CODE: u8 = 1;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
#[clap(after_help = "EXAMPLES:
  tm-validate machines/unary_add.json \"111+11=\"
  tm-validate --json machines/palindrome.json 0110
  tm-validate --list")]
struct Cli {
    /// JSON description of the machine
    #[clap(required_unless_present = "list")]
    jsonfile: Option<PathBuf>,

    /// Input of the machine
    #[clap(required_unless_present = "list")]
    input: Option<String>,

    /// Print the validated description as JSON
    #[clap(long)]
    json: bool,

    /// List the built-in machines and exit
    #[clap(short, long, conflicts_with_all = ["jsonfile", "input", "json"])]
    list: bool,

    /// Increase logging verbosity (-v info, -vv debug)
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
                _ => {
                    // Usage errors go to stdout together with the usage text.
                    print!("{}", e.render());
                    ExitCode::from(USAGE_EXIT_CODE)
                }
            };
        }
    };

    init_logger(cli.verbose);

    if cli.list {
        for name in MachineCatalog::list_machine_names() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

/// Loads, validates and prints the description named on the command line.
fn run(cli: &Cli) -> Result<(), TuringMachineError> {
    let (Some(path), Some(input)) = (&cli.jsonfile, &cli.input) else {
        return Ok(());
    };

    let description = DescriptionLoader::load_description(path)?;
    debug!("{} validated", path.display());

    print_description(&description, input, cli.json)
}

fn print_description(
    description: &MachineDescription,
    input: &str,
    json: bool,
) -> Result<(), TuringMachineError> {
    if json {
        println!("{}", serde_json::to_string_pretty(description)?);
    } else {
        println!("{description}");
        println!("Input   : {input}");
    }

    Ok(())
}

/// Installs `env_logger`; `RUST_LOG` takes precedence over `-v`.
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
