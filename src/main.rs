use clap::{Parser as ClapParser, Subcommand};
use tally_lang::FunctionRegistry;
use tally_lang::cli::{self, CliError, InputType, OutputType, RunOptions};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(ClapParser)]
#[command(name = "tally")]
#[command(about = "Tally - filter, project, group and sort tabular records")]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a query against CSV input
    Run {
        /// Input file (reads from stdin if '-')
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Input format
        #[arg(long, value_enum, env = "TALLY_INPUT_TYPE", default_value_t = InputType::Csv)]
        input_type: InputType,

        /// Output format
        #[arg(short = 't', long, value_enum, env = "TALLY_OUTPUT_TYPE", default_value_t = OutputType::Table)]
        output_type: OutputType,

        /// Output file (writes to stdout if '-')
        #[arg(short, long, default_value = "-")]
        output: String,

        /// Cut table cells wider than this many characters
        #[arg(long)]
        max_width: Option<usize>,

        /// Query words, e.g. filter h.numberrange eq .4 into table h.name
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Parse a query and print its operation tree without running it
    Check {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// List the available functions
    Functions,

    /// Show query syntax help
    Syntax {
        /// Topic name (omit to list topics)
        topic: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            input,
            input_type,
            output_type,
            output,
            max_width,
            query,
        } => cli::execute_run(&RunOptions {
            query,
            input,
            input_type,
            output_type,
            output,
            max_width,
        }),
        Commands::Check { query } => run_check(&query),
        Commands::Functions => {
            print!("{}", cli::function_list(&FunctionRegistry::new()));
            Ok(())
        }
        Commands::Syntax { topic: None } => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Syntax { topic: Some(topic) } => {
            cli::get_doc_topic(&topic).map(|content| print!("{}", content))
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(query: &[String]) -> Result<(), CliError> {
    let op = cli::execute_check(query)?;
    println!("{:#?}", op);
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {}", e);
    }
}
