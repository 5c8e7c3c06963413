use agglens::cli::{self, CliError, FlattenOptions, FlattenResult, OutputFormat};
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use tracing::{debug, trace};

#[derive(ClapParser)]
#[command(name = "agglens")]
#[command(about = "agglens - Flatten search aggregation results with a compact expression language")]
#[command(version)]
struct Cli {
    /// Enable verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten the aggregations of a search response
    Flatten {
        /// The expression to evaluate
        expression: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Treat the input as the aggregations section itself
        #[arg(long)]
        raw: bool,

        /// Pretty-print the output
        #[arg(short, long, conflicts_with = "ndjson")]
        pretty: bool,

        /// Write one record per line
        #[arg(long)]
        ndjson: bool,

        /// Rename the per-bucket count field
        #[arg(long)]
        count_field: Option<String>,

        /// Emit percentiles and multi-value results as key/value lists
        #[arg(long)]
        as_array: bool,

        /// Only validate the expression, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Show how an expression is parsed
    Tokens {
        /// The expression to parse
        expression: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'agglens docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("agglens started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = match cli.command {
        Commands::Flatten {
            expression,
            input,
            raw,
            pretty,
            ndjson,
            count_field,
            as_array,
            syntax_only,
        } => {
            let format = if ndjson {
                OutputFormat::NdJson
            } else if pretty {
                OutputFormat::Pretty
            } else {
                OutputFormat::Compact
            };
            let options = FlattenOptions {
                expression,
                input,
                raw,
                syntax_only,
                count_field,
                as_array,
            };
            run_flatten(options, format)
        }
        Commands::Tokens { expression } => match cli::describe_expression(&expression) {
            Ok(tree) => {
                print!("{}", tree);
                Ok(())
            }
            Err(e) => Err(e.into()),
        },
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => match cli::get_doc_category(&category) {
            Ok(content) => {
                print!("{}", content);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_flatten(mut options: FlattenOptions, format: OutputFormat) -> Result<(), CliError> {
    if options.input.is_none() && !options.syntax_only && !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        options.input = Some(buffer);
    }

    match cli::execute_flatten(&options)? {
        FlattenResult::SyntaxValid => println!("Syntax is valid"),
        FlattenResult::Success(output) => println!("{}", cli::render(&output, format)),
    }
    Ok(())
}
