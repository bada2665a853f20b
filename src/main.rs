use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use where_lang::cli::{self, CheckOptions, CheckResult, CliError, OutputFormat};
use where_lang::limits::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_LEN, DEFAULT_MAX_TERMS};
use where_lang::Limits;

#[derive(ClapParser)]
#[command(name = "where-lang")]
#[command(about = "where-lang - parse and validate filter expressions")]
#[command(version)]
struct Cli {
    /// Log parser activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a filter expression
    Check {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Print the predicate tree as JSON
        #[arg(long)]
        json: bool,

        /// Print the predicate tree as indented JSON
        #[arg(short, long)]
        pretty: bool,

        /// Print the expression in canonical form
        #[arg(long, conflicts_with_all = ["json", "pretty"])]
        canonical: bool,

        /// Maximum nesting depth
        #[arg(long, env = "WHERE_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Maximum number of comparisons and bare literals
        #[arg(long, env = "WHERE_MAX_TERMS", default_value_t = DEFAULT_MAX_TERMS)]
        max_terms: usize,

        /// Maximum input length in bytes
        #[arg(long, env = "WHERE_MAX_LENGTH", default_value_t = DEFAULT_MAX_INPUT_LEN)]
        max_length: usize,
    },

    /// List the tokens of an expression with their offsets
    Tokens {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// List documentation topics
    Docs,

    /// Show documentation for a specific topic
    Doc {
        /// Topic name (use 'where-lang docs' to list topics)
        topic: String,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            expression,
            json,
            pretty,
            canonical,
            max_depth,
            max_terms,
            max_length,
        } => {
            let format = if canonical {
                OutputFormat::Canonical
            } else if json || pretty {
                OutputFormat::Json
            } else {
                OutputFormat::Summary
            };
            let limits = Limits::default()
                .with_max_depth(max_depth)
                .with_max_terms(max_terms)
                .with_max_input_len(max_length);
            run_check(expression, format, pretty, limits)
        }
        Commands::Tokens { expression } => run_tokens(expression),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { topic } => cli::get_doc_topic(&topic).map(|content| print!("{content}")),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("where_lang=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_expression(expression: Option<String>) -> Result<String, CliError> {
    match expression {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end_matches(['\n', '\r']).to_string())
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(
    expression: Option<String>,
    format: OutputFormat,
    pretty: bool,
    limits: Limits,
) -> Result<(), CliError> {
    let options = CheckOptions {
        expression: read_expression(expression)?,
        format,
        limits,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Tree(tree) if pretty => println!("{:#}", tree),
        CheckResult::Tree(tree) => println!("{}", tree),
        CheckResult::Canonical(text) => println!("{}", text),
    }
    Ok(())
}

fn run_tokens(expression: Option<String>) -> Result<(), CliError> {
    let expression = read_expression(expression)?;
    let tokens = cli::execute_tokens(&expression)?;
    println!("{}", cli::format_tokens(&tokens));
    Ok(())
}
