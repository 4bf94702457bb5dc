use std::{fs, process};

use clap::Parser;
use tally::{
    error::Error,
    interpreter::{
        evaluator::core::{Evaluator, MAX_CALL_DEPTH},
        parser::parse,
        transformer::transform,
    },
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// tally evaluates a small calculator language: definitions followed by one
/// final expression.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells tally to read the program from a file instead of the argument.
    #[arg(short, long)]
    file: bool,

    /// Prints the parse tree before evaluating.
    #[arg(short, long)]
    tree: bool,

    /// Prints the transformed program before evaluating.
    #[arg(short, long)]
    ast: bool,

    /// Maximum number of nested function calls.
    #[arg(long, default_value_t = MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Enables debug logging regardless of `RUST_LOG`.
    #[arg(short, long)]
    verbose: bool,

    contents: String,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr))
                                  .with(filter)
                                  .init();
}

fn run(args: &Args, source: &str) -> Result<f64, Error> {
    let tree = parse(source)?;
    if args.tree {
        print!("{}", tree.pretty());
    }

    let program = transform(tree)?;
    if args.ast {
        println!("{program}");
    }

    let mut evaluator = Evaluator::with_max_call_depth(args.max_call_depth);
    Ok(evaluator.run_program(&program)?)
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let source = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
                                              eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                                                        &args.contents);
                                              process::exit(1);
                                          })
    } else {
        args.contents.clone()
    };

    match run(&args, &source) {
        Ok(value) => println!("{value}"),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}
