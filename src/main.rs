use clap::{ArgAction, Parser};
use log::{info, warn};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;
use truthtab::Processor;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "EXPR")]
    /// Expressions over single-letter variables and ! & | > ~ (read from stdin, one per line, if omitted)
    expressions: Vec<String>,

    #[clap(long, value_parser, value_name = "FILE")]
    /// Write the truth table as CSV (single expression only)
    csv: Option<PathBuf>,

    #[clap(long, value_parser, value_name = "FILE")]
    /// Write the sub-expression graph in dot (GraphViz) format (single expression only)
    dot: Option<PathBuf>,

    #[clap(short, long)]
    /// Only print the function vector
    quiet: bool,

    #[clap(short, long, action = ArgAction::Count)]
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    verbose: u8,

    #[clap(long, value_parser, value_name = "LEVEL", env = "TRUTHTAB_LOG", default_value = "warn")]
    /// Log level when no -v flag is given
    log_level: LevelFilter,
}

impl Args {
    const fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => self.log_level,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    TermLogger::init(
        args.level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let expressions = if args.expressions.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
            .collect::<io::Result<Vec<String>>>()?
    } else {
        args.expressions.clone()
    };

    if (args.csv.is_some() || args.dot.is_some()) && expressions.len() != 1 {
        Err(anyhow::anyhow!(
            "--csv and --dot need exactly one expression, got {}",
            expressions.len()
        ))?
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for expression in &expressions {
        let mut processor = match Processor::parse_and_build(expression) {
            Ok(p) => p,
            Err(e) => {
                writeln!(out, "invalid expression {expression:?}: {e}")?;
                continue;
            }
        };

        processor.evaluate()?;
        info!("{} -> {}", expression, processor.postfix());

        if args.quiet {
            writeln!(out, "{}", processor.function_vector())?;
        } else {
            report(&mut out, expression, &processor)?;
        }

        if let Some(path) = &args.csv {
            processor.write_csv(File::create(path)?)?;
        }

        if let Some(path) = &args.dot {
            processor.render_dot(&mut File::create(path)?)?;
        }
    }

    out.flush()?;

    Ok(())
}

fn report<W: Write>(out: &mut W, expression: &str, processor: &Processor) -> anyhow::Result<()> {
    writeln!(out, "Expression: {expression}")?;
    writeln!(out, "Postfix: {}", processor.postfix())?;
    writeln!(out)?;
    writeln!(out, "Truth table:")?;
    writeln!(out, "{}", processor.truth_table_text())?;
    writeln!(out, "SCNF: {}", processor.scnf()?)?;
    writeln!(out, "SCNF (indices): {}", processor.scnf_indices()?)?;
    writeln!(out, "SDNF: {}", processor.sdnf()?)?;
    writeln!(out, "SDNF (indices): {}", processor.sdnf_indices()?)?;
    writeln!(out, "Function vector: {}", processor.function_vector())?;

    match processor.function_vector_as_integer() {
        Ok(value) => writeln!(out, "Function vector (decimal): {value}")?,
        Err(e) => warn!("{}", e),
    }

    writeln!(out, "Classification: {}", processor.classify())?;
    writeln!(out)?;

    Ok(())
}
