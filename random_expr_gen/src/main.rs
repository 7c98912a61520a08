use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

const CONNECTIVES: [char; 4] = ['&', '|', '>', '~'];

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "COUNT", default_value_t = 1)]
    /// The number of expressions to generate
    count: usize,

    #[clap(short = 'n', long, value_parser, value_name = "VARS", default_value_t = 3)]
    /// Draw variables from the first VARS letters of the alphabet
    vars: usize,

    #[clap(short, long, value_parser, value_name = "DEPTH", default_value_t = 3)]
    /// Maximum nesting depth of connectives
    depth: usize,

    #[clap(short, long, value_parser, value_name = "SEED")]
    /// Seed for reproducible output
    seed: Option<u64>,

    #[clap(short, long, value_parser, value_name = "FILE")]
    /// The output filename (or stdout if not provided)
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.vars == 0 || args.vars > 26 {
        Err(anyhow::anyhow!(
            "Number of variables must be between 1 and 26, got {}",
            args.vars
        ))?
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut writer = if let Some(output_file) = args.output {
        let file = File::create(output_file)?;
        Box::new(BufWriter::new(file)) as Box<dyn Write>
    } else {
        Box::new(BufWriter::new(io::stdout())) as Box<dyn Write>
    };

    for _ in 0..args.count {
        writeln!(writer, "{}", expression(&mut rng, args.vars, args.depth))?;
    }

    // flush the writer before dropping it
    writer.flush()?;

    Ok(())
}

fn variable<R: Rng>(rng: &mut R, vars: usize) -> char {
    // vars <= 26
    char::from(b'a' + rng.gen_range(0..vars) as u8)
}

/// Negation is only emitted directly in front of a variable or a parenthesised group,
/// so every generated expression converts and evaluates cleanly.
fn expression<R: Rng>(rng: &mut R, vars: usize, depth: usize) -> String {
    if depth == 0 || rng.gen_bool(0.25) {
        let v = variable(rng, vars);
        return if rng.gen_bool(0.3) {
            format!("!{v}")
        } else {
            v.to_string()
        };
    }

    if rng.gen_bool(0.15) {
        return format!("!({})", expression(rng, vars, depth - 1));
    }

    let op = CONNECTIVES[rng.gen_range(0..CONNECTIVES.len())];
    let l = expression(rng, vars, depth - 1);
    let r = expression(rng, vars, depth - 1);

    if rng.gen_bool(0.5) {
        format!("({l}{op}{r})")
    } else {
        format!("{l}{op}{r}")
    }
}
