mod svg;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use brick_core::blockize::blockize;
use brick_core::xpm;
use clap::Parser;

use crate::svg::SvgPutter;

#[derive(Parser)]
#[command(
    name = "brick-convert",
    about = "Convert XPM pixel art to a stud-brick SVG",
    disable_help_flag = true
)]
struct Cli {
    /// Input .xpm file path
    input: Option<PathBuf>,

    /// Output .svg file path (default: input with .svg extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print usage
    #[arg(short, long)]
    help: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Usage goes to stderr with a failing status, for -h as well as for a
    // missing input path.
    let input = match (cli.help, cli.input) {
        (false, Some(input)) => input,
        _ => {
            eprintln!("Usage: brick-convert <input.xpm> [-o <output.svg>]");
            std::process::exit(1);
        }
    };

    let output_path = cli.output.unwrap_or_else(|| {
        let mut p = input.clone();
        p.set_extension("svg");
        p
    });

    let file = File::open(&input)
        .with_context(|| format!("failed to open {}", input.display()))?;
    let pixmap = xpm::parse(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", input.display()))?;
    eprintln!("Source: {}x{} cells", pixmap.width, pixmap.height);

    let out = File::create(&output_path)
        .with_context(|| format!("failed to create {}", output_path.display()))?;
    let mut svg = SvgPutter::new(BufWriter::new(out), pixmap.width, pixmap.height)?;

    let mut count = 0usize;
    for block in blockize(&pixmap) {
        svg.put_block(&block)?;
        count += 1;
    }
    svg.finish()?;

    eprintln!("Wrote {count} blocks to {}", output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn help_flag_takes_usage_path() {
        let cli = Cli::try_parse_from(["brick-convert", "-h"]).unwrap();
        assert!(cli.help);
        assert!(cli.input.is_none());
    }

    #[test]
    fn missing_input_takes_usage_path() {
        let cli = Cli::try_parse_from(["brick-convert"]).unwrap();
        assert!(!cli.help);
        assert!(cli.input.is_none());
    }

    #[test]
    fn input_and_output_parse() {
        let cli =
            Cli::try_parse_from(["brick-convert", "in.xpm", "-o", "out.svg"]).unwrap();
        assert_eq!(cli.input.unwrap().to_str(), Some("in.xpm"));
        assert_eq!(cli.output.unwrap().to_str(), Some("out.svg"));
        assert!(!cli.help);
    }
}
