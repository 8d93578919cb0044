//! Build a DAWG from a word list and print it as a GraphViz dot file.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use dawg_dot::builder::{AddError, Dawg, Dump};
use dawg_dot::Renderer;
use log::{debug, error, info};

#[derive(Parser)]
#[command(about = "Render a word list as a DAWG in dot format")]
struct Args {
    /// File to read words from, one per line, or `-` for stdin.
    #[arg(default_value = "/usr/share/dict/words")]
    words: PathBuf,

    /// Lowercase every word before adding it.
    #[arg(short, long)]
    ignore_case: bool,

    /// Name of the emitted digraph.
    #[arg(short, long, default_value = "DAWG")]
    name: String,

    /// Escape quotes and backslashes in edge labels.
    #[arg(short, long)]
    escape: bool,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug)]
enum AppError {
    Io(io::Error),
    Add(AddError),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> AppError {
        AppError::Io(err)
    }
}

impl From<AddError> for AppError {
    fn from(err: AddError) -> AppError {
        AppError::Add(err)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "I/O error: {}", err),
            AppError::Add(err) => write!(f, "{}", err),
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Args::parse()) {
        error!("{}", err);
        eprintln!("dawg2dot: {}", err);
        process::exit(1);
    }
}

/// Read one word per line, keeping only lines made of visible ASCII.
///
/// Lines are split on raw bytes, so a stray Latin-1 line is skipped
/// instead of failing the whole read. The result is sorted and free of
/// duplicates.
fn read_words<R: BufRead>(input: R, ignore_case: bool) -> io::Result<Vec<Vec<u8>>> {
    let mut words = Vec::new();

    for line in input.split(b'\n') {
        let line = line?;

        // Trim surrounding whitespace, including a `\r` from CRLF files.
        let start = line
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(line.len());
        let end = line
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(start, |i| i + 1);
        let word = &line[start..end];

        if word.is_empty() || !word.iter().all(u8::is_ascii_graphic) {
            continue;
        }

        if ignore_case {
            words.push(word.to_ascii_lowercase());
        } else {
            words.push(word.to_vec());
        }
    }

    // The graph only accepts sorted input.
    words.sort_unstable();
    words.dedup();

    Ok(words)
}

fn run(args: Args) -> Result<(), AppError> {
    debug!("Reading words from {}...", args.words.display());
    let input: Box<dyn BufRead> = if args.words.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&args.words)?))
    };

    let words = read_words(input, args.ignore_case)?;

    debug!("Building the graph from {} words...", words.len());
    let mut dawg = Dawg::new();
    for word in &words {
        dawg.add(word)?;
    }
    dawg.close();

    let stats = dawg.stats();
    info!(
        "{} words, {} states, {} edges, longest word {}",
        stats.words, stats.nodes, stats.edges, stats.longest_word
    );

    let renderer = Renderer::new().name(&args.name).escape_labels(args.escape);
    let (nodes, edges) = dawg.dump();

    debug!("Writing the dot file...");
    match &args.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            renderer.render_io(&nodes, &edges, &mut out)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            renderer.render_io(&nodes, &edges, &mut out)?;
            out.flush()?;
        }
    }

    debug!("Done.");

    Ok(())
}
