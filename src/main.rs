//! Safe Links command-line application.
//!
//! Decodes Safe Links URLs back to their destinations, or produces faux
//! Safe Links / query escaped URLs for test fixtures. Input comes from a
//! positional argument, a file, or standard input, and is processed line by
//! line so surrounding text and line endings are kept intact.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read, Write};
use std::path::{Path, PathBuf};

use safelinks::domain::expanded_values;
use safelinks::input::{process_lines, read_lines};
use safelinks::{classify, LinkTransformer, SafeLinksError, SelectionMode};

/// Safe Links URL tool
///
/// Decode Microsoft Safe Links URLs found in text, or encode plain URLs
/// as faux Safe Links for testing.
#[derive(Parser)]
#[command(name = "safelinks")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace Safe Links URLs with their original destination
    Decode {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Replace plain URLs with faux Safe Links URLs
    Encode {
        #[command(flatten)]
        input: InputArgs,

        /// Encode a random subset of URLs instead of all of them
        #[arg(short, long)]
        random: bool,
    },

    /// Replace plain URLs with their query escaped form
    Escape {
        #[command(flatten)]
        input: InputArgs,

        /// Escape a random subset of URLs instead of all of them
        #[arg(short, long)]
        random: bool,
    },

    /// List URLs found in the input, one per line
    Urls {
        #[command(flatten)]
        input: InputArgs,

        /// Also list http:// URLs
        #[arg(long)]
        include_http: bool,
    },

    /// Show the expanded values of Safe Links URLs
    Inspect {
        /// Safe Links URL to inspect
        #[arg(required_unless_present = "file")]
        url: Option<String>,

        /// Inspect every non-blank line of a file, reporting invalid ones
        /// and carrying on
        #[arg(short, long, value_name = "FILE", conflicts_with = "url")]
        file: Option<PathBuf>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Text to process (reads --file or standard input when omitted)
    text: Option<String>,

    /// Read input from a file
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl InputArgs {
    /// Opens the selected input source and returns it with a display name.
    fn open(&self) -> Result<(Box<dyn BufRead>, String)> {
        if let Some(text) = &self.text {
            let mut text = text.clone();
            if !text.ends_with('\n') {
                text.push('\n');
            }
            return Ok((Box::new(Cursor::new(text.into_bytes())), "argument".to_string()));
        }

        if let Some(path) = &self.file {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            return Ok((Box::new(BufReader::new(file)), path.display().to_string()));
        }

        Ok((Box::new(BufReader::new(io::stdin())), "standard input".to_string()))
    }
}

/// Command handler holding the shared transformer.
struct CommandHandler {
    transformer: LinkTransformer,
}

impl CommandHandler {
    fn new() -> Self {
        Self {
            transformer: LinkTransformer::with_regex_strategy(),
        }
    }

    /// Runs a line transform from `input` to standard output.
    fn transform<F>(&self, input: &InputArgs, transform: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<String, SafeLinksError>,
    {
        let (reader, source_name) = input.open()?;
        let stdout = io::stdout();

        let stats = process_lines(reader, stdout.lock(), &source_name, transform)
            .with_context(|| format!("Failed to process {}", source_name))?;

        log::info!(
            "{} line(s) read, {} changed, {} passed through",
            stats.lines_read,
            stats.lines_changed,
            stats.lines_passed_through
        );

        Ok(())
    }

    fn decode(&self, input: &InputArgs) -> Result<()> {
        self.transform(input, |line| self.transformer.decode(line))
    }

    fn encode(&self, input: &InputArgs, mode: SelectionMode) -> Result<()> {
        self.transform(input, |line| {
            let result = self.transformer.encode(line, mode);
            warn_on_no_op(&result);
            result
        })
    }

    fn escape(&self, input: &InputArgs, mode: SelectionMode) -> Result<()> {
        self.transform(input, |line| {
            let result = self.transformer.query_escape(line, mode);
            warn_on_no_op(&result);
            result
        })
    }

    fn urls(&self, input: &InputArgs, include_http: bool) -> Result<()> {
        let (mut reader, source_name) = input.open()?;
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .with_context(|| format!("Failed to read {}", source_name))?;

        let urls = match self.transformer.urls(&text, include_http) {
            Ok(urls) => urls,
            Err(err) if err.is_nothing_found() => {
                log::warn!("{}", err);
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();
        for parsed in urls {
            writeln!(out, "{}", parsed.trimmed)?;
        }

        Ok(())
    }

    fn inspect(&self, url: Option<&str>, file: Option<&Path>) -> Result<()> {
        match (url, file) {
            (Some(url), _) => Self::print_expanded(url),
            (None, Some(path)) => self.inspect_file(path),
            (None, None) => bail!("Either a URL or --file is required"),
        }
    }

    fn inspect_file(&self, path: &Path) -> Result<()> {
        let source_name = path.display().to_string();
        let file = File::open(path).with_context(|| format!("Failed to open {}", source_name))?;
        let urls = read_lines(BufReader::new(file), &source_name)?;

        let mut invalid = 0;
        for url in &urls {
            if let Err(err) = Self::print_expanded(url.trim()) {
                invalid += 1;
                eprintln!("Error: {:#}", err);
            }
        }

        log::info!("{} URL(s) inspected, {} invalid", urls.len(), invalid);
        Ok(())
    }

    fn print_expanded(url: &str) -> Result<()> {
        let parsed = classify(url).context("Failed to parse URL")?;
        let values = expanded_values(&parsed.url)
            .with_context(|| format!("Invalid Safe Links URL {:?}", url))?;

        println!("\nExpanded values from the given link:\n");
        for (key, value) in &values {
            println!("  {:<10}: {}", key, value);
        }

        Ok(())
    }
}

fn warn_on_no_op(result: &Result<String, SafeLinksError>) {
    if let Err(err) = result {
        if err.is_no_op() {
            log::warn!("{}; line left unchanged", err);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let handler = CommandHandler::new();

    match &cli.command {
        Commands::Decode { input } => handler.decode(input)?,
        Commands::Encode { input, random } => {
            handler.encode(input, SelectionMode::from_random_flag(*random))?
        }
        Commands::Escape { input, random } => {
            handler.escape(input, SelectionMode::from_random_flag(*random))?
        }
        Commands::Urls {
            input,
            include_http,
        } => handler.urls(input, *include_http)?,
        Commands::Inspect { url, file } => handler.inspect(url.as_deref(), file.as_deref())?,
    }

    Ok(())
}
