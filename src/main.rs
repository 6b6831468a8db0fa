//! Headcase CLI - converts all-caps Markdown headings to sentence case.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use similar::TextDiff;
use walkdir::WalkDir;

use headcase::{
    Config, ConfigError, Dictionary, ProperNouns, UnknownWord, analyze_words, convert_document,
    unknown_heading_words,
};

/// Converts all-caps and title-case Markdown headings to sentence case.
#[derive(Parser, Debug)]
#[command(name = "headcase")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert headings in Markdown files to sentence case.
    Convert(ConvertArgs),
    /// Extract heading words that are missing from an English dictionary.
    Extract(ExtractArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Files or directories to convert. Use - for stdin.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Path to a text file containing proper nouns (one per line).
    #[arg(short, long, value_name = "FILE")]
    proper_nouns: Option<PathBuf>,

    /// Show a diff of what would be changed without modifying files.
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Check if headings are already sentence case (exit 1 if not).
    #[arg(short, long)]
    check: bool,

    /// Read input from stdin and write the result to stdout.
    #[arg(long)]
    stdin: bool,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Files or directories to scan.
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Path to the English words dictionary file.
    #[arg(short, long, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// Output file for the collected words.
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "non_english_words.txt"
    )]
    output: PathBuf,

    /// Print every word as it is found.
    #[arg(short, long)]
    verbose: bool,

    /// Report whether the given words are in the dictionary, instead of
    /// scanning files.
    #[arg(short, long, value_name = "WORD", num_args = 1..)]
    analyze: Vec<String>,
}

/// How the convert subcommand disposes of changed files.
#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Write,
    DryRun,
    Check,
}

enum Outcome {
    Unchanged,
    Modified,
    WouldChange(String),
    Failed(String),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Convert(args) => run_convert(&args),
        Command::Extract(args) => run_extract(&args),
    }
}

fn run_convert(args: &ConvertArgs) -> ExitCode {
    let config = match load_config() {
        Ok(found) => found,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let has_include = config
        .as_ref()
        .is_some_and(|(_, config)| !config.include.is_empty());
    let use_stdin = args.stdin
        || (args.paths.len() == 1 && args.paths[0].as_os_str() == "-")
        || (args.paths.is_empty() && !has_include);

    let nouns_path = args.proper_nouns.clone().or_else(|| {
        config.as_ref().and_then(|(path, config)| {
            config
                .proper_nouns
                .as_ref()
                .map(|nouns| Config::resolve(path, nouns))
        })
    });
    let nouns = match load_nouns(nouns_path.as_deref(), use_stdin) {
        Ok(nouns) => nouns,
        Err(code) => return code,
    };

    if use_stdin {
        return convert_stdin(&nouns);
    }

    let files = match gather_inputs(&args.paths, config.as_ref()) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if files.is_empty() {
        println!("No markdown files found");
        return ExitCode::SUCCESS;
    }
    println!("Found {} markdown files", files.len());

    let mode = if args.check {
        Mode::Check
    } else if args.dry_run {
        Mode::DryRun
    } else {
        Mode::Write
    };

    let results: Vec<(&PathBuf, Outcome)> = files
        .par_iter()
        .map(|path| (path, process_file(path, &nouns, mode)))
        .collect();

    let mut modified = 0;
    let mut out_of_date = 0;
    let mut failed = 0;
    for (path, outcome) in results {
        match outcome {
            Outcome::Unchanged => {}
            Outcome::Modified => {
                modified += 1;
                println!("Modified: {}", path.display());
            }
            Outcome::WouldChange(diff) => {
                out_of_date += 1;
                if mode == Mode::Check {
                    eprintln!("{}: headings are not sentence case", path.display());
                } else {
                    print!("{}", diff);
                }
            }
            Outcome::Failed(message) => {
                failed += 1;
                eprintln!("Error processing {}: {}", path.display(), message);
            }
        }
    }

    if mode == Mode::Write {
        println!("\nProcessing complete. Modified {} files.", modified);
    }

    if failed > 0 || (mode == Mode::Check && out_of_date > 0) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_extract(args: &ExtractArgs) -> ExitCode {
    let config = match load_config() {
        Ok(found) => found,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Unlike the proper-noun list, a missing dictionary is fatal: without it
    // every heading word would be reported.
    let dictionary_path = args
        .dictionary
        .clone()
        .or_else(|| {
            config.as_ref().and_then(|(path, config)| {
                config
                    .dictionary
                    .as_ref()
                    .map(|dict| Config::resolve(path, dict))
            })
        })
        .unwrap_or_else(|| PathBuf::from("en_words.txt"));
    let dictionary = match Dictionary::from_file(&dictionary_path) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!(
        "Loaded {} English words from {}",
        dictionary.len(),
        dictionary_path.display()
    );

    if !args.analyze.is_empty() {
        println!("Word analysis:");
        for analysis in analyze_words(&args.analyze, &dictionary) {
            let status = if analysis.is_english {
                "English"
            } else {
                "Non-English"
            };
            println!("  '{}' -> {}", analysis.word, status);
        }
        return ExitCode::SUCCESS;
    }

    let files = match gather_inputs(&args.paths, config.as_ref()) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if files.is_empty() {
        println!("No markdown files found");
        return ExitCode::SUCCESS;
    }
    println!("Found {} markdown files", files.len());

    let results: Vec<(&PathBuf, Result<Vec<UnknownWord>, String>)> = files
        .par_iter()
        .map(|path| (path, scan_file(path, &dictionary)))
        .collect();

    let mut seen = HashSet::new();
    let mut words = Vec::new();
    let mut failed = 0;
    for (path, result) in results {
        match result {
            Ok(found) => {
                if args.verbose {
                    println!("Processing: {}", path.display());
                    if found.is_empty() {
                        println!("  No non-English words found in headings");
                    }
                    for unknown in &found {
                        println!(
                            "  Found non-English word: '{}' in heading: {}",
                            unknown.word, unknown.heading
                        );
                    }
                }
                for unknown in found {
                    if seen.insert(unknown.word.clone()) {
                        words.push(unknown.word);
                    }
                }
            }
            Err(message) => {
                failed += 1;
                eprintln!("Error processing {}: {}", path.display(), message);
            }
        }
    }

    if words.is_empty() {
        println!("\nNo non-English words found in any headings.");
    } else {
        words.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        let mut contents = words.join("\n");
        contents.push('\n');
        if let Err(e) = fs::write(&args.output, contents) {
            eprintln!("Error writing {}: {}", args.output.display(), e);
            return ExitCode::FAILURE;
        }
        println!("\nResults saved to '{}'", args.output.display());
        println!("Total unique non-English words found: {}", words.len());
    }

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn load_config() -> Result<Option<(PathBuf, Config)>, ConfigError> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    Config::discover(&cwd)
}

/// Loads the proper-noun list. A missing file is only a warning and the
/// conversion proceeds without proper nouns; any other failure is fatal.
fn load_nouns(path: Option<&Path>, quiet: bool) -> Result<ProperNouns, ExitCode> {
    let Some(path) = path else {
        return Ok(ProperNouns::default());
    };
    match ProperNouns::from_file(path) {
        Ok(nouns) => {
            if !quiet {
                println!("Loaded {} proper nouns from {}", nouns.len(), path.display());
            }
            Ok(nouns)
        }
        Err(e) if e.is_not_found() => {
            eprintln!(
                "Warning: proper nouns file '{}' not found. Proceeding without proper nouns.",
                path.display()
            );
            Ok(ProperNouns::default())
        }
        Err(e) => {
            eprintln!("Error loading proper nouns file: {}", e);
            Err(ExitCode::FAILURE)
        }
    }
}

fn convert_stdin(nouns: &ProperNouns) -> ExitCode {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("Error reading stdin: {}", e);
        return ExitCode::FAILURE;
    }
    print!("{}", convert_document(&input, nouns));
    ExitCode::SUCCESS
}

/// Resolves the files to process: explicit paths if given, otherwise the
/// configuration's include patterns.
fn gather_inputs(
    paths: &[PathBuf],
    config: Option<&(PathBuf, Config)>,
) -> Result<Vec<PathBuf>, ConfigError> {
    if !paths.is_empty() {
        return Ok(discover_files(paths));
    }
    match config {
        Some((config_path, config)) => {
            let base = config_path.parent().unwrap_or(Path::new("."));
            config.collect_files(base)
        }
        None => Ok(Vec::new()),
    }
}

/// Expands paths into markdown files. Directories are walked recursively for
/// `.md` and `.markdown` files; explicit file arguments are taken as given.
fn discover_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path) {
                match entry {
                    Ok(entry) => {
                        if entry.file_type().is_file() && is_markdown(entry.path()) {
                            files.push(entry.into_path());
                        }
                    }
                    Err(e) => eprintln!("Error reading directory entry: {}", e),
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files.dedup();
    files
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("md") | Some("markdown")
    )
}

fn process_file(path: &Path, nouns: &ProperNouns, mode: Mode) -> Outcome {
    let input = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return Outcome::Failed(e.to_string()),
    };
    let output = convert_document(&input, nouns);
    if input == output {
        return Outcome::Unchanged;
    }
    match mode {
        Mode::Check => Outcome::WouldChange(String::new()),
        Mode::DryRun => {
            let name = path.display().to_string();
            let diff = TextDiff::from_lines(input.as_str(), output.as_str());
            let text = format!(
                "{}",
                diff.unified_diff().context_radius(2).header(&name, &name)
            );
            Outcome::WouldChange(text)
        }
        Mode::Write => match fs::write(path, &output) {
            Ok(()) => Outcome::Modified,
            Err(e) => Outcome::Failed(e.to_string()),
        },
    }
}

fn scan_file(path: &Path, dictionary: &Dictionary) -> Result<Vec<UnknownWord>, String> {
    let input = fs::read_to_string(path).map_err(|e| e.to_string())?;
    Ok(unknown_heading_words(&input, dictionary))
}
