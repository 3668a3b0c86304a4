//! Command line entry point for the docstring converter.
//!
//! Two modes:
//!
//! - **stdin mode**: `docmorph < file.py` writes the converted source
//!   to stdout.
//! - **file mode**: `docmorph -o out/ src/*.py` writes each converted
//!   file under the output directory, inputs untouched.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use docmorph::config::Config;
use docmorph::model::{Diagnostic, Scope};
use docmorph::scan::SourceFile;
use docmorph::style::Style;

#[derive(Parser)]
#[command(
    name = "docmorph",
    about = "Convert Python docstrings between documentation styles"
)]
struct Cli {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output style: javadoc, reST, cstyle, groups, google, numpydoc
    #[arg(short = 'f', long, default_value = "reST")]
    format: String,

    /// Input style; autodetected per docstring when omitted
    #[arg(short = 'i', long)]
    input_style: Option<String>,

    /// Docstring delimiter quotes
    #[arg(short = 'q', long, default_value = "\"\"\"")]
    quotes: String,

    /// Spaces per indentation level inside docstrings
    #[arg(long, default_value_t = 4)]
    spaces: usize,

    /// Put generated descriptions below the quotes instead of on the
    /// opening line
    #[arg(long)]
    no_first_line: bool,

    /// Leave out parameter, return and raises sections with no content
    #[arg(long)]
    skip_empty: bool,

    /// Leave out type lines in tag-style output
    #[arg(long)]
    no_type_tags: bool,

    /// Write an empty type line for parameters with no known type
    #[arg(long)]
    type_stub: bool,

    /// Do not echo default values into parameter descriptions
    #[arg(long)]
    no_default_values: bool,

    /// Always start the description on the line below the quotes
    #[arg(long)]
    description_on_new_line: bool,

    /// Convert existing docstrings only, create none
    #[arg(long)]
    convert_only: bool,

    /// Move an __init__ docstring to its class when the class has none
    #[arg(long)]
    init2class: bool,

    /// Insert a module docstring with the file name when missing
    #[arg(long)]
    file_comment: bool,

    /// Process only these scopes: public, protected, private (repeatable)
    #[arg(long)]
    method_scope: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    if cli.files.is_empty() || cli.files == ["-"] {
        return stdin_mode(&config);
    }
    file_mode(&cli, &config)
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = Config {
        output_style: Style::from_name(&cli.format)?,
        quotes: cli.quotes.clone(),
        indent: cli.spaces,
        // The published convention puts short descriptions on the
        // opening line, so the binary default differs from the
        // library one.
        first_line: !cli.no_first_line,
        skip_empty: cli.skip_empty,
        type_tags: !cli.no_type_tags,
        type_stub: cli.type_stub,
        show_default_value: !cli.no_default_values,
        description_on_new_line: cli.description_on_new_line,
        convert_only: cli.convert_only,
        init2class: cli.init2class,
        file_comment: cli.file_comment,
        ..Config::default()
    };
    if let Some(name) = &cli.input_style {
        config.input_style = Some(Style::from_name(name)?);
    }
    for scope in &cli.method_scope {
        config.method_scope.push(Scope::from_name(scope)?);
    }
    Ok(config)
}

/// stdin mode: read Python source from stdin, write the converted
/// source to stdout.
fn stdin_mode(config: &Config) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let file = SourceFile::from_source("stdin", &input, config)?;
    let out = file.rewrite(config);
    report(&out.diagnostics, "stdin");
    print!("{}", out.text);
    Ok(())
}

/// file mode: convert every input file into the output directory,
/// keeping the original file names.
fn file_mode(cli: &Cli, config: &Config) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let input_files = expand_globs(&cli.files)?;
    for path in &input_files {
        let file = match SourceFile::read(&path.to_string_lossy(), config) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("warning: skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let out = file.rewrite(config);
        report(&out.diagnostics, &path.to_string_lossy());

        let Some(name) = path.file_name() else {
            eprintln!("warning: skipping {}: no file name", path.display());
            continue;
        };
        let out_path = output_dir.join(name);
        fs::write(&out_path, &out.text)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }
    Ok(())
}

fn report(diagnostics: &[Diagnostic], source: &str) {
    for d in diagnostics {
        eprintln!("warning: {source}: {}", d.message);
    }
}

/// File extensions recognized as source files.
const SUPPORTED_EXTENSIONS: &[&str] = &["py"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // If it's a directory, scan for supported extensions (non-recursive)
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() {
                    if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
                        if SUPPORTED_EXTENSIONS.contains(&ext) {
                            files.push(p);
                        }
                    }
                }
            }
            continue;
        }
        // Try as glob
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}
