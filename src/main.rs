//! sqlprettier - dialect-aware SQL pretty-printer

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use glob::Pattern;
use rayon::prelude::*;
use sqlprettier::process::format_file;
use sqlprettier::{parse_args, CliArgs, Config};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

/// SQL file extensions to process
const SQL_EXTENSIONS: &[&str] = &["sql", "SQL"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    let args = parse_args();
    init_tracing(args.debug);

    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    if use_stdin {
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // An explicit config file applies to every input; otherwise each file
    // discovers its own
    let base_config = if args.config.is_some() {
        Some(build_config(&args, None)?)
    } else {
        None
    };

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(&args);
    if files.is_empty() {
        if !args.silent {
            eprintln!("No SQL files found to format.");
        }
        return Ok(());
    }

    if args.stdout || args.jobs == Some(1) {
        process_files_sequential(&files, base_config.as_ref(), &args);
    } else {
        process_files_parallel(&files, base_config.as_ref(), &args);
    }

    Ok(())
}

/// Install a tracing subscriber when `--debug` or `RUST_LOG` asks for one
fn init_tracing(debug: bool) {
    if !debug && std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let filter = if debug && std::env::var_os("RUST_LOG").is_none() {
        EnvFilter::new("sqlprettier=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        if args.debug {
            let discovered = Config::discover_config_files(&start);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", start.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", start.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(&start)
    };

    apply_cli_overrides(&mut config, args);

    if args.debug {
        print_config_debug(&config);
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// CLI flags take precedence over every config file
fn apply_cli_overrides(config: &mut Config, args: &CliArgs) {
    if let Some(language) = args.language {
        config.language = language;
    }
    if let Some(keyword_case) = args.keyword_case {
        config.keyword_case = keyword_case;
    }
    if let Some(indent_style) = args.indent_style {
        config.indent_style = indent_style;
    }
    if let Some(tab_width) = args.tab_width {
        config.tab_width = tab_width;
    }
    if let Some(newline) = args.logical_operator_newline {
        config.logical_operator_newline = newline;
    }
    if let Some(width) = args.expression_width {
        config.expression_width = width;
    }
    if let Some(lines) = args.lines_between_queries {
        config.lines_between_queries = lines;
    }
    if let Some(mode) = args.multiline_lists {
        config.multiline_lists = mode;
    }
    if let Some(alias_as) = args.alias_as {
        config.alias_as = alias_as;
    }
    // Flags can only switch these on
    config.use_tabs |= args.use_tabs;
    config.dense_operators |= args.dense_operators;
    config.newline_before_semicolon |= args.newline_before_semicolon;
}

/// Print configuration values in debug mode
fn print_config_debug(config: &Config) {
    eprintln!("[DEBUG] Configuration:");
    eprintln!("[DEBUG]   language: {}", config.language);
    eprintln!("[DEBUG]   keyword_case: {}", config.keyword_case);
    eprintln!("[DEBUG]   indent_style: {}", config.indent_style);
    eprintln!("[DEBUG]   tab_width: {}", config.tab_width);
    eprintln!("[DEBUG]   use_tabs: {}", config.use_tabs);
    eprintln!(
        "[DEBUG]   logical_operator_newline: {:?}",
        config.logical_operator_newline
    );
    eprintln!("[DEBUG]   expression_width: {}", config.expression_width);
    eprintln!(
        "[DEBUG]   lines_between_queries: {}",
        config.lines_between_queries
    );
    eprintln!("[DEBUG]   dense_operators: {}", config.dense_operators);
    eprintln!(
        "[DEBUG]   newline_before_semicolon: {}",
        config.newline_before_semicolon
    );
    eprintln!("[DEBUG]   multiline_lists: {:?}", config.multiline_lists);
    eprintln!("[DEBUG]   alias_as: {:?}", config.alias_as);
    if let Some(params) = &config.params {
        eprintln!("[DEBUG]   params: {params:?}");
    }
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            let max_depth = if args.recursive { 256 } else { 1 };
            // WalkDir reports symlink loops as errors, which are skipped
            for entry in WalkDir::new(input)
                .follow_links(true)
                .max_depth(max_depth)
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                let path = entry.path();
                if path.is_file()
                    && is_sql_file(path, &args.extensions)
                    && !is_excluded(path, &exclude_patterns)
                {
                    files.push(path.to_path_buf());
                }
            }
        } else if !args.silent {
            eprintln!("Skipping {}: no such file or directory", input.display());
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
            || path.components().any(|component| match component {
                std::path::Component::Normal(c) => pattern.matches(&c.to_string_lossy()),
                _ => false,
            })
    })
}

/// Check if a file has a SQL extension (defaults plus `--extension` values)
fn is_sql_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SQL_EXTENSIONS.contains(&ext)
                || custom_extensions
                    .iter()
                    .any(|custom| custom.strip_prefix('.').unwrap_or(custom) == ext)
        })
}

fn config_for(path: &Path, base_config: Option<&Config>, args: &CliArgs) -> Result<Config> {
    match base_config {
        Some(config) => Ok(config.clone()),
        None => build_config(args, Some(path)),
    }
}

/// Process files sequentially (for stdout output)
fn process_files_sequential(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) {
    for path in files {
        let file_result =
            config_for(path, base_config, args).and_then(|config| process_single_file(path, &config, args));

        if let Err(e) = file_result {
            eprintln!("Error formatting {}: {e:#}", path.display());
        }
    }
}

/// Process files in parallel using Rayon
fn process_files_parallel(files: &[PathBuf], base_config: Option<&Config>, args: &CliArgs) {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        let file_result =
            config_for(path, base_config, args).and_then(|config| process_single_file(path, &config, args));

        match file_result {
            Ok(()) => {
                success_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error formatting {}: {e:#}", path.display());
            }
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Formatted {success} files successfully.");
        } else {
            eprintln!("Formatted {success} files, {errors} errors.");
        }
    }
}

/// Process a single file
fn process_single_file(path: &Path, config: &Config, args: &CliArgs) -> Result<()> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let file_size = std::fs::metadata(path)?.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                file_size / (1024 * 1024),
                DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
            );
        }
        return Ok(());
    }

    let mut file_contents = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut file_contents))
        .with_context(|| format!("reading {}", path.display()))?;

    if !args.silent && !args.stdout {
        eprintln!("Formatting: {}", path.display());
    }

    let source_name = path.to_string_lossy();
    let reader = BufReader::new(Cursor::new(&file_contents));
    let mut output = Vec::new();
    format_file(reader, &mut output, config, &source_name)?;

    if args.stdout {
        io::stdout().write_all(&output)?;
    } else if output != file_contents {
        std::fs::write(path, &output)?;
    }

    Ok(())
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs) -> Result<()> {
    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    #[allow(clippy::cast_possible_truncation)]
    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    let reader = BufReader::new(Cursor::new(&stdin_contents));
    let mut output = Vec::new();
    format_file(reader, &mut output, config, "stdin")?;

    io::stdout().write_all(&output)?;

    if !args.silent {
        eprintln!("Formatted stdin successfully.");
    }

    Ok(())
}

fn print_usage() {
    println!(
        "sqlprettier v{} - dialect-aware SQL pretty-printer",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage:");
    println!("  sqlprettier [OPTIONS] <FILE>...");
    println!("  sqlprettier [OPTIONS] -r <DIRECTORY>");
    println!("  sqlprettier [OPTIONS] -              # Read from stdin");
    println!("  cat query.sql | sqlprettier          # Pipe input");
    println!();
    println!("Examples:");
    println!("  sqlprettier query.sql                # Format single file in-place");
    println!("  sqlprettier -r migrations/           # Recursively format directory");
    println!("  sqlprettier -l mysql -k upper q.sql  # MySQL dialect, uppercase keywords");
    println!("  sqlprettier --stdout q.sql           # Output to stdout");
    println!("  sqlprettier --indent-style tabular-left q.sql");
    println!();
    println!("Options:");
    println!("  -l, --language <DIALECT>            sql, sqlite, mysql, plsql, hive, n1ql [default: sql]");
    println!("  -k, --keyword-case <CASE>           upper, lower, preserve [default: preserve]");
    println!("      --indent-style <STYLE>          standard, tabular-left, tabular-right");
    println!("  -t, --tab-width <NUM>               Spaces per indent level [default: 2]");
    println!("      --use-tabs                      Indent with tabs");
    println!("      --logical-operator-newline <W>  before, after [default: before]");
    println!("      --expression-width <NUM>        Inline parenthesis width [default: 50]");
    println!("      --lines-between-queries <NUM>   Newlines after each `;` [default: 1]");
    println!("      --dense-operators               No spaces around operators");
    println!("      --newline-before-semicolon      `;` on its own line");
    println!("      --multiline-lists <MODE>        always, avoid, expression-width, or a count");
    println!("      --alias-as <POLICY>             preserve, always, never [default: preserve]");
    println!("  -r, --recursive                     Process directories recursively");
    println!("  -e, --exclude <PATTERN>             Exclude files/dirs matching pattern (repeatable)");
    println!("  -x, --extension <EXT>               Additional SQL extension (repeatable)");
    println!("  -j, --jobs <NUM>                    Parallel jobs (0=auto, 1=sequential)");
    println!("  -s, --stdout                        Output to stdout");
    println!("  -c, --config <FILE>                 Config file path (overrides auto-discovery)");
    println!("  -S, --silent                        Silent mode");
    println!("  -D, --debug                         Enable debug output");
    println!("  -h, --help                          Print help");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for sqlprettier.toml in the home directory and then in");
    println!("  every parent directory of the file being formatted.");
    println!("  More specific configs (closer to file) override less specific ones.");
}
