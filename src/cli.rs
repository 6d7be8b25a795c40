//! Command-line interface for sqlprettier.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Arg, ArgAction, Command};

use crate::config::{AliasAs, IndentStyle, LogicalOperatorNewline, MultilineLists};
use crate::dialect::Dialect;
use crate::format::KeywordCase;

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to format
    pub inputs: Vec<PathBuf>,

    /// SQL dialect
    pub language: Option<Dialect>,

    /// Keyword case
    pub keyword_case: Option<KeywordCase>,

    /// Clause keyword layout
    pub indent_style: Option<IndentStyle>,

    /// Spaces per indent level
    pub tab_width: Option<usize>,

    /// Indent with tabs
    pub use_tabs: bool,

    /// Placement of broken AND/OR
    pub logical_operator_newline: Option<LogicalOperatorNewline>,

    /// Width limit for inline parenthesised blocks
    pub expression_width: Option<usize>,

    /// Newlines after each `;`
    pub lines_between_queries: Option<usize>,

    /// No spaces around operators
    pub dense_operators: bool,

    /// Put `;` on its own line
    pub newline_before_semicolon: bool,

    /// Short-clause rule
    pub multiline_lists: Option<MultilineLists>,

    /// Alias keyword policy
    pub alias_as: Option<AliasAs>,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Silent mode (no output)
    pub silent: bool,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Custom SQL file extensions (in addition to defaults)
    pub extensions: Vec<String>,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("sqlprettier")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Dialect-aware SQL pretty-printer")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to format (`-` reads stdin)")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("language")
                .short('l')
                .long("language")
                .help("SQL dialect: sql, sqlite, mysql, plsql, hive, n1ql [default: sql]")
                .value_name("DIALECT")
                .value_parser(Dialect::from_str),
        )
        .arg(
            Arg::new("keyword-case")
                .short('k')
                .long("keyword-case")
                .help("Keyword case: upper, lower, preserve [default: preserve]")
                .value_name("CASE")
                .value_parser(KeywordCase::from_str),
        )
        .arg(
            Arg::new("indent-style")
                .long("indent-style")
                .help("Indent style: standard, tabular-left, tabular-right [default: standard]")
                .value_name("STYLE")
                .value_parser(IndentStyle::from_str),
        )
        .arg(
            Arg::new("tab-width")
                .short('t')
                .long("tab-width")
                .help("Spaces per indent level [default: 2]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("use-tabs")
                .long("use-tabs")
                .help("Indent with tabs instead of spaces")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("logical-operator-newline")
                .long("logical-operator-newline")
                .help("Break before or after AND/OR [default: before]")
                .value_name("WHERE")
                .value_parser(LogicalOperatorNewline::from_str),
        )
        .arg(
            Arg::new("expression-width")
                .long("expression-width")
                .help("Maximum width of a parenthesised expression kept inline [default: 50]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("lines-between-queries")
                .long("lines-between-queries")
                .help("Newlines after each statement [default: 1]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("dense-operators")
                .long("dense-operators")
                .help("Remove spaces around operators")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("newline-before-semicolon")
                .long("newline-before-semicolon")
                .help("Put statement-ending semicolons on their own line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("multiline-lists")
                .long("multiline-lists")
                .help("When to break lists: always, avoid, expression-width, or an item count [default: always]")
                .value_name("MODE")
                .value_parser(MultilineLists::from_str),
        )
        .arg(
            Arg::new("alias-as")
                .long("alias-as")
                .help("Alias keyword policy: preserve, always, never [default: preserve]")
                .value_name("POLICY")
                .value_parser(AliasAs::from_str),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Output to stdout instead of modifying files in-place")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recursively format directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("extension")
                .short('x')
                .long("extension")
                .help("Additional SQL file extension (can be repeated, e.g., -x hql -x pks)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config and tracing events)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no output, for editor integration)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

fn strings(matches: &clap::ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default()
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        language: matches.get_one::<Dialect>("language").copied(),
        keyword_case: matches.get_one::<KeywordCase>("keyword-case").copied(),
        indent_style: matches.get_one::<IndentStyle>("indent-style").copied(),
        tab_width: matches.get_one::<usize>("tab-width").copied(),
        use_tabs: matches.get_flag("use-tabs"),
        logical_operator_newline: matches
            .get_one::<LogicalOperatorNewline>("logical-operator-newline")
            .copied(),
        expression_width: matches.get_one::<usize>("expression-width").copied(),
        lines_between_queries: matches.get_one::<usize>("lines-between-queries").copied(),
        dense_operators: matches.get_flag("dense-operators"),
        newline_before_semicolon: matches.get_flag("newline-before-semicolon"),
        multiline_lists: matches
            .get_one::<MultilineLists>("multiline-lists")
            .copied(),
        alias_as: matches.get_one::<AliasAs>("alias-as").copied(),
        stdout: matches.get_flag("stdout"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: strings(matches, "exclude"),
        extensions: strings(matches, "extension"),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
        jobs: matches.get_one::<usize>("jobs").copied(),
    }
}
