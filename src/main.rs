//! CLI entry point for commentscan

use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use commentscan::comments::registered_extensions;
use commentscan::github::{DEFAULT_API_URL, LanguageShare};
use commentscan::output::{self, RepositoriesView, SearchView};
use commentscan::scan::DEFAULT_MAX_FILE_SIZE;
use commentscan::{
    DEFAULT_RULE_SET, Error, FileComments, GithubClient, GithubConfig, GithubSource, IgnoreList,
    LocalSource, OutputConfig, Result, Route, RuleSet, ScanConfig, Scanner, SearchQuery,
    SourceFile, detect_comments, print_json, rule_set_for,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "commentscan")]
#[command(about = "Find comments in source files, locally or across GitHub repositories")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    color: ColorMode,

    /// Log more (-v for progress, -vv for every file). RUST_LOG overrides this
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the comments of individual files
    Detect(DetectArgs),
    /// Search the comments of a local directory
    Local(LocalArgs),
    /// Browse a GitHub route: USER lists repositories, USER/REPO searches one
    Github(GithubArgs),
}

#[derive(Args, Debug)]
struct DetectArgs {
    /// Files to read ("-" for stdin)
    #[arg(required_unless_present = "list_rules")]
    files: Vec<PathBuf>,

    /// Treat every file as having this extension (e.g. "vue")
    #[arg(short = 'e', long = "ext")]
    ext: Option<String>,

    /// List the rules applied to each extension instead of reading files
    #[arg(long = "list-rules", conflicts_with_all = ["files", "ext"])]
    list_rules: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,
}

/// Options shared by the commands that scan a whole tree.
#[derive(Args, Debug)]
struct ScanArgs {
    /// Only keep comments containing this text (case-insensitive)
    #[arg(short = 'q', long = "query", default_value = "")]
    query: String,

    /// Ignore files matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Maximum file size to scan (default: 1MB)
    /// Files larger than this are skipped. Use suffixes: K, M, G (e.g., 5M for 5MB)
    #[arg(long = "max-file-size", value_name = "SIZE")]
    max_file_size: Option<String>,

    /// Number of parallel workers for reading files
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Show full comment, not just first line
    #[arg(short = 'f', long = "full-comment")]
    full_comment: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,
}

#[derive(Args, Debug)]
struct LocalArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Scan all files (ignore .gitignore filtering and hidden-file rules)
    #[arg(short, long)]
    all: bool,

    #[command(flatten)]
    scan: ScanArgs,
}

#[derive(Args, Debug)]
struct GithubArgs {
    /// Route to open: "", "about", USER or USER/REPO
    #[arg(default_value = "/")]
    route: String,

    /// Branch, tag or commit to scan instead of the default branch
    #[arg(short = 'b', long = "branch")]
    branch: Option<String>,

    /// Personal access token
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long = "api-url", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout (e.g. 30s, 2m)
    #[arg(long = "timeout", default_value = "30s", value_parser = parse_duration_string)]
    timeout: Duration,

    #[command(flatten)]
    scan: ScanArgs,
}

/// Parse a duration string like "30s", "2m" into a Duration.
fn parse_duration_string(s: &str) -> std::result::Result<Duration, String> {
    humantime::parse_duration(s.trim()).map_err(|e| e.to_string())
}

/// Parse a file size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
fn parse_file_size(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size too large: {}", s))
}

/// Default log directive for a `-v` count.
fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "commentscan=warn",
        1 => "commentscan=info",
        _ => "commentscan=debug",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        if !e.use_stderr() {
            // --help and --version
            let _ = e.print();
            process::exit(0);
        }
        eprintln!("commentscan: argument parsing error: {}", e);
        process::exit(1);
    });

    init_tracing(cli.verbose);
    let use_color = should_use_color(cli.color);

    let result = match &cli.command {
        Command::Detect(args) => run_detect(args),
        Command::Local(args) => run_local(args, use_color),
        Command::Github(args) => run_github(args, use_color),
    };

    if let Err(e) = result {
        eprintln!("commentscan: {}", e);
        process::exit(1);
    }
}

/// Registered extensions with their rule names, then `*` for everything else.
fn rule_table() -> Vec<(&'static str, &'static RuleSet)> {
    let mut table: Vec<_> = registered_extensions()
        .into_iter()
        .map(|ext| (ext, rule_set_for(ext)))
        .collect();
    table.push(("*", &DEFAULT_RULE_SET));
    table
}

fn run_list_rules(json: bool) -> Result<()> {
    let table = rule_table();

    if json {
        let map: serde_json::Map<String, serde_json::Value> = table
            .iter()
            .map(|(ext, rules)| (ext.to_string(), rules.names().collect()))
            .collect();
        print_json(&map)?;
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (ext, rules) in table {
        writeln!(out, "{}: {}", ext, rules.names().collect::<Vec<_>>().join(", "))?;
    }
    Ok(())
}

fn run_detect(args: &DetectArgs) -> Result<()> {
    if args.list_rules {
        return run_list_rules(args.json);
    }

    let mut found = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let (name, content) = if path.as_os_str() == "-" {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            ("-".to_string(), String::from_utf8_lossy(&bytes).into_owned())
        } else {
            let bytes = std::fs::read(path).map_err(|e| {
                Error::Io(io::Error::new(
                    e.kind(),
                    format!("cannot read '{}': {}", path.display(), e),
                ))
            })?;
            let content = String::from_utf8_lossy(&bytes).into_owned();
            (path.display().to_string(), content)
        };

        let extension = match &args.ext {
            Some(ext) => ext.clone(),
            None => SourceFile::new(name.as_str(), None).extension(),
        };
        let comments = detect_comments(&content, &extension);
        found.push(FileComments {
            path: name,
            extension,
            comments,
        });
    }

    if args.json {
        print_json(&found)?;
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let show_names = found.len() > 1;
    for file in &found {
        if show_names {
            writeln!(out, "==> {} <==", file.path)?;
        }
        for comment in &file.comments {
            writeln!(out, "{}", comment)?;
        }
    }
    Ok(())
}

fn scan_config(args: &ScanArgs) -> Result<ScanConfig> {
    let max_file_size = match &args.max_file_size {
        Some(size_str) => parse_file_size(size_str).map_err(|e| {
            Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid --max-file-size '{}': {}", size_str, e),
            ))
        })?,
        None => DEFAULT_MAX_FILE_SIZE,
    };

    Ok(ScanConfig {
        query: SearchQuery::new(args.query.as_str()),
        ignore: IgnoreList::new(args.ignore.clone()),
        max_file_size,
        parallel_workers: args.jobs,
    })
}

fn output_config(args: &ScanArgs, use_color: bool) -> OutputConfig {
    OutputConfig {
        use_color: use_color && !args.json,
        full: args.full_comment,
    }
}

fn run_local(args: &LocalArgs, use_color: bool) -> Result<()> {
    let scanner = Scanner::new(scan_config(&args.scan)?);
    let source = LocalSource::new(&args.path).with_show_all(args.all);
    let report = scanner.scan(&source)?;

    if args.scan.json {
        print_json(&report)?;
    } else {
        output::print_report(&report, &output_config(&args.scan, use_color))?;
    }
    Ok(())
}

fn run_github(args: &GithubArgs, use_color: bool) -> Result<()> {
    let route = Route::parse(&args.route);
    info!("route {} ({})", route, route.name());

    match &route {
        Route::Home => {
            println!("{}", route.title());
            println!();
            println!("Give a route to browse:");
            println!("  commentscan github USER         list the repositories of USER");
            println!("  commentscan github USER/REPO    search the comments of REPO");
            Ok(())
        }
        Route::About => {
            println!("{}", route.title());
            println!();
            println!(
                "commentscan finds the comments in a repository's source files and filters them \
                 by a search query."
            );
            println!("Comments are detected by file extension; unknown extensions use every rule.");
            Ok(())
        }
        Route::UserRepositories { user } => {
            let client = github_client(args)?;
            let profile = client.fetch_user(user)?;
            let repositories = client.fetch_user_repositories(user)?;

            if args.scan.json {
                print_json(&RepositoriesView {
                    title: route.title(),
                    user: &profile,
                    repositories: &repositories,
                })?;
            } else {
                output::print_repositories(
                    &route.title(),
                    &profile,
                    &repositories,
                    &output_config(&args.scan, use_color),
                )?;
            }
            Ok(())
        }
        Route::SearchResult { user, repo } => {
            let client = github_client(args)?;
            let languages: Vec<LanguageShare> = client
                .fetch_repository_languages(user, repo)
                .unwrap_or_else(|e| {
                    warn!("no language breakdown for {}/{}: {}", user, repo, e);
                    Vec::new()
                });

            let scanner = Scanner::new(scan_config(&args.scan)?);
            let source = GithubSource::new(client, user.as_str(), repo.as_str())
                .with_branch(args.branch.clone());
            let report = scanner.scan(&source)?;

            if args.scan.json {
                print_json(&SearchView {
                    title: route.title(),
                    languages: &languages,
                    report: &report,
                })?;
            } else {
                output::print_search(
                    &route.title(),
                    &languages,
                    &report,
                    &output_config(&args.scan, use_color),
                )?;
            }
            Ok(())
        }
        Route::NotFound { path } => {
            eprintln!("{}", route.title());
            Err(Error::InvalidRoute(path.clone()))
        }
    }
}

fn github_client(args: &GithubArgs) -> Result<GithubClient> {
    GithubClient::new(GithubConfig {
        api_url: args.api_url.clone(),
        token: args.token.clone(),
        timeout: args.timeout,
    })
}
