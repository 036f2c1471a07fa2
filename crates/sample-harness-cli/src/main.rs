// crates/sample-harness-cli/src/main.rs
// ============================================================================
// Module: Sample Harness CLI Entry Point
// Description: Command dispatcher for running and inspecting samples.
// Purpose: Provide a localized CLI over the sample dispatcher.
// Dependencies: clap, sample-harness-config, sample-harness-core, serde, thiserror.
// ============================================================================

//! ## Overview
//! The sample harness CLI runs a registered sample with CLI-style arguments
//! and writes its captured output to stdout. Failures print one message on
//! stderr and exit non-zero; partial sample output is never shown.
//!
//! All harness messages are routed through the i18n catalog. Sample output is
//! passed through verbatim.
//!
//! Harness flags (`--log`, `--lang`, `--config`, `--version`) are accepted
//! before `run` and after the sample id alike. Sample parameters with those
//! names must be passed after `--` or positionally.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use sample_harness_cli::i18n::Locale;
use sample_harness_cli::i18n::set_locale;
use sample_harness_cli::t;
use sample_harness_config::HarnessConfig;
use sample_harness_core::JsonLineInvocationLog;
use sample_harness_core::SampleDispatcher;
use sample_harness_core::SampleRegistry;
use sample_harness_core::synopsis;
use sample_harness_samples::builtin_registry;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "SAMPLE_HARNESS_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "sample-harness", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `SAMPLE_HARNESS_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Configuration file (overrides `SAMPLE_HARNESS_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Write one JSON invocation record per run to stderr.
    #[arg(long = "log", action = ArgAction::SetTrue, global = true)]
    log: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a sample and print its output.
    Run(RunCommand),
    /// List available samples.
    List(ListCommand),
    /// Show the usage line for a sample.
    Usage(UsageCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for `run`.
///
/// `--log`, `--lang`, `--config`, and `--version` in `args` are taken by the
/// harness unless they follow `--`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Identifier of the sample to run.
    #[arg(value_name = "SAMPLE_ID")]
    sample_id: String,
    /// Positional values and `--name value` flags for the sample.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
struct ListCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    format: ListFormat,
}

/// Arguments for `usage`.
#[derive(Args, Debug)]
struct UsageCommand {
    /// Identifier of the sample to describe.
    #[arg(value_name = "SAMPLE_ID")]
    sample_id: String,
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a sample harness configuration file.
    Validate,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

/// Output formats for `list`.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum ListFormat {
    /// Human-readable lines.
    Text,
    /// JSON array.
    Json,
}

/// JSON view of one listed sample.
#[derive(Debug, Serialize)]
struct SampleListing<'a> {
    /// Sample identifier.
    id: &'a str,
    /// One-line description.
    description: &'a str,
    /// Usage synopsis.
    usage: String,
    /// Declared parameters in binding order.
    parameters: Vec<ParameterListing<'a>>,
}

/// JSON view of one declared parameter.
#[derive(Debug, Serialize)]
struct ParameterListing<'a> {
    /// Parameter name.
    name: &'a str,
    /// True when the parameter has no default.
    required: bool,
    /// Default value when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<&'a str>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let mut cli = Cli::parse();
    peel_global_flags(&mut cli)?;
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config = HarnessConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;

    match command {
        Commands::Run(command) => command_run(&command, &config, cli.log),
        Commands::List(command) => command_list(&command, &config),
        Commands::Usage(command) => command_usage(&command, &config),
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate => command_config_validate(&config),
        },
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Harness Flags
// ============================================================================

/// Moves harness flags written after `run <SAMPLE_ID>` onto the top-level CLI.
///
/// Tokens after `--` are left for the sample. A `--lang` or `--config` with
/// no value is left in place so the sample splitter reports it.
fn peel_global_flags(cli: &mut Cli) -> CliResult<()> {
    let Some(Commands::Run(command)) = cli.command.as_mut() else {
        return Ok(());
    };
    let mut kept = Vec::with_capacity(command.args.len());
    let mut tokens = std::mem::take(&mut command.args).into_iter();
    while let Some(token) = tokens.next() {
        if token == "--" {
            kept.push(token);
            kept.extend(tokens.by_ref());
            break;
        }
        let Some(flag) = token.strip_prefix("--") else {
            kept.push(token);
            continue;
        };
        let (name, inline) = match flag.split_once('=') {
            Some((name, value)) => (name.to_string(), Some(value.to_string())),
            None => (flag.to_string(), None),
        };
        match (name.as_str(), inline) {
            ("log", None) => cli.log = true,
            ("version", None) => cli.show_version = true,
            ("lang" | "config", inline) => {
                let Some(value) = inline.or_else(|| tokens.next()) else {
                    kept.push(token);
                    continue;
                };
                if name == "lang" {
                    cli.lang = Some(parse_lang_flag(&value)?);
                } else {
                    cli.config = Some(PathBuf::from(value));
                }
            }
            _ => kept.push(token),
        }
    }
    command.args = kept;
    Ok(())
}

/// Parses a `--lang` value taken from the `run` arguments.
fn parse_lang_flag(value: &str) -> CliResult<LangArg> {
    LangArg::from_str(value, true)
        .map_err(|_| CliError::new(t!("i18n.lang.invalid_flag", value = value)))
}

// ============================================================================
// SECTION: Sample Commands
// ============================================================================

/// Executes the `run` command.
fn command_run(
    command: &RunCommand,
    config: &HarnessConfig,
    force_log: bool,
) -> CliResult<ExitCode> {
    let dispatcher = build_dispatcher(config, force_log)?;
    let output = dispatcher
        .run_cli(&command.sample_id, &command.args)
        .map_err(|err| CliError::new(t!("run.failed", error = err)))?;
    write_stdout_bytes(output.as_str().as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `list` command.
fn command_list(command: &ListCommand, config: &HarnessConfig) -> CliResult<ExitCode> {
    let registry = build_registry(config)?;
    match command.format {
        ListFormat::Json => {
            let listings: Vec<SampleListing<'_>> = registry
                .entries()
                .map(|(sample_id, sample)| SampleListing {
                    id: sample_id.as_str(),
                    description: sample.description(),
                    usage: synopsis(sample_id.as_str(), sample.spec()),
                    parameters: sample
                        .spec()
                        .params()
                        .iter()
                        .map(|decl| ParameterListing {
                            name: decl.name(),
                            required: decl.is_required(),
                            default: decl.default_value(),
                        })
                        .collect(),
                })
                .collect();
            let json = serde_json::to_string_pretty(&listings)
                .map_err(|err| CliError::new(t!("list.json_failed", error = err)))?;
            write_stdout_line(&json).map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        ListFormat::Text => {
            if registry.is_empty() {
                write_stdout_line(&t!("list.none"))
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
                return Ok(ExitCode::SUCCESS);
            }
            write_stdout_line(&t!("list.header"))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            for (sample_id, sample) in registry.entries() {
                let entry = t!("list.entry", id = sample_id, description = sample.description());
                let usage =
                    t!("list.usage", synopsis = synopsis(sample_id.as_str(), sample.spec()));
                write_stdout_line(&entry)
                    .and_then(|()| write_stdout_line(&usage))
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `usage` command.
fn command_usage(command: &UsageCommand, config: &HarnessConfig) -> CliResult<ExitCode> {
    let dispatcher = SampleDispatcher::new(build_registry(config)?);
    let line = dispatcher
        .usage(&command.sample_id)
        .map_err(|err| CliError::new(t!("usage.failed", error = err)))?;
    write_stdout_line(&t!("usage.line", synopsis = line))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes the config validation command.
fn command_config_validate(config: &HarnessConfig) -> CliResult<ExitCode> {
    let message = config.source.as_deref().map_or_else(
        || t!("config.validate.defaults"),
        |path| t!("config.validate.ok", path = path.display()),
    );
    write_stdout_line(&message).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Harness Setup
// ============================================================================

/// Builds the built-in registry under the configured access policy.
fn build_registry(config: &HarnessConfig) -> CliResult<SampleRegistry> {
    let mut registry = builtin_registry()
        .map_err(|err| CliError::new(t!("registry.init_failed", error = err)))?;
    registry.set_policy(config.access_policy());
    Ok(registry)
}

/// Builds a dispatcher with the configured invocation log.
fn build_dispatcher(config: &HarnessConfig, force_log: bool) -> CliResult<SampleDispatcher> {
    let dispatcher = SampleDispatcher::new(build_registry(config)?);
    if !(force_log || config.logging.enabled) {
        return Ok(dispatcher);
    }
    match config.logging.path.as_deref() {
        Some(path) if !force_log => {
            let file = open_log_file(Path::new(path.trim()))?;
            Ok(dispatcher.with_log(JsonLineInvocationLog::new(file)))
        }
        _ => Ok(dispatcher.with_log(JsonLineInvocationLog::new(std::io::stderr()))),
    }
}

/// Opens the invocation log file for appending.
fn open_log_file(path: &Path) -> CliResult<std::fs::File> {
    OpenOptions::new().create(true).append(true).open(path).map_err(|err| {
        CliError::new(t!("log.open_failed", path = path.display(), error = err))
    })
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Converts CLI language selections into locales.
impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)?;
    stdout.flush()
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
