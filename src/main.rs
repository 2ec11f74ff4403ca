//! Purpose: `omittable` CLI entry point; inspects and merges three-state JSON fields.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Commands emit JSON on stdout (pretty on a TTY, compact otherwise).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Logs go to stderr through `tracing`, filtered by `RUST_LOG`.
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use omittable::api::{
    Error, ErrorKind, ExpectedType, check_field, classification_json, classify_fields,
    merge_patch, module_version, to_exit_code,
};
use omittable::json::parse;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod command_dispatch;

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                let message = clap_error_summary(&err);
                let hint = clap_error_hint(&err);
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(message)
                        .with_hint(hint),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    command_dispatch::dispatch_command(cli.command, color_mode)
        .map_err(add_io_hint)
        .map_err(add_internal_hint)
        .map_err(|err| (err, color_mode))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "omittable",
    version,
    about = "Inspect and merge three-state JSON fields (absent, null, present)",
    long_about = None,
    before_help = r#"A field is absent when its key is missing, null when it is set to null,
and present when it carries any other value."#,
    after_help = r#"EXAMPLES
  $ echo '{"name":"x","count":null}' | omittable classify --field name --field count --field tags
  # {"fields":{"count":"null","name":"present","tags":"absent"}}
  $ omittable check --expect count=integer request.json
  $ omittable merge current.json patch.json

  $ omittable <command> --help"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Report whether fields are absent, null, or present",
        after_help = r#"EXAMPLES
  $ omittable classify request.json --field count
  $ cat request.json | omittable classify          # every key in the object"#
    )]
    Classify {
        #[arg(default_value = "-", help = "JSON object file, or - for stdin")]
        input: String,
        #[arg(
            long = "field",
            short = 'f',
            help = "Field to classify (repeatable); defaults to every key"
        )]
        fields: Vec<String>,
    },
    #[command(
        about = "Decode fields as typed payloads and fail on type mismatches",
        long_about = r#"Decode fields as typed payloads.

Absent and null fields always pass. A present field whose value does not decode
as the expected type fails with a decode error (exit code 3)."#,
        after_help = r#"EXAMPLES
  $ omittable check --expect count=integer --expect name=string request.json

TYPES
  string, integer, number, bool, array, object"#
    )]
    Check {
        #[arg(default_value = "-", help = "JSON object file, or - for stdin")]
        input: String,
        #[arg(
            long = "expect",
            short = 'e',
            required = true,
            value_name = "NAME=TYPE",
            help = "Field and expected payload type (repeatable)"
        )]
        expect: Vec<String>,
    },
    #[command(
        about = "Apply a merge patch: missing keys keep, null deletes, values replace",
        after_help = r#"EXAMPLES
  $ omittable merge current.json patch.json
  $ echo '{"title":null}' | omittable merge current.json -"#
    )]
    Merge {
        #[arg(help = "Base JSON document, or - for stdin")]
        base: String,
        #[arg(help = "Patch JSON document, or - for stdin")]
        patch: String,
    },
    #[command(about = "Print version metadata as JSON")]
    Version,
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ omittable completion bash > ~/.local/share/bash-completion/completions/omittable
  $ omittable completion zsh > ~/.zfunc/_omittable"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum InputSource {
    Stdin,
    Path(PathBuf),
}

impl InputSource {
    fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else {
            InputSource::Path(PathBuf::from(arg))
        }
    }

    fn label(&self) -> String {
        match self {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::Path(path) => path.display().to_string(),
        }
    }
}

#[derive(Clone, Debug)]
struct ClassifyConfig {
    input: InputSource,
    fields: Vec<String>,
}

#[derive(Clone, Debug)]
struct CheckConfig {
    input: InputSource,
    expectations: Vec<(String, ExpectedType)>,
}

#[derive(Clone, Debug)]
struct MergeConfig {
    base: InputSource,
    patch: InputSource,
}

fn parse_expectation(input: &str) -> Result<(String, ExpectedType), Error> {
    let Some((name, ty)) = input.rsplit_once('=') else {
        return Err(Error::new(ErrorKind::Usage)
            .with_message(format!("invalid expectation `{input}`"))
            .with_hint("Use NAME=TYPE, for example `--expect count=integer`."));
    };
    if name.is_empty() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message(format!("invalid expectation `{input}`: empty field name"))
            .with_hint("Use NAME=TYPE, for example `--expect count=integer`."));
    }
    let expected = ExpectedType::parse(ty).ok_or_else(|| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("unknown type `{ty}`"))
            .with_hint("Supported types: string, integer, number, bool, array, object.")
    })?;
    Ok((name.to_string(), expected))
}

fn read_input(source: &InputSource) -> Result<String, Error> {
    match source {
        InputSource::Stdin => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            Ok(text)
        }
        InputSource::Path(path) => std::fs::read_to_string(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read input file")
                .with_path(path)
                .with_source(err)
        }),
    }
}

fn read_document(source: &InputSource) -> Result<Value, Error> {
    let text = read_input(source)?;
    parse::from_str::<Value>(&text).map_err(|err| {
        let hint = parse::hint_for_error(&err, &source.label());
        let err = Error::new(ErrorKind::Usage)
            .with_message("invalid json")
            .with_hint(hint)
            .with_source(err);
        match source {
            InputSource::Path(path) => err.with_path(path),
            InputSource::Stdin => err,
        }
    })
}

fn read_object(source: &InputSource) -> Result<Map<String, Value>, Error> {
    match read_document(source)? {
        Value::Object(map) => Ok(map),
        other => {
            let err = Error::new(ErrorKind::Usage)
                .with_message(format!("expected a JSON object, got {}", json_type_name(&other)))
                .with_hint("Field states only exist on objects; pass a single JSON object.");
            Err(match source {
                InputSource::Path(path) => err.with_path(path),
                InputSource::Stdin => err,
            })
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn run_classify(config: ClassifyConfig) -> Result<Value, Error> {
    let object = read_object(&config.input)?;
    let statuses = classify_fields(&object, &config.fields)?;
    Ok(classification_json(&statuses))
}

fn run_check(config: CheckConfig) -> Result<Value, Error> {
    let object = read_object(&config.input)?;
    let mut statuses = Vec::with_capacity(config.expectations.len());
    for (name, expected) in &config.expectations {
        statuses.push(check_field(&object, name, *expected)?);
    }
    Ok(classification_json(&statuses))
}

fn run_merge(config: MergeConfig) -> Result<Value, Error> {
    if config.base == InputSource::Stdin && config.patch == InputSource::Stdin {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("base and patch cannot both read stdin")
            .with_hint("Pass at least one of BASE or PATCH as a file path."));
    }
    let mut base = read_document(&config.base)?;
    let patch = read_document(&config.patch)?;
    merge_patch(&mut base, &patch)?;
    Ok(base)
}

fn emit_json(value: &Value) {
    let encoded = if io::stdout().is_terminal() {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    let json = encoded.unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn emit_version_output() {
    emit_json(&module_version().to_json());
}

fn add_io_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Io || err.hint().is_some() {
        return err;
    }
    err.with_hint("I/O error. Check the path and that the file is readable.")
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint(
        "Unexpected internal failure. Retry with RUST_LOG=debug and share command/context if it persists.",
    )
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Encode => "failed to encode value".to_string(),
        ErrorKind::Decode => "failed to decode value".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(field) = err.field() {
        inner.insert("field".to_string(), json!(field));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(field) = err.field() {
        lines.push(format!(
            "{} {field}",
            colorize_label("field:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let usage = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .map(str::trim);

    let Some(usage) = usage else {
        return "Try `omittable --help`.".to_string();
    };

    let tokens: Vec<&str> = usage.split_whitespace().collect();
    let Some(pos) = tokens.iter().position(|t| *t == "omittable") else {
        return "Try `omittable --help`.".to_string();
    };

    let mut parts = Vec::new();
    for token in tokens.iter().skip(pos + 1) {
        if token.starts_with('-') || token.starts_with('<') || token.starts_with('[') {
            break;
        }
        parts.push(*token);
    }

    if parts.is_empty() {
        return "Try `omittable --help`.".to_string();
    }
    format!("Try `omittable {} --help`.", parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::{InputSource, error_json, error_text, parse_expectation};
    use omittable::api::{Error, ErrorKind, ExpectedType};
    use std::path::PathBuf;

    #[test]
    fn parse_expectation_splits_on_last_equals() {
        let (name, ty) = parse_expectation("a=b=integer").expect("parse");
        assert_eq!(name, "a=b");
        assert_eq!(ty, ExpectedType::Integer);
    }

    #[test]
    fn parse_expectation_rejects_bad_input() {
        for input in ["count", "=integer", "count=float"] {
            let err = parse_expectation(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Usage, "input: {input}");
            assert!(err.hint().is_some());
        }
    }

    #[test]
    fn input_source_dash_is_stdin() {
        assert_eq!(InputSource::from_arg("-"), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg("a.json"),
            InputSource::Path(PathBuf::from("a.json"))
        );
    }

    #[test]
    fn error_json_includes_field() {
        let err = Error::new(ErrorKind::Decode)
            .with_message("field value does not match the expected type")
            .with_field("count");
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], "Decode");
        assert_eq!(value["error"]["field"], "count");
    }

    #[test]
    fn error_text_respects_color_flag() {
        let err = Error::new(ErrorKind::Decode)
            .with_message("field value does not match the expected type")
            .with_field("count");
        let colored = error_text(&err, true);
        let plain = error_text(&err, false);
        assert!(colored.contains("\u{1b}[31merror:\u{1b}[0m"));
        assert!(colored.contains("\u{1b}[33mfield:\u{1b}[0m count"));
        assert!(plain.contains("error: field value does not match the expected type"));
        assert!(plain.lines().any(|line| line == "field: count"));
        assert!(!plain.contains("\u{1b}["));
    }
}
