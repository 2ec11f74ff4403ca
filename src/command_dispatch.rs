//! Purpose: Hold top-level CLI command dispatch for `omittable`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Clap args are turned into config structs before any input is read.
//! Invariants: Helpers in `main.rs` remain the source of command business logic.

use super::*;

pub(super) fn dispatch_command(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    tracing::debug!(?color_mode, "dispatching command");
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "omittable", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Version => {
            emit_version_output();
            Ok(RunOutcome::ok())
        }
        Command::Classify { input, fields } => {
            let config = ClassifyConfig {
                input: InputSource::from_arg(&input),
                fields,
            };
            tracing::debug!(input = %config.input.label(), fields = config.fields.len(), "classify");
            emit_json(&run_classify(config)?);
            Ok(RunOutcome::ok())
        }
        Command::Check { input, expect } => {
            let expectations = expect
                .iter()
                .map(|raw| parse_expectation(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let config = CheckConfig {
                input: InputSource::from_arg(&input),
                expectations,
            };
            tracing::debug!(input = %config.input.label(), checks = config.expectations.len(), "check");
            emit_json(&run_check(config)?);
            Ok(RunOutcome::ok())
        }
        Command::Merge { base, patch } => {
            let config = MergeConfig {
                base: InputSource::from_arg(&base),
                patch: InputSource::from_arg(&patch),
            };
            tracing::debug!(base = %config.base.label(), patch = %config.patch.label(), "merge");
            emit_json(&run_merge(config)?);
            Ok(RunOutcome::ok())
        }
    }
}
