/*!
shared.rs - shared helpers for subcommands.

Focus:
  - resolve_project: -P/--project flag > PROVE_PROJECT env
  - build_registry: PATH discovery or --prover override
  - load_selection_file: JSON/YAML selection object for --context-file
  - parse_loc / split_extra_args: small flag parsers
  - run_invocation: dry-run print or fire-and-forget submit (sync wrapper)
  - output_error: dual-mode (JSON / boxed human) error reporting
*/

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use crate::cmd::format::{Role, StyleOptions, box_header, color, emoji};
use crate::context::{Selection, SourceLocation};
use crate::prover::{Invocation, Registry};
use crate::{log_debug, log_info};

/// Environment fallback for the project file when -P/--project is omitted.
pub const PROJECT_ENV: &str = "PROVE_PROJECT";

/// Resolve the project file: CLI flag wins, then the PROVE_PROJECT env var.
pub fn resolve_project(flag: Option<&str>) -> Result<PathBuf> {
    if let Some(p) = flag
        && !p.trim().is_empty()
    {
        return Ok(PathBuf::from(p.trim()));
    }
    if let Ok(env_p) = std::env::var(PROJECT_ENV)
        && !env_p.trim().is_empty()
    {
        return Ok(PathBuf::from(env_p.trim()));
    }
    bail!("no project file specified (use --project or {PROJECT_ENV})")
}

/// Build the registry once per invocation. An explicit --prover path skips
/// PATH discovery entirely.
pub fn build_registry(prover_override: Option<&str>) -> Registry {
    match prover_override {
        Some(p) if !p.trim().is_empty() => Registry::with_prover(p.trim()),
        _ => Registry::discover(),
    }
}

/// Parse a `FILE:LINE` flag value into a source location.
pub fn parse_loc(raw: &str) -> Result<SourceLocation> {
    let Some((file, line)) = raw.rsplit_once(':') else {
        bail!("expected FILE:LINE, got '{raw}'");
    };
    let line: u32 = line
        .parse()
        .with_context(|| format!("invalid line number in '{raw}'"))?;
    if file.is_empty() {
        bail!("empty file name in '{raw}'");
    }
    Ok(SourceLocation::new(file, line))
}

/// Shell-split an `--extra-args` string into individual tokens.
pub fn split_extra_args(raw: Option<&str>) -> Result<Vec<String>> {
    match raw {
        Some(s) if !s.trim().is_empty() => {
            shell_words::split(s).context("failed to parse --extra-args (shell splitting)")
        }
        _ => Ok(Vec::new()),
    }
}

/// Load a selection object from a JSON or YAML file (extension decides;
/// anything not .yaml/.yml is treated as JSON).
pub fn load_selection_file(path: &str) -> Result<Selection> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read context file: {path}"))?;
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        serde_yaml::from_str(&raw).context("failed to parse YAML context file")
    } else {
        serde_json::from_str(&raw).context("failed to parse JSON context file")
    }
}

/// Run (or just display) a resolved invocation.
///
/// Dry-run prints the command and stops. Otherwise a runtime is built for
/// this one call and the prover is spawned fire-and-forget: the child handle
/// is dropped without being awaited, matching the host runner's contract.
pub fn run_invocation(invocation: &Invocation, dry_run: bool, json: bool) -> Result<()> {
    if dry_run {
        log_debug!("dry-run, not spawning: {}", invocation);
        print_invocation(invocation, "dry-run", json);
        return Ok(());
    }

    let rt = tokio::runtime::Runtime::new().context("failed to create Tokio runtime")?;
    let child = rt.block_on(crate::prover::submit(invocation))?;
    log_info!(
        "submitted template '{}' (pid {:?})",
        invocation.template,
        child.id()
    );
    // Deliberately not awaited: completion and output belong to the runner.
    drop(child);
    print_invocation(invocation, "submitted", json);
    Ok(())
}

fn print_invocation(invocation: &Invocation, status: &str, json: bool) {
    if json {
        let v = serde_json::json!({
            "status": status,
            "template": invocation.template,
            "program": invocation.program,
            "args": invocation.args,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&v).unwrap_or_else(|_| v.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let tag = if status == "dry-run" { "info" } else { "rocket" };
        println!(
            "{} {} {}",
            emoji(tag, &style),
            color(Role::Success, status, &style),
            invocation
        );
    }
}

/// Print an error in the requested mode, then propagate it.
pub fn output_error(json: bool, msg: &str) -> Result<()> {
    if json {
        let err = serde_json::json!({"status":"error","error":msg});
        println!(
            "{}",
            serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        let title = format!("{} Prove Error", emoji("error", &style));
        let subtitle = color(Role::Error, msg, &style);
        println!("{}", box_header(title, Some(subtitle), &style));
    }
    anyhow::bail!(msg.to_string())
}

/* ---- Tests (basic) ---- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{SubpContext, classify};

    #[test]
    fn parse_loc_ok() {
        let loc = parse_loc("src/foo.adb:42").unwrap();
        assert_eq!(loc.line, 42);
        assert_eq!(loc.label(), "foo.adb:42");
    }

    #[test]
    fn parse_loc_rejects_garbage() {
        assert!(parse_loc("no-colon").is_err());
        assert!(parse_loc("foo.adb:abc").is_err());
        assert!(parse_loc(":12").is_err());
    }

    #[test]
    fn split_extra_args_quoted() {
        let args = split_extra_args(Some(r#"--report=all --why3-conf "/tmp/my conf""#)).unwrap();
        assert_eq!(args, vec!["--report=all", "--why3-conf", "/tmp/my conf"]);
    }

    #[test]
    fn split_extra_args_empty() {
        assert!(split_extra_args(None).unwrap().is_empty());
        assert!(split_extra_args(Some("   ")).unwrap().is_empty());
    }

    #[test]
    fn selection_file_json_roundtrip() {
        let path = std::env::temp_dir().join("prove_dispatch_ctx_test.json");
        // Using a file in the system temp directory instead of the `tempfile` crate.
        std::fs::write(
            &path,
            r#"{
                "kind": "entity",
                "entity": {
                    "name": "Swap",
                    "category": "subprogram",
                    "declaration": {"file": "swap.ads", "line": 4}
                },
                "location": {"file": "swap.ads", "line": 4}
            }"#,
        )
        .unwrap();
        let sel = load_selection_file(path.to_str().unwrap()).unwrap();
        assert_eq!(classify(&sel), SubpContext::Declaration);
    }

    #[test]
    fn resolve_project_prefers_flag() {
        let p = resolve_project(Some("demo.gpr")).unwrap();
        assert_eq!(p, PathBuf::from("demo.gpr"));
    }
}
