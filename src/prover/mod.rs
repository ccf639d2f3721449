//! Command templates and the prover registry.
//!
//! CommandTemplate -> named, fixed argument sequence with placeholders.
//! Registry -> built once at startup: prover path (PATH discovery or
//! explicit override) plus the immutable template table. A registry built
//! without a prover is disabled and carries no templates at all.
//! submit -> fire-and-forget spawn via tokio::process (result never awaited).
//!
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::process::{Child, Command};

/// Executable the whole surface hinges on.
pub const PROVER_EXE: &str = "gnatprove";

/// Placeholder tokens understood inside template arguments.
/// `%PP` project file, `%fp` current file path, `%f` current file basename,
/// `%l` current line.
const PH_PROJECT: &str = "%PP";
const PH_FILE_PATH: &str = "%fp";
const PH_FILE_BASE: &str = "%f";
const PH_LINE: &str = "%l";

/// A named, pre-filled prover invocation pattern. The argument list is
/// fixed at registry construction and never mutated afterwards; only
/// templates with `accepts_extra_args` take appended arguments at call time.
#[derive(Debug, Clone, Serialize)]
pub struct CommandTemplate {
    pub name: &'static str,
    pub args: &'static [&'static str],
    pub accepts_extra_args: bool,
}

const TEMPLATES: &[CommandTemplate] = &[
    CommandTemplate {
        name: "prove_all",
        args: &["-P%PP", "--mode=prove", "--ide-progress-bar", "-U"],
        accepts_extra_args: false,
    },
    CommandTemplate {
        name: "prove_root_project",
        args: &["-P%PP", "--mode=prove", "--ide-progress-bar"],
        accepts_extra_args: false,
    },
    CommandTemplate {
        name: "prove_file",
        args: &["-P%PP", "--mode=prove", "--ide-progress-bar", "-u", "%fp"],
        accepts_extra_args: false,
    },
    CommandTemplate {
        name: "prove_line",
        args: &["-P%PP", "--mode=prove", "--ide-progress-bar", "--limit-line=%f:%l"],
        accepts_extra_args: false,
    },
    CommandTemplate {
        name: "prove_subp",
        args: &["-P%PP", "--mode=prove", "--ide-progress-bar"],
        accepts_extra_args: true,
    },
    CommandTemplate {
        name: "show_unprovable_code",
        args: &["-P%PP", "--mode=detect", "-f"],
        accepts_extra_args: false,
    },
];

/// Per-call values substituted into template placeholders.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    pub project: Option<PathBuf>,
    pub file: Option<PathBuf>,
    pub line: Option<u32>,
}

impl Expansion {
    pub fn for_project(project: impl Into<PathBuf>) -> Self {
        Self {
            project: Some(project.into()),
            ..Self::default()
        }
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    fn expand_token(&self, token: &str) -> Result<String> {
        let mut out = token.to_string();
        if out.contains(PH_PROJECT) {
            let project = self
                .project
                .as_ref()
                .context("no project file available for this invocation")?;
            out = out.replace(PH_PROJECT, &project.to_string_lossy());
        }
        // %fp before %f: the shorter placeholder is a prefix of the longer.
        if out.contains(PH_FILE_PATH) {
            let file = self
                .file
                .as_ref()
                .context("no current file available for this invocation")?;
            out = out.replace(PH_FILE_PATH, &file.to_string_lossy());
        }
        if out.contains(PH_FILE_BASE) {
            let file = self
                .file
                .as_ref()
                .context("no current file available for this invocation")?;
            out = out.replace(PH_FILE_BASE, &crate::context::basename(file));
        }
        if out.contains(PH_LINE) {
            let line = self
                .line
                .context("no current line available for this invocation")?;
            out = out.replace(PH_LINE, &line.to_string());
        }
        Ok(out)
    }
}

/// A fully-resolved prover invocation, ready to hand to the host runner.
#[derive(Debug, Clone, Serialize)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub template: &'static str,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = vec![self.program.to_string_lossy().into_owned()];
        tokens.extend(self.args.iter().cloned());
        f.write_str(&shell_words::join(tokens))
    }
}

/// Immutable startup product: prover location plus the template table.
///
/// Built exactly once and passed into the dispatcher; there is no
/// module-level mutable state. When the prover is not discoverable the
/// registry is disabled and exposes no templates (absence, not error).
#[derive(Debug, Clone)]
pub struct Registry {
    prover: Option<PathBuf>,
    templates: BTreeMap<&'static str, CommandTemplate>,
}

impl Registry {
    /// Locate the prover on the running process's search path. An absent
    /// prover yields a disabled registry, silently.
    pub fn discover() -> Self {
        Self::build(which::which(PROVER_EXE).ok())
    }

    /// Build with an explicit prover path (bypasses PATH discovery).
    pub fn with_prover(path: impl Into<PathBuf>) -> Self {
        Self::build(Some(path.into()))
    }

    pub(crate) fn build(prover: Option<PathBuf>) -> Self {
        let templates = if prover.is_some() {
            TEMPLATES.iter().map(|t| (t.name, t.clone())).collect()
        } else {
            BTreeMap::new()
        };
        Self { prover, templates }
    }

    pub fn enabled(&self) -> bool {
        self.prover.is_some()
    }

    pub fn prover(&self) -> Option<&Path> {
        self.prover.as_deref()
    }

    pub fn template(&self, name: &str) -> Option<&CommandTemplate> {
        self.templates.get(name)
    }

    pub fn templates(&self) -> impl Iterator<Item = &CommandTemplate> {
        self.templates.values()
    }

    /// Resolve a template into a concrete invocation: expand placeholders
    /// over the per-call context and append extra arguments where the
    /// template allows them.
    pub fn build_invocation(
        &self,
        name: &str,
        expansion: &Expansion,
        extra_args: &[String],
    ) -> Result<Invocation> {
        let Some(prover) = &self.prover else {
            bail!("{PROVER_EXE} not found on PATH; proof actions are unavailable");
        };
        let template = self
            .template(name)
            .with_context(|| format!("unknown command template: {name}"))?;
        if !extra_args.is_empty() && !template.accepts_extra_args {
            bail!("template '{}' does not accept extra arguments", template.name);
        }
        let mut args = Vec::with_capacity(template.args.len() + extra_args.len());
        for token in template.args {
            args.push(expansion.expand_token(token)?);
        }
        args.extend_from_slice(extra_args);
        Ok(Invocation {
            program: prover.clone(),
            args,
            template: template.name,
        })
    }
}

/// Hand an invocation to the process runner, fire-and-forget.
///
/// The child inherits stdout/stderr (progress and diagnostics go straight to
/// the host), and the handle is returned without being awaited. Completion,
/// failure and cancellation are entirely the runner's and tool's business.
pub async fn submit(invocation: &Invocation) -> Result<Child> {
    Command::new(&invocation.program)
        .args(&invocation.args)
        .spawn()
        .with_context(|| format!("failed to spawn {}", invocation.program.display()))
}

/* --------------------------------- Tests ---------------------------------- */
