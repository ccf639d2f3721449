/*!
`prove.rs`

Implements the `prove` subcommand: the five proof actions (all / root /
file / line / subp) against the current editor context.

Context sources:
  --file / --line                    current cursor position
  --entity-name / --category /
  --decl FILE:LINE / --body FILE:LINE  selected-entity metadata (subp scope)
  --context-file selection.(json|yaml) whole selection object; individual
                                       flags override file entries

Scope behavior:
  all   whole project closure (no context needed)
  root  root project only (no context needed)
  line  appends --limit-line=<basename>:<line> via the template
  subp  classifier-gated; injects --limit-subp=<decl basename>:<line>

The subp scope is the only one whose template accepts extra arguments, and
the only one where an argument is computed at call time.
*/

use anyhow::Result;
use clap::Args;

use super::scope::Scope;
use crate::cmd::shared::{
    build_registry, load_selection_file, output_error, parse_loc, resolve_project,
    run_invocation, split_extra_args,
};
use crate::context::{Entity, EntityCategory, Selection, SourceLocation, classify};
use crate::log_debug;
use crate::prover::Expansion;

#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Analysis scope (all|root|file|line|subp)
    pub scope: Scope,

    /// Project file (falls back to PROVE_PROJECT env)
    #[arg(short = 'P', long, value_name = "GPR")]
    pub project: Option<String>,

    /// Current file
    #[arg(long, value_name = "PATH")]
    pub file: Option<String>,

    /// Current line (1-based)
    #[arg(long, value_name = "N")]
    pub line: Option<u32>,

    /// Selected entity name (subp scope)
    #[arg(long = "entity-name", value_name = "NAME")]
    pub entity_name: Option<String>,

    /// Selected entity category (subprogram|package|type|object)
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Entity declaration location (subp scope)
    #[arg(long, value_name = "FILE:LINE")]
    pub decl: Option<String>,

    /// Entity body location (subp scope)
    #[arg(long, value_name = "FILE:LINE")]
    pub body: Option<String>,

    /// Selection object file (JSON or YAML); flags override its entries
    #[arg(long = "context-file", value_name = "PATH")]
    pub context_file: Option<String>,

    /// Explicit prover executable (skips PATH discovery)
    #[arg(long, value_name = "PATH")]
    pub prover: Option<String>,

    /// Extra prover switches, shell-quoted (only the subp template takes them)
    #[arg(long = "extra-args", value_name = "STRING")]
    pub extra_args: Option<String>,

    /// Print the resolved command instead of spawning it
    #[arg(long)]
    pub dry_run: bool,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

/// Entry point for the prove subcommand.
pub fn execute_prove(args: ProveArgs) -> Result<()> {
    let project = match resolve_project(args.project.as_deref()) {
        Ok(p) => p,
        Err(e) => return output_error(args.json, &e.to_string()),
    };

    let registry = build_registry(args.prover.as_deref());
    if !registry.enabled() {
        return output_error(
            args.json,
            "gnatprove not found on PATH; proof actions are unavailable",
        );
    }

    let selection = match build_selection(&args) {
        Ok(s) => s,
        Err(e) => return output_error(args.json, &e.to_string()),
    };
    log_debug!("scope={} selection: {}", args.scope, selection);

    let mut extra = match split_extra_args(args.extra_args.as_deref()) {
        Ok(v) => v,
        Err(e) => return output_error(args.json, &e.to_string()),
    };

    // Per-scope context gate. In the IDE these actions are simply withheld
    // when the context does not fit; here the gate reports why.
    if args.scope.needs_file() && selection.file().is_none() {
        return output_error(args.json, &format!("scope '{}' needs --file", args.scope));
    }
    if args.scope.needs_line() && selection.line().is_none() {
        return output_error(args.json, &format!("scope '{}' needs --line", args.scope));
    }

    let mut expansion = Expansion::for_project(project);
    if let Some(file) = selection.file() {
        expansion = expansion.with_file(file);
    }
    if let Some(line) = selection.line() {
        expansion = expansion.with_line(line);
    }

    if args.scope == Scope::Subp {
        if !classify(&selection).accepted() {
            return output_error(
                args.json,
                "cursor is not on a subprogram declaration or body",
            );
        }
        // The subp template carries no scope-limiting switch of its own: the
        // location is only known here, so the argument is injected at call
        // time and never appears in the template's editable switch panel.
        if let Some(loc) = subp_location(&selection) {
            extra.push(format!("--limit-subp={}", loc.label()));
        }
    }

    let invocation =
        match registry.build_invocation(args.scope.template_name(), &expansion, &extra) {
            Ok(inv) => inv,
            Err(e) => return output_error(args.json, &e.to_string()),
        };

    run_invocation(&invocation, args.dry_run, args.json)
}

/// The location named by --limit-subp: the entity's declaration, falling
/// back to the body only when no declaration is known. The classifier has
/// already accepted the selection, so at least one of the two exists.
fn subp_location(selection: &Selection) -> Option<SourceLocation> {
    let Selection::Entity { entity, .. } = selection else {
        return None;
    };
    entity.declaration.clone().or_else(|| entity.body.clone())
}

/// Assemble the selection from the context file (if any) with individual
/// flags overriding its fields, then pick the most specific variant the
/// available pieces support.
fn build_selection(args: &ProveArgs) -> Result<Selection> {
    let base = match &args.context_file {
        Some(path) => Some(load_selection_file(path)?),
        None => None,
    };

    let mut file = args.file.clone();
    let mut line = args.line;
    let mut entity: Option<Entity> = None;

    if let Some(sel) = &base {
        if file.is_none() {
            file = sel.file().map(|p| p.to_string_lossy().into_owned());
        }
        if line.is_none() {
            line = sel.line();
        }
        if let Selection::Entity { entity: e, .. } = sel {
            entity = Some(e.clone());
        }
    }

    let flags_describe_entity = args.entity_name.is_some()
        || args.category.is_some()
        || args.decl.is_some()
        || args.body.is_some();
    if flags_describe_entity {
        let mut e = entity.unwrap_or(Entity {
            name: String::new(),
            category: EntityCategory::Other,
            declaration: None,
            body: None,
        });
        if let Some(name) = &args.entity_name {
            e.name = name.clone();
        }
        if let Some(cat) = &args.category {
            e.category = EntityCategory::from_str_ci(cat);
        }
        if let Some(decl) = &args.decl {
            e.declaration = Some(parse_loc(decl)?);
        }
        if let Some(body) = &args.body {
            e.body = Some(parse_loc(body)?);
        }
        entity = Some(e);
    }

    Ok(match (entity, file, line) {
        (Some(entity), Some(file), Some(line)) => Selection::Entity {
            entity,
            location: SourceLocation::new(file, line),
        },
        (_, Some(file), Some(line)) => Selection::FileLine {
            file: file.into(),
            line,
        },
        (_, Some(file), None) => Selection::File { file: file.into() },
        _ => Selection::None,
    })
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SubpContext;

    fn base_args(scope: Scope) -> ProveArgs {
        ProveArgs {
            scope,
            project: Some("demo.gpr".into()),
            file: None,
            line: None,
            entity_name: None,
            category: None,
            decl: None,
            body: None,
            context_file: None,
            prover: Some("/opt/spark/bin/gnatprove".into()),
            extra_args: None,
            dry_run: true,
            json: true,
        }
    }

    #[test]
    fn selection_from_flags_file_line() {
        let mut args = base_args(Scope::Line);
        args.file = Some("pkg.adb".into());
        args.line = Some(10);
        let sel = build_selection(&args).unwrap();
        assert!(matches!(sel, Selection::FileLine { line: 10, .. }));
    }

    #[test]
    fn selection_entity_from_flags() {
        let mut args = base_args(Scope::Subp);
        args.file = Some("foo.ads".into());
        args.line = Some(42);
        args.entity_name = Some("Swap".into());
        args.category = Some("subprogram".into());
        args.decl = Some("foo.ads:42".into());
        let sel = build_selection(&args).unwrap();
        assert_eq!(classify(&sel), SubpContext::Declaration);
    }

    #[test]
    fn subp_location_prefers_declaration() {
        let sel = Selection::Entity {
            entity: Entity {
                name: "Swap".into(),
                category: EntityCategory::Subprogram,
                declaration: Some(SourceLocation::new("/src/foo.ads", 42)),
                body: Some(SourceLocation::new("/src/foo.adb", 80)),
            },
            location: SourceLocation::new("/src/foo.adb", 80),
        };
        assert_eq!(classify(&sel), SubpContext::Body);
        let loc = subp_location(&sel).unwrap();
        assert_eq!(loc.label(), "foo.ads:42");
    }

    #[test]
    fn dispatch_line_scope_argv() {
        let mut args = base_args(Scope::Line);
        args.file = Some("pkg.adb".into());
        args.line = Some(10);
        // dry-run + explicit prover: no PATH lookup, no spawn
        execute_prove(args).unwrap();
    }

    #[test]
    fn dispatch_subp_requires_classifier_acceptance() {
        let mut args = base_args(Scope::Subp);
        args.file = Some("foo.adb".into());
        args.line = Some(5);
        // entity metadata missing -> classifier says Neither -> error path
        let err = execute_prove(args).unwrap_err();
        assert!(err.to_string().contains("not on a subprogram"));
    }

    #[test]
    fn dispatch_file_scope_needs_file() {
        let args = base_args(Scope::File);
        let err = execute_prove(args).unwrap_err();
        assert!(err.to_string().contains("needs --file"));
    }
}
