/*!
`registry.rs`

Implements the `registry` subcommand: dump the registration surface a host
IDE consumes at startup — prover availability, the six command templates,
the switch panels, and the menu layout.

When the prover is not discoverable the whole surface is absent: templates
and menu serialize as empty collections and nothing is treated as an error.
That absence IS the availability gate.

JSON Output Shape:
{
  "status": "ok",
  "enabled": true,
  "prover": "/usr/bin/gnatprove",
  "templates": [ { "name": "...", "args": [...], "accepts_extra_args": false } ],
  "panels": [ ...switch panels... ],
  "menu": [ { "title": "...", "template": "...", "placement": "...", ... } ]
}
*/

use anyhow::Result;
use clap::Args;

use crate::cmd::format::{Role, StyleOptions, TableOpts, box_header, color, emoji, table};
use crate::cmd::shared::build_registry;
use crate::prover::Registry;
use crate::switches::{self, MenuPlacement, SwitchPanel};

#[derive(Args, Debug)]
pub struct RegistryArgs {
    /// Explicit prover executable (skips PATH discovery)
    #[arg(long, value_name = "PATH")]
    pub prover: Option<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Output YAML (for host-side tooling)
    #[arg(long)]
    pub yaml: bool,
}

/// Entry point for the registry subcommand.
pub fn execute_registry(args: RegistryArgs) -> Result<()> {
    let registry = build_registry(args.prover.as_deref());

    let (panels, menu) = surface(&registry);

    if args.json || args.yaml {
        let doc = serde_json::json!({
            "status": "ok",
            "enabled": registry.enabled(),
            "prover": registry.prover(),
            "templates": registry.templates().collect::<Vec<_>>(),
            "panels": panels,
            "menu": menu,
        });
        if args.yaml {
            print!("{}", serde_yaml::to_string(&doc)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        return Ok(());
    }

    print_human(&registry, &panels);
    Ok(())
}

/// The registration surface for a given registry: everything when the
/// prover was found, nothing at all when it was not.
fn surface(registry: &Registry) -> (Vec<SwitchPanel>, Vec<switches::MenuEntry>) {
    if !registry.enabled() {
        return (Vec::new(), Vec::new());
    }
    (
        vec![
            switches::prover_panel(),
            switches::prove_model_panel(),
            switches::detect_model_panel(),
        ],
        switches::menu_entries(),
    )
}

fn print_human(registry: &Registry, panels: &[SwitchPanel]) {
    let style = StyleOptions::detect();

    if !registry.enabled() {
        println!(
            "{}",
            box_header(
                format!("{} Proof surface disabled", emoji("warn", &style)),
                Some("gnatprove not found on PATH"),
                &style,
            )
        );
        return;
    }

    let prover = registry
        .prover()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    println!(
        "{}",
        box_header(
            format!(
                "{} Templates ({})",
                emoji("prove", &style),
                registry.templates().count()
            ),
            Some(format!("prover={prover}")),
            &style,
        )
    );

    let rows: Vec<Vec<String>> = registry
        .templates()
        .map(|t| {
            vec![
                t.name.to_string(),
                t.args.join(" "),
                if t.accepts_extra_args { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        table(&["NAME", "ARGS", "EXTRA"], &rows, TableOpts::default(), &style)
    );

    println!();
    println!("{}", color(Role::Accent, "Menu:", &style));
    let menu_rows: Vec<Vec<String>> = switches::menu_entries()
        .iter()
        .map(|e| {
            vec![
                match e.placement {
                    MenuPlacement::Menu => "menu".to_string(),
                    MenuPlacement::Contextual => "contextual".to_string(),
                },
                e.title.to_string(),
                e.template.to_string(),
                if e.subprogram_filter {
                    "subprogram only"
                } else {
                    ""
                }
                .to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        table(
            &["WHERE", "TITLE", "TEMPLATE", "FILTER"],
            &menu_rows,
            TableOpts::default(),
            &style
        )
    );

    println!();
    println!("{}", color(Role::Accent, "Switch panels:", &style));
    for panel in panels {
        let switch_rows: Vec<Vec<String>> = panel
            .switches
            .iter()
            .map(|s| {
                let (kind, flag) = match &s.kind {
                    crate::switches::SwitchKind::Check { switch } => ("check", switch.to_string()),
                    crate::switches::SwitchKind::Spin {
                        switch,
                        default,
                        min,
                        max,
                    } => ("spin", format!("{switch} [{min}..{max}] default {default}")),
                    crate::switches::SwitchKind::Combo {
                        switch,
                        separator,
                        default,
                        entries,
                    } => {
                        let values: Vec<&str> = entries.iter().map(|e| e.value).collect();
                        (
                            "combo",
                            format!("{switch}{separator}({}) default {default}", values.join("|")),
                        )
                    }
                };
                vec![s.label.to_string(), kind.to_string(), flag]
            })
            .collect();
        println!("{}", color(Role::Secondary, format!("[{}]", panel.name), &style));
        println!(
            "{}",
            table(&["LABEL", "KIND", "SWITCH"], &switch_rows, TableOpts::default(), &style)
        );
        println!();
    }
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_registry_dumps_full_surface() {
        let args = RegistryArgs {
            prover: Some("/opt/spark/bin/gnatprove".into()),
            json: true,
            yaml: false,
        };
        execute_registry(args).unwrap();
    }

    #[test]
    fn disabled_surface_is_empty_not_an_error() {
        let registry = Registry::build(None);
        let (panels, menu) = surface(&registry);
        assert!(panels.is_empty());
        assert!(menu.is_empty());
        assert_eq!(registry.templates().count(), 0);
    }

    #[test]
    fn enabled_surface_has_panels_and_menu() {
        let registry = Registry::with_prover("/opt/spark/bin/gnatprove");
        let (panels, menu) = surface(&registry);
        assert_eq!(panels.len(), 3);
        assert_eq!(menu.len(), 7);
    }
}
