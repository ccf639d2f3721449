//! Registration-time configuration surface.
//!
//! Declarative descriptors the host IDE consumes at startup: per-switch
//! metadata (label, literal flag, kind, layout column), the switch panels
//! for the prover tool and its two launch models, and the menu surface
//! (top-level + contextual entries).
//!
//! Everything here is static data built once; nothing is mutated after
//! construction.

use serde::Serialize;

/// Kind of a configurable switch, with the knobs each kind needs.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwitchKind {
    /// On/off toggle mapping to a literal flag when enabled.
    Check { switch: &'static str },
    /// Numeric spinner; the flag is emitted as `<switch><value>`.
    Spin {
        switch: &'static str,
        default: u32,
        min: u32,
        max: u32,
    },
    /// Labeled single-choice list; the flag is `<switch><separator><value>`.
    Combo {
        switch: &'static str,
        separator: &'static str,
        default: &'static str,
        entries: &'static [ComboEntry],
    },
}

/// One selectable value of a combo switch.
#[derive(Debug, Clone, Serialize)]
pub struct ComboEntry {
    pub label: &'static str,
    pub value: &'static str,
    pub tip: &'static str,
}

/// A single switch as shown in a configuration panel.
#[derive(Debug, Clone, Serialize)]
pub struct Switch {
    pub label: &'static str,
    pub tip: &'static str,
    /// 1-based layout column within the panel.
    pub column: u8,
    /// Force-shown switches are always visible to the user, even when the
    /// panel collapses optional entries.
    pub always_shown: bool,
    #[serde(flatten)]
    pub kind: SwitchKind,
}

/// A titled, column-laid-out group of switches for one tool or launch model.
#[derive(Debug, Clone, Serialize)]
pub struct SwitchPanel {
    pub name: &'static str,
    pub titles: &'static [&'static str],
    pub columns: u8,
    pub lines: u8,
    pub switches: Vec<Switch>,
}

const REPORT_ENTRIES: &[ComboEntry] = &[
    ComboEntry {
        label: "fail",
        value: "fail",
        tip: "Only failed proof attempts",
    },
    ComboEntry {
        label: "all",
        value: "all",
        tip: "All proof attempts",
    },
    ComboEntry {
        label: "detailed",
        value: "detailed",
        tip: "Detailed proof attempts",
    },
];

/// Prover-level switch panel (applies to every proof launch).
pub fn prover_panel() -> SwitchPanel {
    SwitchPanel {
        name: "gnatprove",
        titles: &["Proof", "Process control"],
        columns: 2,
        lines: 3,
        switches: vec![
            Switch {
                label: "Report mode",
                tip: "Amount of information reported",
                column: 1,
                always_shown: true,
                kind: SwitchKind::Combo {
                    switch: "--report",
                    separator: "=",
                    default: "fail",
                    entries: REPORT_ENTRIES,
                },
            },
            Switch {
                label: "Prover timeout",
                tip: "Set the prover timeout (in s) for individual VCs",
                column: 1,
                always_shown: true,
                kind: SwitchKind::Spin {
                    switch: "--timeout=",
                    default: 1,
                    min: 1,
                    max: 3600,
                },
            },
            Switch {
                label: "Prover max steps",
                tip: "Set the prover maximum number of steps for individual VCs",
                column: 1,
                always_shown: false,
                kind: SwitchKind::Spin {
                    switch: "--steps=",
                    default: 0,
                    min: 0,
                    max: 1_000_000,
                },
            },
            Switch {
                label: "Multiprocessing",
                tip: "Use N processes to compile and prove",
                column: 2,
                always_shown: false,
                kind: SwitchKind::Spin {
                    switch: "-j",
                    default: 1,
                    min: 1,
                    max: 100,
                },
            },
        ],
    }
}

/// Panel for the proof launch model (shown on every prove_* target).
pub fn prove_model_panel() -> SwitchPanel {
    SwitchPanel {
        name: "prove",
        titles: &["Compilation", "Proof"],
        columns: 2,
        lines: 1,
        switches: vec![
            Switch {
                label: "Force Recompilation",
                tip: "All actions are redone entirely, including compilation and proof",
                column: 1,
                always_shown: true,
                kind: SwitchKind::Check { switch: "-f" },
            },
            Switch {
                label: "Report Proved VCs",
                tip: "Report the status of all VCs, including those proved",
                column: 2,
                always_shown: true,
                kind: SwitchKind::Check {
                    switch: "--report=all",
                },
            },
            Switch {
                label: "Prover Timeout",
                tip: "Set the prover timeout (in s) for individual VCs",
                column: 2,
                always_shown: false,
                kind: SwitchKind::Spin {
                    switch: "--timeout=",
                    default: 1,
                    min: 1,
                    max: 3600,
                },
            },
        ],
    }
}

/// Panel for the detection launch model.
pub fn detect_model_panel() -> SwitchPanel {
    SwitchPanel {
        name: "detect",
        titles: &["Compilation"],
        columns: 1,
        lines: 1,
        switches: vec![Switch {
            label: "Force Recompilation",
            tip: "All actions are redone entirely, including compilation and proof",
            column: 1,
            always_shown: true,
            kind: SwitchKind::Check { switch: "-f" },
        }],
    }
}

/// Where a menu entry appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuPlacement {
    /// Top-level "Prove" menu.
    Menu,
    /// Editor right-click menu.
    Contextual,
}

/// One registered menu entry binding a title to a command template.
#[derive(Debug, Clone, Serialize)]
pub struct MenuEntry {
    pub title: &'static str,
    pub template: &'static str,
    pub placement: MenuPlacement,
    /// Entry is only offered when the current selection classifies as a
    /// subprogram declaration or body.
    pub subprogram_filter: bool,
}

/// The full menu surface: top-level entries first, contextual entries after.
pub fn menu_entries() -> Vec<MenuEntry> {
    vec![
        MenuEntry {
            title: "Prove All",
            template: "prove_all",
            placement: MenuPlacement::Menu,
            subprogram_filter: false,
        },
        MenuEntry {
            title: "Prove Root Project",
            template: "prove_root_project",
            placement: MenuPlacement::Menu,
            subprogram_filter: false,
        },
        MenuEntry {
            title: "Prove File",
            template: "prove_file",
            placement: MenuPlacement::Menu,
            subprogram_filter: false,
        },
        MenuEntry {
            title: "Show Unprovable Code",
            template: "show_unprovable_code",
            placement: MenuPlacement::Menu,
            subprogram_filter: false,
        },
        MenuEntry {
            title: "Prove File",
            template: "prove_file",
            placement: MenuPlacement::Contextual,
            subprogram_filter: false,
        },
        MenuEntry {
            title: "Prove Line",
            template: "prove_line",
            placement: MenuPlacement::Contextual,
            subprogram_filter: false,
        },
        MenuEntry {
            title: "Prove Subprogram",
            template: "prove_subp",
            placement: MenuPlacement::Contextual,
            subprogram_filter: true,
        },
    ]
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prover_panel_layout() {
        let panel = prover_panel();
        assert_eq!(panel.columns, 2);
        assert_eq!(panel.switches.len(), 4);
        assert!(panel.switches.iter().any(
            |s| matches!(s.kind, SwitchKind::Combo { switch, .. } if switch == "--report")
        ));
    }

    #[test]
    fn timeout_spin_bounds() {
        let panel = prover_panel();
        let timeout = panel
            .switches
            .iter()
            .find(|s| s.label == "Prover timeout")
            .unwrap();
        match timeout.kind {
            SwitchKind::Spin {
                default, min, max, ..
            } => {
                assert_eq!((default, min, max), (1, 1, 3600));
            }
            _ => panic!("timeout should be a spin switch"),
        }
    }

    #[test]
    fn detect_panel_has_only_force_recompilation() {
        let panel = detect_model_panel();
        assert_eq!(panel.switches.len(), 1);
        assert!(matches!(
            panel.switches[0].kind,
            SwitchKind::Check { switch: "-f" }
        ));
    }

    // The subprogram panel deliberately carries no switch for --limit-subp:
    // the dispatcher injects that argument at call time, so the editable
    // panel cannot express it.
    #[test]
    fn prove_panel_has_no_limit_subp_switch() {
        let panel = prove_model_panel();
        assert!(!panel.switches.iter().any(|s| match s.kind {
            SwitchKind::Check { switch } => switch.contains("limit-subp"),
            SwitchKind::Spin { switch, .. } => switch.contains("limit-subp"),
            SwitchKind::Combo { switch, .. } => switch.contains("limit-subp"),
        }));
    }

    #[test]
    fn menu_surface_shape() {
        let entries = menu_entries();
        let top: Vec<_> = entries
            .iter()
            .filter(|e| e.placement == MenuPlacement::Menu)
            .map(|e| e.template)
            .collect();
        assert_eq!(
            top,
            vec![
                "prove_all",
                "prove_root_project",
                "prove_file",
                "show_unprovable_code"
            ]
        );
        let filtered: Vec<_> = entries
            .iter()
            .filter(|e| e.subprogram_filter)
            .map(|e| e.template)
            .collect();
        assert_eq!(filtered, vec!["prove_subp"]);
    }

    #[test]
    fn panels_serialize() {
        let v = serde_json::to_value(prover_panel()).unwrap();
        assert_eq!(v["name"], "gnatprove");
        let first = &v["switches"][0];
        assert_eq!(first["kind"], "combo");
        assert_eq!(first["switch"], "--report");
    }
}
