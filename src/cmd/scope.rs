/*!
Scope enum for the `prove` subcommand.

Variants:
  all  (whole project closure)
  root (root project only)
  file (single unit)
  line (single line)
  subp (single subprogram, classifier-gated)

Helpers:
  - template_name()
  - needs_file() / needs_line()
  - from_str_ci()
*/

use std::fmt;

/// Analysis scopes the user can request with `prove <scope>`.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Scope {
    /// Whole project, including the full unit closure
    All,
    /// Root project only
    Root,
    /// The current file (single unit)
    File,
    /// The current line
    Line,
    /// The subprogram under the cursor
    Subp,
}

impl Scope {
    /// Name of the command template this scope dispatches to.
    pub const fn template_name(&self) -> &'static str {
        match self {
            Scope::All => "prove_all",
            Scope::Root => "prove_root_project",
            Scope::File => "prove_file",
            Scope::Line => "prove_line",
            Scope::Subp => "prove_subp",
        }
    }

    /// Whether this scope needs an active file context.
    pub const fn needs_file(&self) -> bool {
        matches!(self, Scope::File | Scope::Line | Scope::Subp)
    }

    /// Whether this scope needs an active line context.
    pub const fn needs_line(&self) -> bool {
        matches!(self, Scope::Line | Scope::Subp)
    }

    /// Case-insensitive parser not relying on `clap`, for internal conversions.
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Scope::All),
            "root" => Some(Scope::Root),
            "file" => Some(Scope::File),
            "line" => Some(Scope::Line),
            "subp" | "subprogram" => Some(Scope::Subp),
            _ => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scope::All => "all",
            Scope::Root => "root",
            Scope::File => "file",
            Scope::Line => "line",
            Scope::Subp => "subp",
        };
        f.write_str(s)
    }
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::Scope;

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(Scope::from_str_ci("ALL"), Some(Scope::All));
        assert_eq!(Scope::from_str_ci(" subprogram "), Some(Scope::Subp));
        assert_eq!(Scope::from_str_ci("project"), None);
    }

    #[test]
    fn context_requirements() {
        assert!(!Scope::All.needs_file());
        assert!(!Scope::Root.needs_line());
        assert!(Scope::File.needs_file() && !Scope::File.needs_line());
        assert!(Scope::Line.needs_file() && Scope::Line.needs_line());
        assert!(Scope::Subp.needs_file() && Scope::Subp.needs_line());
    }

    #[test]
    fn template_mapping() {
        assert_eq!(Scope::All.template_name(), "prove_all");
        assert_eq!(Scope::Root.template_name(), "prove_root_project");
        assert_eq!(Scope::Subp.template_name(), "prove_subp");
    }

    #[test]
    fn display_output() {
        assert_eq!(Scope::Line.to_string(), "line");
    }
}
