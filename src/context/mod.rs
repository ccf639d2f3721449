//! Invocation context model (editor selection state).
//!
//! Selection -> tagged variant {None | File | FileLine | Entity}.
//! classify -> SubpContext {Declaration | Body | Neither} (pure predicate).
//! SourceLocation::label -> "<basename>:<line>" display form.
//!
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A source position: file plus 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Display form used for scope-limiting prover switches: the file's
    /// basename (directory stripped) joined to the line with a colon,
    /// e.g. `/a/b/foo.adb` line 42 -> `foo.adb:42`.
    pub fn label(&self) -> String {
        format!("{}:{}", basename(&self.file), self.line)
    }

    /// Exact file + line equality against a raw (file, line) pair.
    pub fn matches(&self, file: &Path, line: u32) -> bool {
        self.file == file && self.line == line
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// Basename helper tolerant of paths with no file component (returns the
/// path's own string form in that case rather than failing).
pub(crate) fn basename(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.to_string_lossy().into_owned())
}

/// Categorization of a selected program entity, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    Subprogram,
    Package,
    Type,
    Object,
    Other,
}

impl EntityCategory {
    /// Case-insensitive parser for host-supplied category strings.
    pub fn from_str_ci(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "subprogram" | "procedure" | "function" => EntityCategory::Subprogram,
            "package" => EntityCategory::Package,
            "type" => EntityCategory::Type,
            "object" | "variable" | "constant" => EntityCategory::Object,
            _ => EntityCategory::Other,
        }
    }
}

/// A program entity as the host editor describes it: a name, a category,
/// and optional declaration / body locations (either may be unknown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub category: EntityCategory,
    #[serde(default)]
    pub declaration: Option<SourceLocation>,
    #[serde(default)]
    pub body: Option<SourceLocation>,
}

/// The editor selection state an action is invoked against.
///
/// Mirrors what the host provides per call: nothing, a file, a file + line,
/// or a selected entity together with the cursor location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    None,
    File { file: PathBuf },
    FileLine { file: PathBuf, line: u32 },
    Entity { entity: Entity, location: SourceLocation },
}

impl Selection {
    /// The active file, if any variant carries one.
    pub fn file(&self) -> Option<&Path> {
        match self {
            Selection::None => None,
            Selection::File { file } => Some(file),
            Selection::FileLine { file, .. } => Some(file),
            Selection::Entity { location, .. } => Some(&location.file),
        }
    }

    /// The active line, if any variant carries one.
    pub fn line(&self) -> Option<u32> {
        match self {
            Selection::None | Selection::File { .. } => None,
            Selection::FileLine { line, .. } => Some(*line),
            Selection::Entity { location, .. } => Some(location.line),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::None => write!(f, "no selection"),
            Selection::File { file } => write!(f, "file: {}", file.display()),
            Selection::FileLine { file, line } => {
                write!(f, "line: {}:{}", file.display(), line)
            }
            Selection::Entity { entity, location } => {
                write!(f, "entity: {} at {}", entity.name, location)
            }
        }
    }
}

/// Outcome of classifying a selection for the subprogram-scoped action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubpContext {
    /// Cursor sits exactly on the subprogram's declaration line.
    Declaration,
    /// Cursor sits exactly on the subprogram's body line.
    Body,
    /// Anything else: no entity, wrong category, no known location,
    /// or a location mismatch. Never an error.
    Neither,
}

impl SubpContext {
    pub fn accepted(&self) -> bool {
        !matches!(self, SubpContext::Neither)
    }
}

/// Classify a selection for the subprogram action.
///
/// Accepts only when all of: the selection carries an entity, the entity is
/// a subprogram, the entity has a declaration (resp. body) location, and the
/// cursor's file and line equal that location's file and line exactly.
/// Declaration wins over body when both match (same tie-break the callback
/// relies on when it later reads the declaration location).
pub fn classify(selection: &Selection) -> SubpContext {
    let Selection::Entity { entity, location } = selection else {
        return SubpContext::Neither;
    };
    if entity.category != EntityCategory::Subprogram {
        return SubpContext::Neither;
    }
    if let Some(decl) = &entity.declaration
        && decl.matches(&location.file, location.line)
    {
        return SubpContext::Declaration;
    }
    if let Some(body) = &entity.body
        && body.matches(&location.file, location.line)
    {
        return SubpContext::Body;
    }
    SubpContext::Neither
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn subp(decl: Option<(&str, u32)>, body: Option<(&str, u32)>) -> Entity {
        Entity {
            name: "Do_Stuff".into(),
            category: EntityCategory::Subprogram,
            declaration: decl.map(|(f, l)| SourceLocation::new(f, l)),
            body: body.map(|(f, l)| SourceLocation::new(f, l)),
        }
    }

    #[test]
    fn label_strips_directory() {
        let loc = SourceLocation::new("/a/b/foo.adb", 42);
        assert_eq!(loc.label(), "foo.adb:42");
    }

    #[test]
    fn label_bare_filename() {
        let loc = SourceLocation::new("pkg.ads", 7);
        assert_eq!(loc.label(), "pkg.ads:7");
    }

    #[test]
    fn classify_no_entity_is_neither() {
        assert_eq!(classify(&Selection::None), SubpContext::Neither);
        assert_eq!(
            classify(&Selection::FileLine {
                file: "foo.adb".into(),
                line: 3
            }),
            SubpContext::Neither
        );
    }

    #[test]
    fn classify_wrong_category_is_neither() {
        let sel = Selection::Entity {
            entity: Entity {
                name: "Pkg".into(),
                category: EntityCategory::Package,
                declaration: Some(SourceLocation::new("pkg.ads", 1)),
                body: None,
            },
            location: SourceLocation::new("pkg.ads", 1),
        };
        assert_eq!(classify(&sel), SubpContext::Neither);
    }

    #[test]
    fn classify_declaration_exact_match() {
        let sel = Selection::Entity {
            entity: subp(Some(("foo.ads", 10)), Some(("foo.adb", 20))),
            location: SourceLocation::new("foo.ads", 10),
        };
        assert_eq!(classify(&sel), SubpContext::Declaration);
    }

    #[test]
    fn classify_body_exact_match() {
        let sel = Selection::Entity {
            entity: subp(Some(("foo.ads", 10)), Some(("foo.adb", 20))),
            location: SourceLocation::new("foo.adb", 20),
        };
        assert_eq!(classify(&sel), SubpContext::Body);
    }

    #[test]
    fn classify_line_off_by_one_is_neither() {
        let sel = Selection::Entity {
            entity: subp(Some(("foo.ads", 10)), None),
            location: SourceLocation::new("foo.ads", 11),
        };
        assert_eq!(classify(&sel), SubpContext::Neither);
    }

    #[test]
    fn classify_missing_locations_is_neither() {
        let sel = Selection::Entity {
            entity: subp(None, None),
            location: SourceLocation::new("foo.adb", 5),
        };
        assert_eq!(classify(&sel), SubpContext::Neither);
    }

    #[test]
    fn selection_deserializes_from_json() {
        let sel: Selection = serde_json::from_value(serde_json::json!({
            "kind": "entity",
            "entity": {
                "name": "Swap",
                "category": "subprogram",
                "declaration": {"file": "swap.ads", "line": 4}
            },
            "location": {"file": "swap.ads", "line": 4}
        }))
        .unwrap();
        assert_eq!(classify(&sel), SubpContext::Declaration);
    }

    #[test]
    fn category_parse_aliases() {
        assert_eq!(
            EntityCategory::from_str_ci("Procedure"),
            EntityCategory::Subprogram
        );
        assert_eq!(EntityCategory::from_str_ci("weird"), EntityCategory::Other);
    }
}
