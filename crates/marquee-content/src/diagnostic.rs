//! Link and conflict diagnostics collected during resolution.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A reference to a document or page that does not exist
    BrokenLink,
    /// Two documents of one locale share an id
    DuplicateId,
    /// Two pages of one locale share a route
    DuplicateRoute,
}

impl DiagnosticKind {
    /// Conflicts are fatal regardless of the link policy.
    pub fn is_conflict(&self) -> bool {
        !matches!(self, Self::BrokenLink)
    }
}

/// One violation, with enough context to locate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkDiagnostic {
    pub kind: DiagnosticKind,
    /// Where the reference was made: a file path, `sidebar `...``, `navbar`, ...
    pub source: String,
    /// The missing or conflicting id, path or route
    pub target: String,
    /// Locales the violation was found in
    pub locales: Vec<String>,
}

impl LinkDiagnostic {
    pub fn new(
        kind: DiagnosticKind,
        source: impl Into<String>,
        target: impl Into<String>,
        locale: &str,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
            target: target.into(),
            locales: vec![locale.to_string()],
        }
    }
}

impl fmt::Display for LinkDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            DiagnosticKind::BrokenLink => "broken link to",
            DiagnosticKind::DuplicateId => "duplicate document id",
            DiagnosticKind::DuplicateRoute => "duplicate route",
        };
        write!(
            f,
            "{}: {} `{}` [{}]",
            self.source,
            what,
            self.target,
            self.locales.join(", ")
        )
    }
}

/// Merge diagnostics that only differ by locale and sort them.
///
/// A sidebar entry missing in every locale is reported once.
pub fn merge(diagnostics: Vec<LinkDiagnostic>) -> Vec<LinkDiagnostic> {
    let mut merged: BTreeMap<(DiagnosticKind, String, String), Vec<String>> = BTreeMap::new();

    for diagnostic in diagnostics {
        let locales = merged
            .entry((diagnostic.kind, diagnostic.source, diagnostic.target))
            .or_default();
        for locale in diagnostic.locales {
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }
    }

    merged
        .into_iter()
        .map(|((kind, source, target), locales)| LinkDiagnostic {
            kind,
            source,
            target,
            locales,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_across_locales() {
        let merged = merge(vec![
            LinkDiagnostic::new(DiagnosticKind::BrokenLink, "sidebar `docs`", "missing-doc", "en"),
            LinkDiagnostic::new(DiagnosticKind::BrokenLink, "docs/intro.md", "./gone.md", "en"),
            LinkDiagnostic::new(DiagnosticKind::BrokenLink, "sidebar `docs`", "missing-doc", "ka"),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].source, "sidebar `docs`");
        assert_eq!(merged[1].locales, vec!["en", "ka"]);
        assert_eq!(
            merged[1].to_string(),
            "sidebar `docs`: broken link to `missing-doc` [en, ka]"
        );
    }

    #[test]
    fn conflicts_are_fatal_kinds() {
        assert!(!DiagnosticKind::BrokenLink.is_conflict());
        assert!(DiagnosticKind::DuplicateId.is_conflict());
        assert!(DiagnosticKind::DuplicateRoute.is_conflict());
    }
}
