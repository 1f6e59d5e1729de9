//! Test case declarations (`test.json`).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CaseError;

/// File name of the declaration inside a case directory.
pub const DECLARATION_FILE: &str = "test.json";

/// What a test case sets up and which tool invocation it exercises.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Declaration {
    /// Repository identifier; the bundle is `<repos>/<repo>.bundle`.
    pub repo: String,
    /// Git config overrides applied after the baseline settings.
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    /// Patch file name under `<root>/patches/`.
    pub patch: String,
    /// Tool subcommand.
    #[serde(rename = "type")]
    pub kind: String,
    /// Positional arguments following the subcommand.
    pub args: Vec<String>,
    /// Record the tool's own output as an artifact.
    #[serde(default)]
    pub test_out: bool,
}

impl Declaration {
    /// Parse a declaration from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Read and parse the declaration at `path`.
    pub fn load(path: &Path) -> Result<Self, CaseError> {
        let text = fs::read_to_string(path).map_err(|source| CaseError::ReadDeclaration {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| CaseError::ParseDeclaration {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_declaration() {
        let decl = Declaration::from_json(
            r#"{
                "repo": "linear",
                "config": {"sequence.editor": "break", "rebase.autoSquash": "true"},
                "patch": "fixup.patch",
                "type": "fixup",
                "args": ["HEAD~2", "--no-edit"],
                "test_out": true
            }"#,
        )
        .unwrap();

        assert_eq!(decl.repo, "linear");
        assert_eq!(decl.patch, "fixup.patch");
        assert_eq!(decl.kind, "fixup");
        assert_eq!(decl.args, vec!["HEAD~2", "--no-edit"]);
        assert!(decl.test_out);
        assert_eq!(
            decl.config.keys().collect::<Vec<_>>(),
            vec!["rebase.autoSquash", "sequence.editor"]
        );
    }

    #[test]
    fn optional_fields_default() {
        let decl = Declaration::from_json(
            r#"{"repo": "r", "patch": "p.patch", "type": "reword", "args": []}"#,
        )
        .unwrap();

        assert!(decl.config.is_empty());
        assert!(!decl.test_out);
        assert!(decl.args.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let decl = Declaration::from_json(
            r#"{"repo": "r", "patch": "p", "type": "t", "args": [], "note": "manual"}"#,
        )
        .unwrap();
        assert_eq!(decl.repo, "r");
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let err = Declaration::from_json(r#"{"repo": "r", "patch": "p", "args": []}"#)
            .unwrap_err();
        assert!(err.to_string().contains("type"), "{err}");
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        assert!(Declaration::from_json(
            r#"{"repo": "r", "patch": "p", "type": "t", "args": "HEAD"}"#
        )
        .is_err());
        assert!(Declaration::from_json(
            r#"{"repo": "r", "patch": "p", "type": "t", "args": [], "config": {"k": 1}}"#
        )
        .is_err());
    }

    #[test]
    fn load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DECLARATION_FILE);

        let missing = Declaration::load(&path).unwrap_err();
        assert!(matches!(missing, CaseError::ReadDeclaration { .. }));

        fs::write(&path, "{not json").unwrap();
        let invalid = Declaration::load(&path).unwrap_err();
        assert!(matches!(invalid, CaseError::ParseDeclaration { .. }));
        assert!(invalid.to_string().contains("test.json"));
    }
}
