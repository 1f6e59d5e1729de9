//! Repository config applied to a checkout before each case.

use std::collections::BTreeMap;

use crate::environment::{EditorHelper, IDENTITY_EMAIL, IDENTITY_NAME};

/// Settings written before any declaration override.
pub const BASELINE: &[(&str, &str)] = &[
    ("commit.gpgsign", "false"),
    ("fixupCommands.rebaseMerges", "true"),
    ("user.name", IDENTITY_NAME),
    ("user.email", IDENTITY_EMAIL),
];

/// Override keys whose declared value is not the value to store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigTransform {
    /// The declared value is a line to append to the rebase todo list; the
    /// stored value is the helper command that appends it.
    SequenceEditor,
}

impl ConfigTransform {
    pub const ALL: &'static [ConfigTransform] = &[ConfigTransform::SequenceEditor];

    pub fn key(self) -> &'static str {
        match self {
            ConfigTransform::SequenceEditor => "sequence.editor",
        }
    }

    pub fn for_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.key() == key)
    }

    pub fn apply(self, helper: &EditorHelper, value: &str) -> String {
        match self {
            ConfigTransform::SequenceEditor => helper.command(value),
        }
    }
}

/// Resolve the full, ordered list of config writes for one case.
///
/// Baseline first, then transformed keys, then the remaining overrides
/// verbatim in key order.
pub fn resolve(
    overrides: &BTreeMap<String, String>,
    helper: &EditorHelper,
) -> Vec<(String, String)> {
    let mut settings: Vec<(String, String)> = BASELINE
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    for transform in ConfigTransform::ALL {
        if let Some(value) = overrides.get(transform.key()) {
            settings.push((transform.key().to_string(), transform.apply(helper, value)));
        }
    }

    settings.extend(
        overrides
            .iter()
            .filter(|(key, _)| ConfigTransform::for_key(key).is_none())
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> EditorHelper {
        EditorHelper::new("/bin/helper").unwrap()
    }

    fn overrides(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn baseline_without_overrides() {
        let settings = resolve(&BTreeMap::new(), &helper());
        let keys: Vec<&str> = settings.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            ["commit.gpgsign", "fixupCommands.rebaseMerges", "user.name", "user.email"]
        );
        assert_eq!(settings[2].1, "Tester");
        assert_eq!(settings[3].1, "test@invalid");
    }

    #[test]
    fn sequence_editor_becomes_helper_command() {
        let settings = resolve(&overrides(&[("sequence.editor", "break")]), &helper());
        assert_eq!(settings.len(), 5);
        assert_eq!(
            settings[4],
            (
                "sequence.editor".to_string(),
                "'/bin/helper' 'append-line' 'break'".to_string()
            )
        );
    }

    #[test]
    fn transforms_run_before_generic_overrides() {
        let settings = resolve(
            &overrides(&[("a.key", "1"), ("sequence.editor", "exec true"), ("z.key", "2")]),
            &helper(),
        );
        let tail: Vec<&str> = settings[4..].iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(tail, ["sequence.editor", "a.key", "z.key"]);
        assert_eq!(settings[5].1, "1");
        assert_eq!(settings[6].1, "2");
    }

    #[test]
    fn overrides_follow_baseline_so_they_win() {
        let settings = resolve(&overrides(&[("user.name", "Someone")]), &helper());
        let last = settings.iter().rev().find(|(k, _)| k == "user.name").unwrap();
        assert_eq!(last.1, "Someone");
    }

    #[test]
    fn transform_lookup() {
        assert_eq!(
            ConfigTransform::for_key("sequence.editor"),
            Some(ConfigTransform::SequenceEditor)
        );
        assert_eq!(ConfigTransform::for_key("core.editor"), None);
    }
}
