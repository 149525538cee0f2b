//! Pending writes of rules to build files.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use crate::bazel::rule::BazelRule;
use crate::bazel::rule_set::BazelRuleSet;

/// An intent to write `rules` to the build file at `target_path`.
///
/// Several operations may name the same file; they are merged when the
/// file is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBuildFileOperation {
    pub target_path: PathBuf,
    pub rules: Vec<BazelRule>,
}

impl CreateBuildFileOperation {
    pub fn new(target_path: impl Into<PathBuf>, rules: Vec<BazelRule>) -> Self {
        CreateBuildFileOperation {
            target_path: target_path.into(),
            rules,
        }
    }

    /// Serialized rules in list order, separated by blank lines.
    pub fn all_rules(&self) -> String {
        self.rules
            .iter()
            .map(BazelRule::serialize)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rule sets referenced by this operation's rules.
    pub fn rule_sets(&self) -> impl Iterator<Item = BazelRuleSet> + '_ {
        self.rules.iter().map(BazelRule::rule_set)
    }

    /// One load statement per external rule set used across `operations`.
    ///
    /// Statements are ordered by rule set and list the rule kinds in sorted
    /// order, so the block does not depend on operation order.
    pub fn aggregated_loading_statements(operations: &[CreateBuildFileOperation]) -> Vec<String> {
        let mut kinds: BTreeMap<BazelRuleSet, BTreeSet<&'static str>> = BTreeMap::new();
        for rule in operations.iter().flat_map(|op| &op.rules) {
            kinds.entry(rule.rule_set()).or_default().insert(rule.kind());
        }

        kinds
            .into_iter()
            .filter_map(|(set, kinds)| set.load_statement(kinds))
            .collect()
    }

    /// Merged rule text of operations sharing one path, in arrival order.
    pub fn merged_rules(operations: &[CreateBuildFileOperation]) -> String {
        operations
            .iter()
            .map(CreateBuildFileOperation::all_rules)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Full content of a build file assembled from `operations`.
    pub fn render(operations: &[CreateBuildFileOperation]) -> String {
        let loads = Self::aggregated_loading_statements(operations);
        let rules = Self::merged_rules(operations);

        if loads.is_empty() {
            rules
        } else {
            format!("{}\n\n{}", loads.join("\n"), rules)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bazel::rule::DeviceFamily;

    fn library(name: &str) -> BazelRule {
        BazelRule::SwiftLibrary {
            name: name.into(),
            srcs: vec![format!("{name}.swift")],
            deps: vec![],
            module_name: name.into(),
        }
    }

    fn filegroup(name: &str) -> BazelRule {
        BazelRule::Filegroup {
            name: name.into(),
            srcs: vec!["Info.plist".into()],
        }
    }

    fn application(name: &str) -> BazelRule {
        BazelRule::IosApplication {
            name: name.into(),
            deps: vec![],
            bundle_id: format!("to.do.{name}"),
            minimum_os_version: "13.0".into(),
            families: vec![DeviceFamily::Iphone],
            infoplists: vec![],
        }
    }

    #[test]
    fn test_all_rules_blank_line_separated() {
        let op = CreateBuildFileOperation::new("/p/BUILD.bazel", vec![library("A"), filegroup("B")]);
        let text = op.all_rules();

        assert_eq!(text, format!("{}\n{}", library("A").serialize(), filegroup("B").serialize()));
        assert!(text.contains(")\n\nfilegroup("));
    }

    #[test]
    fn test_merged_rules_keep_arrival_order() {
        let first = CreateBuildFileOperation::new("/p/BUILD.bazel", vec![filegroup("Z_InfoPlist")]);
        let second = CreateBuildFileOperation::new("/p/BUILD.bazel", vec![filegroup("A_InfoPlist")]);

        let merged = CreateBuildFileOperation::merged_rules(&[first.clone(), second.clone()]);
        assert_eq!(merged, format!("{}\n{}", first.all_rules(), second.all_rules()));
        assert!(merged.find("Z_InfoPlist").unwrap() < merged.find("A_InfoPlist").unwrap());
    }

    #[test]
    fn test_loading_statements_deduplicated() {
        let ops = vec![
            CreateBuildFileOperation::new("/p/BUILD.bazel", vec![library("A"), application("App")]),
            CreateBuildFileOperation::new("/p/BUILD.bazel", vec![library("B"), filegroup("F")]),
        ];

        let loads = CreateBuildFileOperation::aggregated_loading_statements(&ops);
        assert_eq!(
            loads,
            vec![
                r#"load("@build_bazel_rules_apple//apple:ios.bzl", "ios_application")"#.to_string(),
                r#"load("@build_bazel_rules_swift//swift:swift.bzl", "swift_library")"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_render_with_loads() {
        let op = CreateBuildFileOperation::new("/p/BUILD.bazel", vec![library("A")]);
        let content = CreateBuildFileOperation::render(&[op]);

        assert!(content.starts_with(
            "load(\"@build_bazel_rules_swift//swift:swift.bzl\", \"swift_library\")\n\nswift_library("
        ));
        assert!(content.ends_with(")\n"));
    }

    #[test]
    fn test_render_native_only_has_no_loads() {
        let op = CreateBuildFileOperation::new("/p/BUILD.bazel", vec![filegroup("F")]);
        let content = CreateBuildFileOperation::render(&[op]);
        assert!(content.starts_with("filegroup("));
    }
}
