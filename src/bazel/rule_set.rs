//! External rule sets a generated build may depend on.

use std::collections::BTreeSet;
use std::fmt;

/// Fixed first line of every workspace manifest.
pub const HTTP_ARCHIVE_LOAD: &str =
    r#"load("@bazel_tools//tools/build_defs/repo:http.bzl", "http_archive")"#;

/// A provider of rule kinds.
///
/// Every rule belongs to exactly one set. External sets must be declared in
/// the workspace and loaded in each build file using them; `Native` rules
/// are built into Bazel and need neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BazelRuleSet {
    /// `rules_apple`: bundles for Apple platforms
    Apple,
    /// `rules_swift`: Swift compilation
    Swift,
    /// Rules built into Bazel itself
    Native,
}

impl BazelRuleSet {
    /// The `.bzl` file defining this set's rules.
    pub fn bzl_file(&self) -> Option<&'static str> {
        match self {
            BazelRuleSet::Apple => Some("@build_bazel_rules_apple//apple:ios.bzl"),
            BazelRuleSet::Swift => Some("@build_bazel_rules_swift//swift:swift.bzl"),
            BazelRuleSet::Native => None,
        }
    }

    /// Workspace declaration fetching this set, if it is external.
    pub fn workspace_content(&self) -> Option<&'static str> {
        match self {
            BazelRuleSet::Apple => Some(APPLE_WORKSPACE),
            BazelRuleSet::Swift => Some(SWIFT_WORKSPACE),
            BazelRuleSet::Native => None,
        }
    }

    /// `load(...)` statement importing `rule_kinds` from this set.
    ///
    /// Kinds are emitted in the given order; callers pass them sorted.
    pub fn load_statement<'a>(&self, rule_kinds: impl IntoIterator<Item = &'a str>) -> Option<String> {
        let bzl = self.bzl_file()?;
        let mut statement = format!("load(\"{bzl}\"");
        for kind in rule_kinds {
            statement.push_str(&format!(", \"{kind}\""));
        }
        statement.push(')');
        Some(statement)
    }
}

impl fmt::Display for BazelRuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BazelRuleSet::Apple => write!(f, "rules_apple"),
            BazelRuleSet::Swift => write!(f, "rules_swift"),
            BazelRuleSet::Native => write!(f, "native"),
        }
    }
}

const APPLE_WORKSPACE: &str = r#"http_archive(
    name = "build_bazel_rules_apple",
    url = "https://github.com/bazelbuild/rules_apple/releases/download/2.3.0/rules_apple.2.3.0.tar.gz",
)

load("@build_bazel_rules_apple//apple:repositories.bzl", "apple_rules_dependencies")

apple_rules_dependencies()

load("@build_bazel_apple_support//lib:repositories.bzl", "apple_support_dependencies")

apple_support_dependencies()
"#;

const SWIFT_WORKSPACE: &str = r#"http_archive(
    name = "build_bazel_rules_swift",
    url = "https://github.com/bazelbuild/rules_swift/releases/download/1.7.1/rules_swift.1.7.1.tar.gz",
)

load("@build_bazel_rules_swift//swift:repositories.bzl", "swift_rules_dependencies")

swift_rules_dependencies()

load("@build_bazel_rules_swift//swift:extras.bzl", "swift_rules_extra_dependencies")

swift_rules_extra_dependencies()
"#;

/// Render the workspace manifest for a set of referenced rule sets.
///
/// The http_archive load line always comes first, so a project without any
/// external rules still gets a valid manifest.
pub fn workspace_manifest(rule_sets: &BTreeSet<BazelRuleSet>) -> String {
    let declarations: Vec<&str> = rule_sets
        .iter()
        .filter_map(BazelRuleSet::workspace_content)
        .collect();

    format!("{}\n{}", HTTP_ARCHIVE_LOAD, declarations.join("\n"))
}
