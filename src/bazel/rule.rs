//! Build rule model and its Starlark rendering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bazel::rule_set::BazelRuleSet;
use crate::util::string::to_array_literal;

const INDENT: &str = "    ";

/// Apple device family targeted by a bundle rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceFamily {
    Iphone,
    Ipad,
    Tv,
    Watch,
}

impl DeviceFamily {
    /// Value used in the `families` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceFamily::Iphone => "iphone",
            DeviceFamily::Ipad => "ipad",
            DeviceFamily::Tv => "tv",
            DeviceFamily::Watch => "watch",
        }
    }
}

impl fmt::Display for DeviceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iphone" => Ok(DeviceFamily::Iphone),
            "ipad" => Ok(DeviceFamily::Ipad),
            "tv" => Ok(DeviceFamily::Tv),
            "watch" => Ok(DeviceFamily::Watch),
            _ => Err(format!(
                "unknown device family: {} (expected iphone, ipad, tv, or watch)",
                s
            )),
        }
    }
}

/// A single generated build rule.
///
/// Rules are plain values: the translator validates everything before
/// constructing them, so rendering cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BazelRule {
    /// `swift_library` compiling a target's sources
    SwiftLibrary {
        name: String,
        srcs: Vec<String>,
        deps: Vec<String>,
        module_name: String,
    },

    /// `ios_framework` bundling a library
    IosFramework {
        name: String,
        deps: Vec<String>,
        bundle_id: String,
        minimum_os_version: String,
        families: Vec<DeviceFamily>,
        infoplists: Vec<String>,
    },

    /// `ios_application` bundling an app
    IosApplication {
        name: String,
        deps: Vec<String>,
        bundle_id: String,
        minimum_os_version: String,
        families: Vec<DeviceFamily>,
        infoplists: Vec<String>,
    },

    /// Native `filegroup` exposing plain files
    Filegroup { name: String, srcs: Vec<String> },
}

impl BazelRule {
    /// Rule name, the part of the label after `:`.
    pub fn name(&self) -> &str {
        match self {
            BazelRule::SwiftLibrary { name, .. }
            | BazelRule::IosFramework { name, .. }
            | BazelRule::IosApplication { name, .. }
            | BazelRule::Filegroup { name, .. } => name,
        }
    }

    /// Starlark function name of this rule.
    pub fn kind(&self) -> &'static str {
        match self {
            BazelRule::SwiftLibrary { .. } => "swift_library",
            BazelRule::IosFramework { .. } => "ios_framework",
            BazelRule::IosApplication { .. } => "ios_application",
            BazelRule::Filegroup { .. } => "filegroup",
        }
    }

    /// Rule set that defines this rule's kind.
    pub fn rule_set(&self) -> BazelRuleSet {
        match self {
            BazelRule::SwiftLibrary { .. } => BazelRuleSet::Swift,
            BazelRule::IosFramework { .. } | BazelRule::IosApplication { .. } => {
                BazelRuleSet::Apple
            }
            BazelRule::Filegroup { .. } => BazelRuleSet::Native,
        }
    }

    /// Render the rule declaration, terminated by a newline.
    pub fn serialize(&self) -> String {
        let mut out = RuleWriter::new(self.kind(), self.name());

        match self {
            BazelRule::SwiftLibrary {
                srcs,
                deps,
                module_name,
                ..
            } => {
                out.list("srcs", srcs);
                out.string("module_name", module_name);
                out.list("deps", deps);
                out.public();
            }
            BazelRule::IosFramework {
                deps,
                bundle_id,
                minimum_os_version,
                families,
                infoplists,
                ..
            }
            | BazelRule::IosApplication {
                deps,
                bundle_id,
                minimum_os_version,
                families,
                infoplists,
                ..
            } => {
                out.string("bundle_id", bundle_id);
                out.list("families", &families.iter().map(DeviceFamily::as_str).collect::<Vec<_>>());
                out.list("infoplists", infoplists);
                out.string("minimum_os_version", minimum_os_version);
                out.list("deps", deps);
            }
            BazelRule::Filegroup { srcs, .. } => {
                out.list("srcs", srcs);
                out.public();
            }
        }

        out.finish()
    }
}

/// Accumulates `attr = value,` lines of one rule call.
struct RuleWriter {
    buf: String,
}

impl RuleWriter {
    fn new(kind: &str, name: &str) -> Self {
        let mut writer = RuleWriter {
            buf: format!("{kind}(\n"),
        };
        writer.string("name", name);
        writer
    }

    fn string(&mut self, attr: &str, value: &str) {
        self.buf.push_str(&format!("{INDENT}{attr} = \"{value}\",\n"));
    }

    fn list<S: AsRef<str>>(&mut self, attr: &str, items: &[S]) {
        self.buf
            .push_str(&format!("{INDENT}{attr} = {},\n", to_array_literal(items, INDENT)));
    }

    fn public(&mut self) {
        self.buf
            .push_str(&format!("{INDENT}visibility = [\"//visibility:public\"],\n"));
    }

    fn finish(mut self) -> String {
        self.buf.push_str(")\n");
        self.buf
    }
}
