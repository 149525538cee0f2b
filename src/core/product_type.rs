//! Product types of Xcode targets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What an Xcode target produces.
///
/// Only `Framework` and `Application` have BUILD generation; the others are
/// recognized so that they can be reported and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    #[serde(alias = "com.apple.product-type.framework")]
    Framework,

    #[serde(alias = "com.apple.product-type.framework.static")]
    StaticFramework,

    #[serde(alias = "com.apple.product-type.application", alias = "app")]
    Application,

    #[serde(alias = "com.apple.product-type.bundle.unit-test")]
    UnitTestBundle,

    #[serde(alias = "com.apple.product-type.bundle.ui-testing")]
    UiTestBundle,

    #[serde(alias = "com.apple.product-type.library.static")]
    StaticLibrary,

    #[serde(alias = "com.apple.product-type.library.dynamic")]
    DynamicLibrary,

    #[serde(alias = "com.apple.product-type.app-extension")]
    AppExtension,

    #[serde(alias = "com.apple.product-type.bundle")]
    Bundle,

    #[serde(alias = "com.apple.product-type.tool")]
    CommandLineTool,

    #[serde(alias = "com.apple.product-type.application.watchapp2")]
    WatchApp,
}

impl ProductType {
    /// The Xcode product type identifier.
    pub fn identifier(&self) -> &'static str {
        match self {
            ProductType::Framework => "com.apple.product-type.framework",
            ProductType::StaticFramework => "com.apple.product-type.framework.static",
            ProductType::Application => "com.apple.product-type.application",
            ProductType::UnitTestBundle => "com.apple.product-type.bundle.unit-test",
            ProductType::UiTestBundle => "com.apple.product-type.bundle.ui-testing",
            ProductType::StaticLibrary => "com.apple.product-type.library.static",
            ProductType::DynamicLibrary => "com.apple.product-type.library.dynamic",
            ProductType::AppExtension => "com.apple.product-type.app-extension",
            ProductType::Bundle => "com.apple.product-type.bundle",
            ProductType::CommandLineTool => "com.apple.product-type.tool",
            ProductType::WatchApp => "com.apple.product-type.application.watchapp2",
        }
    }

    /// Short name, as written in project descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Framework => "framework",
            ProductType::StaticFramework => "static-framework",
            ProductType::Application => "application",
            ProductType::UnitTestBundle => "unit-test-bundle",
            ProductType::UiTestBundle => "ui-test-bundle",
            ProductType::StaticLibrary => "static-library",
            ProductType::DynamicLibrary => "dynamic-library",
            ProductType::AppExtension => "app-extension",
            ProductType::Bundle => "bundle",
            ProductType::CommandLineTool => "command-line-tool",
            ProductType::WatchApp => "watch-app",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
