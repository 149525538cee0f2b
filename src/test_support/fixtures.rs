//! Test fixtures for common test scenarios.

use std::path::{Path, PathBuf};

use crate::core::{AbstractProject, AbstractTarget, ProductType, TargetId, DESCRIPTION_NAME};

/// Two frameworks, an application using one of them, and a unit test bundle.
pub const SAMPLE_DESCRIPTION: &str = r#"
[[target]]
name = "Bar"
path = "Libs/Bar"
product_type = "framework"
sources = ["Libs/Bar/Bar.swift"]
info_plist = "Libs/Bar/Info.plist"

[[target]]
name = "Foo"
path = "Libs/Foo"
product_type = "framework"
sources = ["Libs/Foo/Foo.swift", "Libs/Foo/Internal/Cache.swift"]
dependencies = ["Bar"]
info_plist = "Libs/Foo/Info.plist"

[[target]]
name = "App"
path = "App"
product_type = "application"
sources = ["App/AppDelegate.swift"]
dependencies = ["Foo"]
info_plist = "App/Info.plist"

[[target]]
name = "AppTests"
path = "AppTests"
product_type = "unit-test-bundle"
sources = ["AppTests/AppTests.swift"]
dependencies = ["App"]
info_plist = "AppTests/Info.plist"
"#;

/// Write `content` as `Project.toml` in `dir` and return its path.
pub fn write_description(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join(DESCRIPTION_NAME);
    std::fs::write(&path, content).unwrap();
    path
}

/// The project of [`SAMPLE_DESCRIPTION`], built directly, rooted at `root`.
pub fn sample_project(root: &Path) -> AbstractProject {
    AbstractProject::new(
        root,
        vec![
            AbstractTarget::new("Bar", "Libs/Bar", ProductType::Framework, "Libs/Bar/Info.plist")
                .with_sources(["Libs/Bar/Bar.swift"]),
            AbstractTarget::new("Foo", "Libs/Foo", ProductType::Framework, "Libs/Foo/Info.plist")
                .with_sources(["Libs/Foo/Foo.swift", "Libs/Foo/Internal/Cache.swift"])
                .with_dependencies([TargetId(0)]),
            AbstractTarget::new("App", "App", ProductType::Application, "App/Info.plist")
                .with_sources(["App/AppDelegate.swift"])
                .with_dependencies([TargetId(1)]),
            AbstractTarget::new(
                "AppTests",
                "AppTests",
                ProductType::UnitTestBundle,
                "AppTests/Info.plist",
            )
            .with_sources(["AppTests/AppTests.swift"])
            .with_dependencies([TargetId(2)]),
        ],
    )
    .unwrap()
}

/// A framework target at `Libs/<name>` with one source file.
pub fn framework(name: &str) -> AbstractTarget {
    AbstractTarget::new(
        name,
        format!("Libs/{name}"),
        ProductType::Framework,
        format!("Libs/{name}/Info.plist"),
    )
    .with_sources([format!("Libs/{name}/{name}.swift")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProjectDescription;
    use crate::core::description::DescriptionFormat;

    #[test]
    fn test_sample_description_matches_sample_project() {
        let description =
            ProjectDescription::parse(SAMPLE_DESCRIPTION, DescriptionFormat::Toml).unwrap();
        let parsed = description.into_project(PathBuf::from("/proj"), None).unwrap();
        let built = sample_project(Path::new("/proj"));

        for (a, b) in parsed.targets().iter().zip(built.targets()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.product_type, b.product_type);
            assert_eq!(a.source_files, b.source_files);
            assert_eq!(a.dependencies, b.dependencies);
        }
    }
}
