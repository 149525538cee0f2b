//! String helpers used to derive Bazel labels from filesystem paths.
//!
//! These operate on raw characters, not on path segments. A common prefix
//! may therefore end in the middle of a directory name.

/// Longest prefix shared by every string, compared character by character.
///
/// An empty input yields an empty string.
pub fn common_prefix<S: AsRef<str>>(strings: &[S]) -> String {
    let Some((first, rest)) = strings.split_first() else {
        return String::new();
    };
    let first = first.as_ref();

    let mut others: Vec<_> = rest.iter().map(|s| s.as_ref().chars()).collect();
    let mut prefix = String::new();

    for ch in first.chars() {
        let all_match = others.iter_mut().all(|chars| chars.next() == Some(ch));
        if !all_match {
            break;
        }
        prefix.push(ch);
    }

    prefix
}

/// Strip a literal leading `prefix` from `s`; a no-op when it is absent.
pub fn remove_prefix<'a>(s: &'a str, prefix: &str) -> &'a str {
    s.strip_prefix(prefix).unwrap_or(s)
}

/// Render strings as a Starlark list literal, one quoted item per line.
///
/// `indent` is the indentation of the line holding the opening bracket.
pub fn to_array_literal<S: AsRef<str>>(items: &[S], indent: &str) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }

    let mut out = String::from("[\n");
    for item in items {
        out.push_str(&format!("{indent}    \"{}\",\n", item.as_ref()));
    }
    out.push_str(indent);
    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefix_of_sibling_paths() {
        assert_eq!(common_prefix(&["/a/b/c", "/a/b/d"]), "/a/b/");
    }

    #[test]
    fn test_common_prefix_empty_input() {
        let empty: [&str; 0] = [];
        assert_eq!(common_prefix(&empty), "");
    }

    #[test]
    fn test_common_prefix_single_string() {
        assert_eq!(common_prefix(&["x"]), "x");
    }

    #[test]
    fn test_common_prefix_no_overlap() {
        assert_eq!(common_prefix(&["abc", "xyz"]), "");
    }

    #[test]
    fn test_common_prefix_shorter_string_bounds_result() {
        assert_eq!(common_prefix(&["/a/b/c", "/a/b"]), "/a/b");
    }

    #[test]
    fn test_common_prefix_splits_mid_segment() {
        // Character-wise, not segment-wise.
        assert_eq!(common_prefix(&["/Libs/Foobar", "/Libs/Foo"]), "/Libs/Foo");
    }

    #[test]
    fn test_common_prefix_multibyte() {
        assert_eq!(common_prefix(&["Ünïcode/a", "Ünïcode/b"]), "Ünïcode/");
    }

    #[test]
    fn test_remove_prefix_present() {
        assert_eq!(remove_prefix("/a/b/c.swift", "/a/b"), "/c.swift");
    }

    #[test]
    fn test_remove_prefix_absent_is_noop() {
        assert_eq!(remove_prefix("/a/b/c.swift", "/x"), "/a/b/c.swift");
    }

    #[test]
    fn test_remove_prefix_only_leading() {
        assert_eq!(remove_prefix("x/a/x", "a"), "x/a/x");
    }

    #[test]
    fn test_to_array_literal() {
        assert_eq!(to_array_literal::<&str>(&[], "    "), "[]");
        assert_eq!(
            to_array_literal(&["a", "b"], "    "),
            "[\n        \"a\",\n        \"b\",\n    ]"
        );
    }
}
