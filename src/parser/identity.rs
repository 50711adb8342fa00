//! Decompose cleaned signatures and file paths into identity fields.
//!
//! Signatures follow the Go runtime convention:
//!
//! ```text
//! github.com/org/repo/pkg.(*Type).Method.func1
//! └──────── package ────┘ └receiver┘ └fn┘ └closure┘
//! ```
//!
//! None of these functions fail. When separators are missing the input is
//! returned in the most general field instead.

use crate::utils::config::REPOSITORY_HOST_PREFIXES;

/// Function name and receiver type of a package-relative signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallTarget<'a> {
    pub function: &'a str,
    /// Receiver type with pointer notation removed; empty for free functions
    pub receiver: &'a str,
}

/// Repository identity derived from a hosted package path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryInfo<'a> {
    pub repository: &'a str,
    pub organization: &'a str,
    pub name: &'a str,
}

/// Parent directory of a source file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderInfo<'a> {
    pub folder: &'a str,
    pub folder_name: &'a str,
}

/// Extract the package path from a fully qualified function signature
///
/// **Public** - package path runs up to the first `.` after the last `/`
///
/// Without a `/` the first `.` in the string is used. Without a `.` in that
/// range the whole string is the package path.
///
/// # Example
/// ```
/// use stacktrace_to_graph::parser::parse_package_name;
///
/// assert_eq!(parse_package_name("net/http.(*ServeMux).ServeHTTP"), "net/http");
/// assert_eq!(parse_package_name("github.com/org/repo.Func"), "github.com/org/repo");
/// ```
pub fn parse_package_name(signature: &str) -> &str {
    let search_from = signature.rfind('/').map_or(0, |slash| slash + 1);

    match signature[search_from..].find('.') {
        Some(dot) => &signature[..search_from + dot],
        None => signature,
    }
}

/// Last `/`-delimited segment of a package path
pub fn short_package_name(package: &str) -> &str {
    package.rsplit('/').next().unwrap_or(package)
}

/// Remove the package prefix (and its trailing `.`) from a signature
///
/// **Public** - yields the package-relative form fed to `parse_receiver`
pub fn strip_package<'a>(signature: &'a str, package: &str) -> &'a str {
    match signature.strip_prefix(package) {
        Some(rest) => rest.strip_prefix('.').unwrap_or(rest),
        None => signature,
    }
}

/// Split a package-relative signature into function name and receiver
///
/// **Public** - closure segments (`func1`, `func6.1`) are skipped
///
/// Scanning from the end, the first non-closure segment is the function and
/// the segment before it, if any, is the receiver. When every segment is a
/// closure the last segment is the function and the one before it the
/// receiver.
///
/// # Example
/// ```
/// use stacktrace_to_graph::parser::parse_receiver;
///
/// let target = parse_receiver("(*conn).serve");
/// assert_eq!((target.function, target.receiver), ("serve", "conn"));
///
/// let target = parse_receiver("run.func2");
/// assert_eq!((target.function, target.receiver), ("run", ""));
/// ```
pub fn parse_receiver(signature: &str) -> CallTarget<'_> {
    let segments: Vec<&str> = signature.split('.').collect();

    let mut end = segments.len();
    while let Some(start) = closure_group_start(&segments[..end]) {
        end = start;
    }

    let (function, receiver) = if end == 0 {
        let last = segments.len() - 1;
        (segments[last], last.checked_sub(1).map_or("", |i| segments[i]))
    } else {
        (segments[end - 1], end.checked_sub(2).map_or("", |i| segments[i]))
    };

    CallTarget {
        function,
        receiver: strip_pointer(receiver),
    }
}

/// Find where a trailing `func<N>(.<M>)*` group starts, if the segments end in one
///
/// **Private** - internal helper for parse_receiver
fn closure_group_start(segments: &[&str]) -> Option<usize> {
    let mut index = segments.len();
    while index > 0 && is_digits(segments[index - 1]) {
        index -= 1;
    }

    let head = index.checked_sub(1)?;
    is_closure_name(segments[head]).then_some(head)
}

fn is_closure_name(segment: &str) -> bool {
    segment.strip_prefix("func").is_some_and(is_digits)
}

fn is_digits(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Rewrite `(*Type)` to `Type`
fn strip_pointer(receiver: &str) -> &str {
    receiver
        .strip_prefix("(*")
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(receiver)
}

/// Derive repository identity from a package path on a known host
///
/// **Public** - only `github.com/` and `bitbucket.org/` paths qualify
///
/// * 3 segments: the whole path is the repository, segments 2 and 3 are the
///   organization and name.
/// * More than 3: the repository is the first 3 segments, the organization
///   is segment 2 and the name is the last segment of the full path.
/// * Anything else yields empty fields.
pub fn parse_repository(package: &str) -> RepositoryInfo<'_> {
    if !REPOSITORY_HOST_PREFIXES
        .iter()
        .any(|prefix| package.starts_with(prefix))
    {
        return RepositoryInfo::default();
    }

    let segments: Vec<&str> = package.split('/').collect();
    if segments.len() < 3 {
        return RepositoryInfo::default();
    }

    // The third slash, when present, ends the host/org/name prefix
    let repository_end = package
        .match_indices('/')
        .nth(2)
        .map_or(package.len(), |(index, _)| index);

    RepositoryInfo {
        repository: &package[..repository_end],
        organization: segments[1],
        name: segments[segments.len() - 1],
    }
}

/// Split a file path into its parent folder and the folder's own name
///
/// **Public** - both fields are empty for paths without a `/`
pub fn parse_folder(file: &str) -> FolderInfo<'_> {
    let Some(last_slash) = file.rfind('/') else {
        return FolderInfo::default();
    };

    let folder = &file[..last_slash];
    FolderInfo {
        folder,
        folder_name: folder.rsplit('/').next().unwrap_or(folder),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_package_name() {
        assert_eq!(parse_package_name("net/http.(*ServeMux).ServeHTTP"), "net/http");
        assert_eq!(parse_package_name("github.com/org/repo.Func"), "github.com/org/repo");
        assert_eq!(parse_package_name("main.(*Person).SayHello"), "main");
        assert_eq!(parse_package_name("main.main.func1"), "main");
    }

    #[test]
    fn test_parse_package_name_without_dot() {
        assert_eq!(parse_package_name("github.com/org/repo"), "github.com/org/repo");
        assert_eq!(parse_package_name("runtime"), "runtime");
        assert_eq!(parse_package_name(""), "");
    }

    #[test]
    fn test_short_package_name() {
        assert_eq!(short_package_name("net/http"), "http");
        assert_eq!(short_package_name("main"), "main");
        assert_eq!(short_package_name("github.com/org/repo/internal/db"), "db");
    }

    #[test]
    fn test_strip_package() {
        assert_eq!(strip_package("main.main", "main"), "main");
        assert_eq!(strip_package("net/http.(*conn).serve", "net/http"), "(*conn).serve");
        assert_eq!(strip_package("runtime", "runtime"), "");
    }

    #[test]
    fn test_parse_receiver_pointer() {
        let target = parse_receiver("(*conn).serve");
        assert_eq!(target, CallTarget { function: "serve", receiver: "conn" });
    }

    #[test]
    fn test_parse_receiver_value_receiver() {
        let target = parse_receiver("Person.SayHello");
        assert_eq!(target, CallTarget { function: "SayHello", receiver: "Person" });
    }

    #[test]
    fn test_parse_receiver_free_function() {
        assert_eq!(parse_receiver("main"), CallTarget { function: "main", receiver: "" });
    }

    #[test]
    fn test_parse_receiver_skips_closures() {
        assert_eq!(parse_receiver("run.func2"), CallTarget { function: "run", receiver: "" });
        assert_eq!(
            parse_receiver("(*Server).Serve.func6.1"),
            CallTarget { function: "Serve", receiver: "Server" }
        );
        assert_eq!(
            parse_receiver("handler.func1.func2"),
            CallTarget { function: "handler", receiver: "" }
        );
    }

    #[test]
    fn test_parse_receiver_all_closures() {
        assert_eq!(parse_receiver("func1"), CallTarget { function: "func1", receiver: "" });
        assert_eq!(parse_receiver("func3.2"), CallTarget { function: "2", receiver: "func3" });
    }

    #[test]
    fn test_digits_without_closure_are_kept() {
        // `init.0` is a numbered init function, not a closure
        assert_eq!(parse_receiver("init.0"), CallTarget { function: "0", receiver: "init" });
    }

    #[test]
    fn test_function_named_like_closure_prefix() {
        assert_eq!(
            parse_receiver("funcA.func1"),
            CallTarget { function: "funcA", receiver: "" }
        );
    }

    #[test]
    fn test_parse_repository_exact() {
        assert_eq!(
            parse_repository("github.com/org/repo"),
            RepositoryInfo {
                repository: "github.com/org/repo",
                organization: "org",
                name: "repo",
            }
        );
    }

    #[test]
    fn test_parse_repository_subpackage_uses_last_segment() {
        assert_eq!(
            parse_repository("bitbucket.org/team/mono/services/billing"),
            RepositoryInfo {
                repository: "bitbucket.org/team/mono",
                organization: "team",
                name: "billing",
            }
        );
    }

    #[test]
    fn test_parse_repository_unknown_or_short() {
        assert_eq!(parse_repository("gitlab.com/org/repo"), RepositoryInfo::default());
        assert_eq!(parse_repository("github.com/org"), RepositoryInfo::default());
        assert_eq!(parse_repository("net/http"), RepositoryInfo::default());
    }

    #[test]
    fn test_parse_folder() {
        assert_eq!(
            parse_folder("/path/to/file/main.go"),
            FolderInfo { folder: "/path/to/file", folder_name: "file" }
        );
        assert_eq!(parse_folder("main.go"), FolderInfo::default());
        assert_eq!(parse_folder("/main.go"), FolderInfo { folder: "", folder_name: "" });
    }
}
