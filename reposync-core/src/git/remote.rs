//! Identity derivation from a remote locator
//!
//! Remotes may use URL syntax (`https://host/org/proj.git`) or scp-like syntax
//! (`git@host:org/proj.git`). No parsing beyond segment splitting is done.

/// Suffix carried by most git remotes
const GIT_SUFFIX: &str = ".git";

fn strip_git_suffix(segment: &str) -> &str {
    segment.strip_suffix(GIT_SUFFIX).unwrap_or(segment)
}

/// Short name of the repository: the last `/` segment without `.git`
///
/// A remote without any `/` yields the whole string.
pub fn repo_name(remote: &str) -> &str {
    let last = remote.rsplit('/').next().unwrap_or(remote);
    strip_git_suffix(last)
}

/// Display path of the repository: everything after the last `:` without `.git`
///
/// `git@host:org/proj.git` gives `org/proj`. For URL remotes this is the part
/// after the scheme separator, e.g. `//host/org/proj`.
pub fn repo_path(remote: &str) -> &str {
    let last = remote.rsplit(':').next().unwrap_or(remote);
    strip_git_suffix(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scp_like_remote() {
        let remote = "git@host:org/proj.git";
        assert_eq!(repo_name(remote), "proj");
        assert_eq!(repo_path(remote), "org/proj");
    }

    #[test]
    fn test_https_remote() {
        let remote = "https://github.com/org/proj.git";
        assert_eq!(repo_name(remote), "proj");
        assert_eq!(repo_path(remote), "//github.com/org/proj");
    }

    #[test]
    fn test_without_suffix() {
        assert_eq!(repo_name("https://github.com/org/proj"), "proj");
        assert_eq!(repo_path("git@host:org/proj"), "org/proj");
    }

    #[test]
    fn test_local_path_remote() {
        assert_eq!(repo_name("/srv/git/tools.git"), "tools");
        assert_eq!(repo_path("/srv/git/tools.git"), "/srv/git/tools");
    }

    #[test]
    fn test_no_separators_yields_whole_string() {
        assert_eq!(repo_name("proj"), "proj");
        assert_eq!(repo_path("proj"), "proj");
        assert_eq!(repo_name("proj.git"), "proj");
    }

    #[test]
    fn test_only_trailing_suffix_is_stripped() {
        assert_eq!(repo_name("git@host:org/my.github.io.git"), "my.github.io");
        assert_eq!(repo_name("git@host:org/.gitconfig"), ".gitconfig");
    }
}
