use std::path::PathBuf;

/// Expands a leading `~` or `~/` against `$HOME`. Anything else, including
/// `~user` forms, passes through untouched.
pub fn expand_home_path(path: &str) -> PathBuf {
    let suffix = match path {
        "~" => Some(""),
        _ => path.strip_prefix("~/"),
    };
    match (suffix, std::env::var("HOME")) {
        (Some(""), Ok(home)) => PathBuf::from(home),
        (Some(rest), Ok(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_pass_through() {
        assert_eq!(expand_home_path("/tmp/exports"), PathBuf::from("/tmp/exports"));
        assert_eq!(expand_home_path("relative/dir"), PathBuf::from("relative/dir"));
        assert_eq!(expand_home_path("~user/dir"), PathBuf::from("~user/dir"));
    }

    #[test]
    fn tilde_prefix_expands_against_home() {
        let expanded = expand_home_path("~/exports");
        let text = expanded.to_string_lossy();
        assert!(!text.starts_with('~'));
        assert!(text.ends_with("/exports"));
    }
}
