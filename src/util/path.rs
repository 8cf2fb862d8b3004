use std::path::{Path, PathBuf};

/// Expand environment variables in a path string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
///
/// Unknown variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Expand a user-supplied path (CLI arguments).
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(expand_env_vars(path.to_string_lossy().as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_tilde_when_expanding_then_not_left_verbatim() {
        let expanded = expand_env_vars("~/inventory.json");
        assert!(expanded.ends_with("inventory.json"));
        if std::env::var("HOME").is_ok() {
            assert!(!expanded.starts_with('~'));
        }
    }

    #[test]
    fn given_unknown_variable_when_expanding_then_returns_input() {
        let input = "$LOGWALL_SURELY_UNSET_VARIABLE_123/x.json";
        assert_eq!(expand_env_vars(input), input);
    }

    #[test]
    fn given_plain_path_when_expanding_then_unchanged() {
        assert_eq!(expand_path(Path::new("/tmp/a.json")), PathBuf::from("/tmp/a.json"));
    }
}
