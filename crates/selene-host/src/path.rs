use std::path::{Path, PathBuf};

/// Script loaded from the base path in interactive mode.
pub const DEFAULT_ENTRY: &str = "main.lua";

/// Normalizes a base directory so it ends in exactly one separator.
///
/// Trailing `/` and `\` are collapsed and replaced by a single `/`. An empty
/// input yields `"./"`. Normalizing twice gives the same result.
pub fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        return if path.is_empty() { "./".to_string() } else { "/".to_string() };
    }
    let mut out = String::with_capacity(trimmed.len() + 1);
    out.push_str(trimmed);
    out.push('/');
    out
}

/// Picks the directory scripts are loaded from.
///
/// An explicit positional argument is joined onto the working directory.
/// Without one, the working directory wins when it holds [`DEFAULT_ENTRY`];
/// otherwise the executable's directory is used.
pub fn resolve_base_path(positional: Option<&str>, cwd: &Path, exe_dir: &Path) -> PathBuf {
    match positional {
        Some(p) => cwd.join(p),
        None if cwd.join(DEFAULT_ENTRY).is_file() => cwd.to_path_buf(),
        None => exe_dir.to_path_buf(),
    }
}

/// Script path for interpret mode: the file name joined onto the working
/// directory.
pub fn interpret_path(cwd: &Path, file: &str) -> PathBuf {
    cwd.join(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_separator() {
        assert_eq!(normalize_base_path("/games/pong"), "/games/pong/");
        assert_eq!(normalize_base_path("C:\\games"), "C:\\games/");
    }

    #[test]
    fn collapses_trailing_separators() {
        assert_eq!(normalize_base_path("/games//"), "/games/");
        assert_eq!(normalize_base_path("C:\\games\\"), "C:\\games/");
        assert_eq!(normalize_base_path("/"), "/");
    }

    #[test]
    fn empty_becomes_current_dir() {
        assert_eq!(normalize_base_path(""), "./");
    }

    #[test]
    fn normalization_is_idempotent() {
        for p in ["", "/", "a", "a/", "a\\\\", "/x/y/z", "rel/dir//", "C:\\w\\"] {
            let once = normalize_base_path(p);
            assert_eq!(normalize_base_path(&once), once, "input {p:?}");
            assert!(!once.is_empty());
            assert!(once.ends_with('/'));
            assert!(!once[..once.len() - 1].ends_with(['/', '\\']) || once == "/");
        }
    }

    #[test]
    fn positional_is_joined_onto_cwd() {
        let p = resolve_base_path(Some("game"), Path::new("/work"), Path::new("/opt/selene"));
        assert_eq!(p, PathBuf::from("/work/game"));
    }

    #[test]
    fn cwd_with_entry_wins_over_exe_dir() {
        let dir = std::env::temp_dir().join(format!("selene-path-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let exe = Path::new("/opt/selene");

        assert_eq!(resolve_base_path(None, &dir, exe), exe);

        std::fs::write(dir.join(DEFAULT_ENTRY), "-- entry").unwrap();
        assert_eq!(resolve_base_path(None, &dir, exe), dir);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn interpret_path_joins_file() {
        assert_eq!(interpret_path(Path::new("/work"), "tool.lua"), PathBuf::from("/work/tool.lua"));
    }
}
