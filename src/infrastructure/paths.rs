//! Path helpers for the Zellij sandbox.

use std::path::PathBuf;

/// Name of the OTLP trace file inside [`get_data_dir`].
pub const TRACE_FILE_NAME: &str = "apidex-otlp.json";

/// Returns the plugin data directory, `/host/.local/share/zellij/apidex`.
///
/// `/host` points to the cwd of the last focused terminal, which is usually
/// the user's home directory.
///
/// ```
/// use apidex::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/apidex"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("apidex")
}

/// Location of the rotated OTLP trace file.
#[must_use]
pub fn trace_file_path() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Maps `~` to the sandbox mount of the host home directory.
///
/// ```
/// use apidex::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_of_another_user_is_left_alone() {
        assert_eq!(expand_tilde("~bob/theme.toml"), "~bob/theme.toml");
    }

    #[test]
    fn trace_file_lives_in_data_dir() {
        assert!(trace_file_path().starts_with(get_data_dir()));
        assert!(trace_file_path().ends_with(TRACE_FILE_NAME));
    }
}
