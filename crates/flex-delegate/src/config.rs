use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable holding extra library paths, searched before the defaults.
///
/// Uses the platform path-list separator (`:` on Unix, `;` on Windows).
pub const PATH_ENV: &str = "TFLITE_FLEX_DELEGATE_PATH";

#[cfg(target_os = "macos")]
const DEFAULT_LIBRARIES: &[&str] = &["libflex_delegate.dylib", "libtensorflowlite_flex.dylib"];

#[cfg(windows)]
const DEFAULT_LIBRARIES: &[&str] = &["flex_delegate.dll", "tensorflowlite_flex.dll"];

#[cfg(not(any(target_os = "macos", windows)))]
const DEFAULT_LIBRARIES: &[&str] = &["libflex_delegate.so", "libtensorflowlite_flex.so"];

/// Where to look for the flex delegate shared library.
///
/// Candidates are tried in order; the first one that opens wins. Bare file
/// names go through the platform's dynamic loader search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    candidates: Vec<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARIES.iter().map(PathBuf::from).collect())
    }
}

impl LoaderConfig {
    /// Create a config with exactly the given candidates.
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// Default candidates, preceded by any paths listed in `TFLITE_FLEX_DELEGATE_PATH`.
    pub fn from_env() -> Self {
        Self::from_env_value(env::var_os(PATH_ENV))
    }

    fn from_env_value(value: Option<OsString>) -> Self {
        let mut config = Self::default();
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            let mut extra: Vec<PathBuf> = env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            extra.append(&mut config.candidates);
            config.candidates = extra;
        }
        config
    }

    /// Prepend a candidate so it is tried first.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidates.insert(0, path.into());
        self
    }

    /// The candidates in search order.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_candidates() {
        let config = LoaderConfig::default();
        assert_eq!(config.candidates().len(), DEFAULT_LIBRARIES.len());
        assert!(config
            .candidates()
            .iter()
            .any(|p| p.to_string_lossy().contains("flex")));
    }

    #[test]
    fn test_flex_delegate_library_is_tried_first() {
        let config = LoaderConfig::default();
        let first = config.candidates()[0].to_string_lossy().into_owned();
        assert!(first.contains("flex_delegate"), "first candidate was {}", first);
    }

    #[test]
    fn test_env_paths_come_first() {
        let value = env::join_paths(["/opt/tf/a.so", "/opt/tf/b.so"]).unwrap();
        let config = LoaderConfig::from_env_value(Some(value));
        let candidates = config.candidates();
        assert_eq!(candidates[0], PathBuf::from("/opt/tf/a.so"));
        assert_eq!(candidates[1], PathBuf::from("/opt/tf/b.so"));
        assert_eq!(candidates.len(), 2 + DEFAULT_LIBRARIES.len());
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let config = LoaderConfig::from_env_value(Some(OsString::new()));
        assert_eq!(config, LoaderConfig::default());
        assert_eq!(LoaderConfig::from_env_value(None), LoaderConfig::default());
    }

    #[test]
    fn test_with_path_prepends() {
        let config = LoaderConfig::new(vec![PathBuf::from("b.so")]).with_path("a.so");
        assert_eq!(
            config.candidates(),
            &[PathBuf::from("a.so"), PathBuf::from("b.so")]
        );
    }
}
