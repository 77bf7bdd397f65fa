use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DelegateError {
    #[error("flex delegate allocation failed")]
    AllocationFailure,
    #[error("null delegate handle")]
    NullHandle,
    #[error("flex delegate library not found (tried {})", join_paths(.tried))]
    LibraryNotFound { tried: Vec<PathBuf> },
    #[error("failed to resolve symbol {symbol} in {}: {source}", .path.display())]
    MissingSymbol {
        symbol: &'static str,
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("flex delegate runtime unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, DelegateError>;

fn join_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no candidates".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_not_found_lists_candidates() {
        let err = DelegateError::LibraryNotFound {
            tried: vec![PathBuf::from("a.so"), PathBuf::from("b.so")],
        };
        assert_eq!(
            err.to_string(),
            "flex delegate library not found (tried a.so, b.so)"
        );
    }

    #[test]
    fn test_library_not_found_without_candidates() {
        let err = DelegateError::LibraryNotFound { tried: vec![] };
        assert!(err.to_string().contains("no candidates"));
    }
}
