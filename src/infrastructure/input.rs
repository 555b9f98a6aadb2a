//! Loading analysis results from JSON documents

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::FileSystem;

/// Read and deserialize a JSON document.
///
/// Works for `ScalarResult`, `DistributionResult` and plain `Vec<f64>`.
pub fn load_json<T: DeserializeOwned>(fs: &dyn FileSystem, path: &Path) -> InfraResult<T> {
    debug!("load_json: {}", path.display());
    let content = fs
        .read_to_string(path)
        .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
    serde_json::from_str(&content).map_err(|e| InfraError::parse(path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScalarResult;
    use crate::infrastructure::traits::RealFileSystem;
    use tempfile::TempDir;

    #[test]
    fn given_result_file_when_loading_then_parsed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("length.json");
        std::fs::write(
            &path,
            r#"{"axon_result": 120.0, "basal_dendrites_result": [80.0, 95.0], "apical_dendrite_result": null}"#,
        )
        .unwrap();

        let result: ScalarResult = load_json(&RealFileSystem, &path).unwrap();

        assert_eq!(result.present_count(), 3);
    }

    #[test]
    fn given_missing_file_when_loading_then_io_error() {
        let err = load_json::<ScalarResult>(&RealFileSystem, Path::new("/nonexistent.json"))
            .unwrap_err();
        assert!(matches!(err, InfraError::Io { .. }));
    }

    #[test]
    fn given_malformed_json_when_loading_then_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{ axon_result: ").unwrap();

        let err = load_json::<ScalarResult>(&RealFileSystem, &path).unwrap_err();
        assert!(matches!(err, InfraError::Parse { .. }));
    }
}
