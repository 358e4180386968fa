use std::path::{Path, PathBuf};

use thiserror::Error;

/// Reads a shader file. Failures are logged and produce an empty source.
pub fn load_source<P: AsRef<Path>>(path: P) -> String {
    match try_load_source(path) {
        Ok(src) => src,
        Err(e) => {
            log::error!("{e}");
            String::new()
        }
    }
}

pub fn try_load_source<P: AsRef<Path>>(path: P) -> Result<String, SourceError> {
    let path = path.as_ref();

    std::fs::read_to_string(path).map_err(|e| SourceError::Read(path.to_owned(), e))
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read shader source {0:?}: {1}")]
    Read(PathBuf, std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shader_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../res/shaders")
    }

    #[test]
    fn missing_file_is_empty() {
        let src = load_source(shader_dir().join("does_not_exist.vert"));

        assert!(src.is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let path = shader_dir().join("does_not_exist.frag");
        let err = try_load_source(&path).unwrap_err();

        let SourceError::Read(reported, _) = &err;
        assert_eq!(reported, &path);
    }

    #[test]
    fn reads_existing_file() {
        let src = load_source(shader_dir().join("basic.vert"));

        assert!(src.starts_with("#version 330 core"));
        assert!(src.contains("void main()"));
    }
}
