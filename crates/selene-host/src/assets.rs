use std::borrow::Cow;
use std::path::PathBuf;

/// Failure to locate or read an asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found (tried {tried:?})")]
    NotFound { tried: Vec<PathBuf> },
}

/// Where an asset's bytes come from. Chosen once at build configuration.
#[derive(Debug, Clone)]
pub enum AssetSource {
    /// Bytes compiled into the binary.
    Embedded(&'static [u8]),
    /// Candidate files probed in order; the first readable one wins.
    Filesystem(Vec<PathBuf>),
}

impl AssetSource {
    /// Probes `relative` under the executable's directory, then the working
    /// directory.
    pub fn probe(relative: &str) -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.to_path_buf()));
        let cwd = std::env::current_dir().ok();
        let candidates = exe_dir.into_iter().chain(cwd).map(|d| d.join(relative)).collect();
        AssetSource::Filesystem(candidates)
    }

    pub fn try_load(&self) -> Result<Cow<'static, [u8]>, AssetError> {
        match self {
            AssetSource::Embedded(bytes) => Ok(Cow::Borrowed(*bytes)),
            AssetSource::Filesystem(candidates) => candidates
                .iter()
                .find_map(|p| {
                    let bytes = std::fs::read(p).ok()?;
                    log::info!("asset: loaded {}", p.display());
                    Some(Cow::Owned(bytes))
                })
                .ok_or_else(|| AssetError::NotFound { tried: candidates.clone() }),
        }
    }

    pub fn load(&self) -> Option<Cow<'static, [u8]>> {
        self.try_load()
            .map_err(|e| log::debug!("asset: {e}"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_is_borrowed() {
        static BYTES: &[u8] = b"font";
        let got = AssetSource::Embedded(BYTES).load().unwrap();
        assert!(matches!(got, Cow::Borrowed(_)));
        assert_eq!(&*got, b"font");
    }

    #[test]
    fn first_readable_candidate_wins() {
        let dir = std::env::temp_dir().join(format!("selene-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let second = dir.join("b.bin");
        std::fs::write(&second, b"second").unwrap();

        let source = AssetSource::Filesystem(vec![dir.join("missing.bin"), second]);
        assert_eq!(&*source.load().unwrap(), b"second");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_reports_candidates() {
        let source = AssetSource::Filesystem(vec![PathBuf::from("/nonexistent/selene/x")]);
        let err = source.try_load().unwrap_err();
        let AssetError::NotFound { tried } = err;
        assert_eq!(tried.len(), 1);
        assert!(source.load().is_none());
    }

    #[test]
    fn probe_lists_exe_dir_first() {
        let AssetSource::Filesystem(c) = AssetSource::probe("fonts/default.ttf") else {
            panic!("probe must be a filesystem source");
        };
        assert!(!c.is_empty());
        assert!(c.iter().all(|p| p.ends_with("fonts/default.ttf")));
    }
}
