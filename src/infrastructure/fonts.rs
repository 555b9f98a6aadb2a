//! Font discovery
//!
//! A fonts directory is scanned once per process; later renders reuse the
//! cached catalog and the loaded font bytes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::{debug, warn};
use walkdir::WalkDir;

const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

/// Appended to a family name to find its bold face, e.g. `arialbd`, `Arial Bold`.
pub const BOLD_SUFFIXES: [&str; 3] = ["bd", " Bold", "-Bold"];

/// Font files found below one directory.
#[derive(Debug)]
pub struct FontCatalog {
    directory: PathBuf,
    files: Vec<PathBuf>,
    loaded: Mutex<HashMap<String, Option<Arc<[u8]>>>>,
}

impl FontCatalog {
    /// Walk `directory` for `.ttf`/`.otf` files. A missing directory yields
    /// an empty catalog.
    pub fn scan(directory: &Path) -> Self {
        let mut files: Vec<PathBuf> = WalkDir::new(directory)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_font_file(path))
            .collect();
        files.sort();
        debug!(
            "font scan: {} font files in {}",
            files.len(),
            directory.display()
        );
        Self {
            directory: directory.to_path_buf(),
            files,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Best file for `family`: exact stem match first (case-insensitive),
    /// otherwise the shortest stem starting with the family name that is not
    /// one of its bold faces.
    pub fn find(&self, family: &str) -> Option<&Path> {
        let wanted = normalize(family);
        if wanted.is_empty() {
            return None;
        }
        let stem = |path: &Path| {
            path.file_stem()
                .map(|s| normalize(&s.to_string_lossy()))
                .unwrap_or_default()
        };
        let bold_faces: Vec<String> = BOLD_SUFFIXES
            .iter()
            .map(|suffix| format!("{wanted}{}", normalize(suffix)))
            .collect();
        let is_bold_face = |stem: &str| bold_faces.iter().any(|bold| stem.starts_with(bold.as_str()));

        self.files
            .iter()
            .find(|path| stem(path) == wanted)
            .or_else(|| {
                self.files
                    .iter()
                    .map(|path| (path, stem(path)))
                    .filter(|(_, s)| s.starts_with(&wanted) && !is_bold_face(s))
                    .min_by_key(|(_, s)| s.len())
                    .map(|(path, _)| path)
            })
            .map(PathBuf::as_path)
    }

    /// Font bytes for `family`, read once and shared afterwards.
    pub fn load(&self, family: &str) -> Option<Arc<[u8]>> {
        let key = family.to_lowercase();
        let mut loaded = self.loaded.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = loaded.get(&key) {
            return cached.clone();
        }

        let bytes = self.find(family).and_then(|path| match std::fs::read(path) {
            Ok(bytes) => {
                debug!("font {} loaded from {}", family, path.display());
                Some(Arc::<[u8]>::from(bytes))
            }
            Err(e) => {
                warn!("cannot read font {}: {}", path.display(), e);
                None
            }
        });
        loaded.insert(key, bytes.clone());
        bytes
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "")
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| FONT_EXTENSIONS.contains(&ext.as_str()))
}

fn catalogs() -> &'static Mutex<HashMap<PathBuf, Arc<FontCatalog>>> {
    static CATALOGS: OnceLock<Mutex<HashMap<PathBuf, Arc<FontCatalog>>>> = OnceLock::new();
    CATALOGS.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Shared catalog for `directory`, scanning it on first use only.
pub fn catalog_for(directory: &Path) -> Arc<FontCatalog> {
    let mut catalogs = catalogs().lock().unwrap_or_else(|e| e.into_inner());
    catalogs
        .entry(directory.to_path_buf())
        .or_insert_with(|| Arc::new(FontCatalog::scan(directory)))
        .clone()
}
