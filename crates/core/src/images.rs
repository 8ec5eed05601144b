//! Image path resolution for quotes.
//!
//! A quote displays its own image when it names one. Otherwise it borrows its
//! category's fallback asset (`fb_{category}.file`), but only when that asset
//! is actually present in the pictures directory. Presence is read from a
//! snapshot taken by [`ImageResolver::scan`] / [`ImageResolver::refresh`], so
//! resolving a row never touches the filesystem.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// URL prefix under which picture assets are served.
pub const PICTURES_ROUTE: &str = "/pictures";

/// Extension every stored picture carries.
pub const PICTURE_EXTENSION: &str = "file";

/// Filename prefix marking a category fallback asset.
pub const FALLBACK_PREFIX: &str = "fb_";

/// Public path for a picture name: `/pictures/{name}.file`.
pub fn picture_path(name: &str) -> String {
    format!("{PICTURES_ROUTE}/{name}.{PICTURE_EXTENSION}")
}

/// Picture name of the fallback asset for a category.
pub fn fallback_name(category: &str) -> String {
    format!("{FALLBACK_PREFIX}{category}")
}

/// Resolve the displayed image path of a quote.
///
/// Inputs are already normalized: blank values are `None`. The result is
/// empty when the quote has neither an explicit image nor an available
/// category fallback.
pub fn resolve_image(
    explicit: Option<&str>,
    category: Option<&str>,
    has_fallback: impl Fn(&str) -> bool,
) -> String {
    if let Some(name) = explicit {
        return picture_path(name);
    }
    match category {
        Some(category) if has_fallback(category) => picture_path(&fallback_name(category)),
        _ => String::new(),
    }
}

/// Resolves quote images against a cached index of category fallback assets.
#[derive(Debug)]
pub struct ImageResolver {
    dir: PathBuf,
    fallbacks: RwLock<HashSet<String>>,
}

impl ImageResolver {
    /// Build a resolver for `dir` and index its fallback assets.
    ///
    /// A missing directory yields an empty index rather than an error, so the
    /// service can start before any picture is uploaded.
    pub fn scan(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let resolver = Self {
            dir: dir.into(),
            fallbacks: RwLock::new(HashSet::new()),
        };
        resolver.refresh()?;
        Ok(resolver)
    }

    /// Rescan the pictures directory and replace the fallback index.
    ///
    /// Returns the number of categories with a fallback asset.
    pub fn refresh(&self) -> io::Result<usize> {
        let found = match index_fallbacks(&self.dir) {
            Ok(found) => found,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(dir = %self.dir.display(), "Pictures directory does not exist");
                HashSet::new()
            }
            Err(e) => return Err(e),
        };

        let count = found.len();
        *self
            .fallbacks
            .write()
            .unwrap_or_else(PoisonError::into_inner) = found;

        tracing::debug!(dir = %self.dir.display(), count, "Indexed category fallback images");
        Ok(count)
    }

    /// Directory the assets are served from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn has_fallback(&self, category: &str) -> bool {
        self.fallbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(category)
    }

    /// Resolve the displayed image path of a quote. See [`resolve_image`].
    pub fn resolve(&self, explicit: Option<&str>, category: Option<&str>) -> String {
        let fallbacks = self
            .fallbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        resolve_image(explicit, category, |c| fallbacks.contains(c))
    }
}

/// Collect the category keys of every `fb_{category}.file` regular file in `dir`.
fn index_fallbacks(dir: &Path) -> io::Result<HashSet<String>> {
    let suffix = format!(".{PICTURE_EXTENSION}");
    let mut found = HashSet::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let category = file_name
            .strip_prefix(FALLBACK_PREFIX)
            .and_then(|rest| rest.strip_suffix(suffix.as_str()));
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            found.insert(category.to_string());
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pictures_with(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in files {
            std::fs::write(dir.path().join(name), b"img").unwrap();
        }
        dir
    }

    #[test]
    fn explicit_image_uses_path_template() {
        assert_eq!(picture_path("sunset"), "/pictures/sunset.file");
        assert_eq!(
            resolve_image(Some("sunset"), None, |_| false),
            "/pictures/sunset.file"
        );
    }

    #[test]
    fn explicit_image_ignores_category() {
        let with_fallback = resolve_image(Some("sunset"), Some("1"), |_| true);
        let without_fallback = resolve_image(Some("sunset"), Some("2"), |_| false);
        let no_category = resolve_image(Some("sunset"), None, |_| true);
        assert_eq!(with_fallback, without_fallback);
        assert_eq!(with_fallback, no_category);
    }

    #[test]
    fn missing_image_falls_back_to_category_asset() {
        assert_eq!(
            resolve_image(None, Some("3"), |c| c == "3"),
            "/pictures/fb_3.file"
        );
    }

    #[test]
    fn no_fallback_asset_resolves_to_empty() {
        assert_eq!(resolve_image(None, Some("3"), |_| false), "");
        assert_eq!(resolve_image(None, None, |_| true), "");
    }

    #[test]
    fn scan_indexes_only_fallback_files() {
        let dir = pictures_with(&["fb_1.file", "fb_2.file", "fb_.file", "sunset.file", "fb_3.png"]);
        std::fs::create_dir(dir.path().join("fb_9.file")).unwrap();

        let resolver = ImageResolver::scan(dir.path()).unwrap();

        assert!(resolver.has_fallback("1"));
        assert!(resolver.has_fallback("2"));
        assert!(!resolver.has_fallback("3"));
        assert!(!resolver.has_fallback("9"));
        assert!(!resolver.has_fallback(""));
    }

    #[test]
    fn resolver_uses_snapshot_until_refresh() {
        let dir = pictures_with(&["fb_1.file"]);
        let resolver = ImageResolver::scan(dir.path()).unwrap();

        std::fs::write(dir.path().join("fb_2.file"), b"img").unwrap();
        assert_eq!(resolver.resolve(None, Some("2")), "");

        assert_eq!(resolver.refresh().unwrap(), 2);
        assert_eq!(resolver.resolve(None, Some("2")), "/pictures/fb_2.file");
    }

    #[test]
    fn missing_directory_yields_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = ImageResolver::scan(dir.path().join("absent")).unwrap();
        assert_eq!(resolver.resolve(None, Some("1")), "");
    }
}
