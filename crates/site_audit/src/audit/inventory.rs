use crate::runtime::error::{AuditError, AuditResult};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Named set of directory entries.
///
/// Iteration is lexicographic so every classification that depends on "first entry found" is
/// reproducible across filesystems.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AssetInventory {
    names: BTreeSet<String>,
}

impl AssetInventory {
    /// List the entries directly under `dir` (non-recursive).
    ///
    /// A missing path, or a path that is not a directory, is a fatal inventory error.
    pub fn scan(dir: &Path) -> AuditResult<Self> {
        if !dir.is_dir() {
            return Err(AuditError::directory_not_found(dir)
                .with_operation("scan inventory")
                .with_hint("pass --root or point the directory keys in site-audit.toml at it"));
        }
        let entries = fs::read_dir(dir).map_err(|err| {
            AuditError::io(format!("failed to list {}: {err}", dir.display())).with_path(dir)
        })?;

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|err| {
                AuditError::io(format!("failed to list {}: {err}", dir.display())).with_path(dir)
            })?;
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
        tracing::debug!(dir = %dir.display(), entries = names.len(), "scanned inventory");
        Ok(Self { names })
    }

    /// Build an inventory from known names, without touching the filesystem.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Entries whose final extension matches one of `extensions`, ignoring ASCII case.
    pub fn with_extensions<'a>(
        &'a self,
        extensions: &'a [String],
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.iter().filter(move |name| {
            extension(name).is_some_and(|ext| {
                extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Filename with its final extension removed.
pub fn base_name(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(base, _)| base)
}

/// Final extension of a filename, without the dot.
pub fn extension(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// A regional page and its full markup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageDocument {
    pub name: String,
    pub text: String,
}

impl PageDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Load every inventory entry with the given page extension, in inventory order.
    ///
    /// Markup is decoded lossily, so pages in a legacy encoding are still checked. Subdirectories
    /// that happen to carry the extension are skipped, as are pages that cannot be read.
    pub fn load_all(dir: &Path, inventory: &AssetInventory, page_extension: &str) -> Vec<Self> {
        let mut pages = Vec::new();
        for name in inventory.iter() {
            if extension(name) != Some(page_extension) {
                continue;
            }
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            match fs::read(&path) {
                Ok(bytes) => pages.push(Self::new(name, String::from_utf8_lossy(&bytes))),
                Err(err) => {
                    tracing::warn!(page = %path.display(), error = %err, "skipping unreadable page")
                }
            }
        }
        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::AuditErrorCategory;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_root() -> PathBuf {
        std::env::temp_dir().join(format!(
            "site-audit-inventory-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    #[test]
    fn scan_lists_entries_sorted_and_non_recursive() {
        let root = unique_temp_root();
        fs::create_dir_all(root.join("nested")).expect("create dirs");
        fs::write(root.join("b-wtf-logo.png"), "").expect("write b");
        fs::write(root.join("a-wtf-logo.svg"), "").expect("write a");
        fs::write(root.join("nested/deep.png"), "").expect("write deep");

        let inventory = AssetInventory::scan(&root).expect("scan");
        let names: Vec<&str> = inventory.iter().collect();
        assert_eq!(names, vec!["a-wtf-logo.svg", "b-wtf-logo.png", "nested"]);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn scan_rejects_missing_directory_and_plain_files() {
        let root = unique_temp_root();
        let err = AssetInventory::scan(&root.join("absent")).expect_err("missing dir");
        assert_eq!(err.category, AuditErrorCategory::Inventory);
        assert!(err.hint.as_deref().is_some_and(|hint| hint.contains("--root")));

        fs::create_dir_all(&root).expect("create root");
        fs::write(root.join("file.txt"), "x").expect("write file");
        let err = AssetInventory::scan(&root.join("file.txt")).expect_err("not a dir");
        assert_eq!(err.category, AuditErrorCategory::Inventory);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn base_name_strips_only_the_final_extension() {
        assert_eq!(base_name("germany-wtf-logo.png"), "germany-wtf-logo");
        assert_eq!(base_name("archive.tar.gz"), "archive.tar");
        assert_eq!(base_name("README"), "README");
        assert_eq!(extension("README"), None);
        assert_eq!(extension("flag.PNG"), Some("PNG"));
    }

    #[test]
    fn with_extensions_ignores_case() {
        let inventory = AssetInventory::from_names(["a.PNG", "b.png", "c.jpg", "d.svg", "e"]);
        let extensions = vec!["png".to_string()];
        let matched: Vec<&str> = inventory.with_extensions(&extensions).collect();
        assert_eq!(matched, vec!["a.PNG", "b.png"]);
    }

    #[test]
    fn load_all_reads_only_pages_with_the_extension() {
        let root = unique_temp_root();
        fs::create_dir_all(root.join("old.html")).expect("create decoy dir");
        fs::write(root.join("france.html"), "<h1>France</h1>").expect("write page");
        fs::write(root.join("notes.txt"), "ignore me").expect("write notes");

        let inventory = AssetInventory::scan(&root).expect("scan");
        let pages = PageDocument::load_all(&root, &inventory, "html");
        assert_eq!(pages, vec![PageDocument::new("france.html", "<h1>France</h1>")]);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn load_all_decodes_legacy_encoded_markup() {
        let root = unique_temp_root();
        fs::create_dir_all(&root).expect("create root");
        fs::write(root.join("spain.html"), b"<h1>Espa\xf1a</h1>").expect("write page");

        let inventory = AssetInventory::scan(&root).expect("scan");
        let pages = PageDocument::load_all(&root, &inventory, "html");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].name, "spain.html");
        assert!(pages[0].text.starts_with("<h1>Espa"));
        assert!(pages[0].text.ends_with("a</h1>"));

        let _ = fs::remove_dir_all(root);
    }
}
