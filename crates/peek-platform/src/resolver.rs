//! File picking and loading.

use std::fs;
use std::path::{Path, PathBuf};

use peek_core::config::FileConfig;
use peek_core::{
    CoreError, CoreResult, FileKind, ImageHandle, OpenedFile, PlatformError, check_texture_budget,
};
use rfd::FileDialog;

/// Extensions opened as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Extensions offered by the "Text/Source" dialog filter and stepped
/// through as text neighbors. Any other file still opens as text.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "rs", "py", "toml", "md", "json", "js", "html", "css",
];

/// Returns true if `path` has an image extension (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Classifies a path for folder stepping; `None` for files that are
/// neither a known text nor a known image type.
pub fn file_kind(path: &Path) -> Option<FileKind> {
    if is_supported_image(path) {
        return Some(FileKind::Image);
    }
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    TEXT_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(FileKind::Text)
}

/// Resolves files from native dialogs and the local filesystem.
#[derive(Debug, Clone)]
pub struct NativeResolver {
    limits: FileConfig,
}

impl NativeResolver {
    pub fn new(limits: FileConfig) -> Self {
        Self { limits }
    }

    /// Loads a file, refusing anything over the configured limits.
    pub fn load(&self, path: &Path) -> CoreResult<OpenedFile> {
        let display_path = path.to_string_lossy().to_string();

        if let Ok(metadata) = fs::metadata(path)
            && metadata.len() > self.limits.max_file_size_bytes
        {
            return Err(CoreError::FileTooLarge {
                size: metadata.len(),
                limit_mb: self.limits.max_file_size_bytes as f64 / 1_000_000.0,
            });
        }

        if is_supported_image(path) {
            let (width, height) = image::image_dimensions(path)
                .map_err(|e| CoreError::Platform(PlatformError::Image(e.to_string())))?;
            check_texture_budget(width, height, self.limits.max_image_texture_bytes)?;
            tracing::debug!("Read image {} ({}x{})", display_path, width, height);
            return Ok(OpenedFile::Image {
                image: ImageHandle {
                    location: file_url(path),
                    width,
                    height,
                },
                path: display_path,
                handle: None,
            });
        }

        let bytes = fs::read(path).map_err(|e| CoreError::FileRead {
            path: display_path.clone(),
            message: e.to_string(),
        })?;
        Ok(OpenedFile::Text {
            path: display_path,
            content: String::from_utf8_lossy(&bytes).into_owned(),
            handle: None,
        })
    }

    fn pick(&self) -> Option<PathBuf> {
        let all: Vec<&str> = TEXT_EXTENSIONS
            .iter()
            .chain(IMAGE_EXTENSIONS.iter())
            .copied()
            .collect();
        FileDialog::new()
            .add_filter("All Supported", &all[..])
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("Text/Source", TEXT_EXTENSIONS)
            .pick_file()
    }
}

impl Default for NativeResolver {
    fn default() -> Self {
        Self::new(FileConfig::default())
    }
}

impl peek_core::FileResolver for NativeResolver {
    fn resolve_file(&mut self) -> Option<OpenedFile> {
        let path = self.pick()?;
        Some(self.resolve_path(&path))
    }

    fn resolve_path(&mut self, path: &Path) -> OpenedFile {
        self.load(path).unwrap_or_else(|e| OpenedFile::Error {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })
    }

    fn siblings(&mut self, path: &Path, kind: FileKind) -> Vec<PathBuf> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("Cannot list {}: {}", dir.display(), e);
                return Vec::new();
            }
        };
        let mut found: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && file_kind(p) == Some(kind))
            .collect();
        found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        found
    }
}

fn file_url(path: &Path) -> String {
    let absolute = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let s = absolute.to_string_lossy().replace('\\', "/");
    if s.starts_with('/') {
        format!("file://{}", s)
    } else {
        format!("file:///{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peek_core::FileResolver;
    use tempfile::tempdir;

    #[test]
    fn test_image_extensions() {
        assert!(is_supported_image(Path::new("a/b.PNG")));
        assert!(is_supported_image(Path::new("photo.jpeg")));
        assert!(!is_supported_image(Path::new("main.rs")));
        assert!(!is_supported_image(Path::new("README")));
    }

    #[test]
    fn test_file_kind() {
        assert_eq!(file_kind(Path::new("a.JPG")), Some(FileKind::Image));
        assert_eq!(file_kind(Path::new("lib.rs")), Some(FileKind::Text));
        assert_eq!(file_kind(Path::new("app.exe")), None);
        assert_eq!(file_kind(Path::new("README")), None);
    }

    #[test]
    fn test_siblings_sorted_by_kind() {
        let dir = tempdir().unwrap();
        for name in ["b.rs", "a.txt", "c.png", "d.bin"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("sub.txt")).unwrap();
        let mut resolver = NativeResolver::default();
        let current = dir.path().join("b.rs");

        let texts: Vec<_> = resolver
            .siblings(&current, FileKind::Text)
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(texts, vec!["a.txt", "b.rs"]);

        let images = resolver.siblings(&current, FileKind::Image);
        assert_eq!(images, vec![dir.path().join("c.png")]);
    }

    #[test]
    fn test_siblings_of_missing_folder() {
        let mut resolver = NativeResolver::default();
        let siblings = resolver.siblings(Path::new("/no/such/dir/x.txt"), FileKind::Text);
        assert!(siblings.is_empty());
    }

    #[test]
    fn test_text_is_decoded_lossily() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, b"ok \xff\xfe end").unwrap();

        match NativeResolver::default().load(&path).unwrap() {
            OpenedFile::Text { content, handle, .. } => {
                assert_eq!(content, "ok \u{FFFD}\u{FFFD} end");
                assert!(handle.is_none());
            }
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_file_is_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.txt");
        fs::write(&path, "0123456789").unwrap();
        let mut resolver = NativeResolver::new(FileConfig {
            max_file_size_bytes: 5,
            ..FileConfig::default()
        });

        match resolver.resolve_path(&path) {
            OpenedFile::Error { message, .. } => {
                assert_eq!(message, "File is too large (> 0.0MB)");
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_becomes_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let opened = NativeResolver::default().resolve_path(&path);
        match opened {
            OpenedFile::Error { message, .. } => assert!(message.starts_with("Failed to read file:")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_image_dimensions_are_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        image::RgbaImage::new(3, 2).save(&path).unwrap();

        match NativeResolver::default().load(&path).unwrap() {
            OpenedFile::Image { image, .. } => {
                assert_eq!((image.width, image.height), (3, 2));
                assert!(image.location.starts_with("file://"));
                assert!(image.location.ends_with("pixel.png"));
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_image_over_texture_budget() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbaImage::new(64, 64).save(&path).unwrap();
        let resolver = NativeResolver::new(FileConfig {
            max_image_texture_bytes: 1024,
            ..FileConfig::default()
        });

        let err = resolver.load(&path).unwrap_err();
        assert!(matches!(err, CoreError::ImageTooLarge { width: 64, height: 64, .. }));
    }

    #[test]
    fn test_corrupt_image_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, "not a png").unwrap();

        let err = NativeResolver::default().load(&path).unwrap_err();
        assert!(matches!(err, CoreError::Platform(PlatformError::Image(_))));
        assert!(err.to_string().starts_with("Failed to open image:"));
    }
}
