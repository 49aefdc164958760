use std::path::{Path, PathBuf};

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::multipart::{Field, MultipartError};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// URL prefix under which the static file server exposes the upload dir.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Flat directory of user-uploaded images.
///
/// Each upload lands at `{dir}/{unix_millis}-{sanitized name}`. Two uploads
/// of the same name within one millisecond collide; the later one wins.
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub async fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).await?;
        info!("Upload directory: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` durably and return the public path to the new file.
    pub async fn store(&self, bytes: &[u8], original_name: &str) -> Result<String> {
        let stored_name = format!(
            "{}-{}",
            chrono::Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );
        let path = self.dir.join(&stored_name);

        let mut file = fs::File::create(&path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;

        debug!("Stored upload {} ({} bytes)", path.display(), bytes.len());
        Ok(format!("{}/{}", PUBLIC_PREFIX, stored_name))
    }
}

/// Keep only the last path component and replace anything outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// A file part pulled out of a multipart body.
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Browsers send an empty, unnamed part when no file was picked; that
    /// counts as no file at all.
    pub async fn from_field(field: Field<'_>) -> std::result::Result<Option<Self>, MultipartError> {
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        if file_name.is_empty() && bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self { file_name, bytes }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizing_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("pumpkin.png"), "pumpkin.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\my house.jpg"), "my_house.jpg");
        assert_eq!(sanitize_file_name("spooky 🎃.gif"), "spooky__.gif");
        assert_eq!(sanitize_file_name(""), "upload");
        assert_eq!(sanitize_file_name(".."), "upload");
    }

    #[tokio::test]
    async fn store_writes_under_timestamped_name() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = Storage::new(tmp.path().join("uploads")).await.unwrap();

        let path = storage.store(b"candy", "house photo.png").await.unwrap();

        let stored_name = path.strip_prefix("/uploads/").unwrap();
        let (stamp, rest) = stored_name.split_once('-').unwrap();
        assert!(stamp.parse::<i64>().is_ok());
        assert_eq!(rest, "house_photo.png");

        let on_disk = std::fs::read(storage.dir().join(stored_name)).unwrap();
        assert_eq!(on_disk, b"candy");
    }

    #[tokio::test]
    async fn new_creates_missing_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b");
        Storage::new(dir.clone()).await.unwrap();
        assert!(dir.is_dir());
    }
}
