//! Request-scoped spooling of uploads to local disk.
//!
//! Each upload gets its own temporary directory so concurrent requests with
//! identical filenames cannot collide. The directory is removed when the
//! spool is dropped, which covers success, error, and cancellation paths.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FALLBACK_FILENAME: &str = "upload.bin";

/// An upload written to a unique temporary directory.
pub struct SpooledUpload {
    // Held for its Drop impl; removing the dir removes the file.
    _dir: TempDir,
    path: PathBuf,
}

impl SpooledUpload {
    /// Write `data` under a fresh temp dir using the sanitized client filename.
    pub async fn write(filename: &str, data: &[u8]) -> std::io::Result<Self> {
        let dir = TempDir::with_prefix("detect-video-")?;
        let path = dir.path().join(sanitize_filename(filename));
        tokio::fs::write(&path, data).await?;
        Ok(Self { _dir: dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reduce a client-supplied filename to a bare file name.
///
/// Uploads control this string, so path separators, `..` components, and NUL
/// bytes must not reach the filesystem.
fn sanitize_filename(filename: &str) -> String {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(FALLBACK_FILENAME);
    if name.contains('\0') {
        FALLBACK_FILENAME.to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_and_reads_back() {
        let spool = SpooledUpload::write("clip.mp4", b"not really a video")
            .await
            .unwrap();
        assert_eq!(spool.path().file_name().unwrap(), "clip.mp4");
        let contents = tokio::fs::read(spool.path()).await.unwrap();
        assert_eq!(contents, b"not really a video");
    }

    #[tokio::test]
    async fn identical_filenames_get_distinct_paths() {
        let a = SpooledUpload::write("same.mp4", b"a").await.unwrap();
        let b = SpooledUpload::write("same.mp4", b"b").await.unwrap();
        assert_ne!(a.path(), b.path());
        assert_eq!(tokio::fs::read(a.path()).await.unwrap(), b"a");
        assert_eq!(tokio::fs::read(b.path()).await.unwrap(), b"b");
    }

    #[tokio::test]
    async fn file_is_removed_on_drop() {
        let spool = SpooledUpload::write("gone.mp4", b"bytes").await.unwrap();
        let path = spool.path().to_path_buf();
        assert!(path.exists());
        drop(spool);
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[tokio::test]
    async fn traversal_attempts_stay_inside_the_spool_dir() {
        let spool = SpooledUpload::write("../../etc/passwd", b"x").await.unwrap();
        assert_eq!(spool.path().file_name().unwrap(), "passwd");
        let dir = spool.path().parent().unwrap();
        assert!(spool.path().starts_with(dir));
    }

    #[test]
    fn sanitize_rejects_hostile_names() {
        assert_eq!(sanitize_filename("video.mp4"), "video.mp4");
        assert_eq!(sanitize_filename("/abs/path/video.mp4"), "video.mp4");
        assert_eq!(sanitize_filename("nul\0byte.mp4"), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename(".."), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename(""), FALLBACK_FILENAME);
    }
}
