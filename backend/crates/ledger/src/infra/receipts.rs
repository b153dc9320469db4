//! Receipt File Storage
//!
//! PDF receipts on local disk. Filenames are generated server side, so
//! a client-supplied name never touches the filesystem.

use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};

/// Leading bytes of every PDF file
const PDF_MAGIC: &[u8] = b"%PDF";

/// Local receipt storage rooted at the upload directory
#[derive(Debug, Clone)]
pub struct ReceiptStore {
    dir: PathBuf,
}

impl ReceiptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if absent (startup)
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Validate and store a PDF, returning the generated filename
    ///
    /// Both the declared content type and the file magic must say PDF;
    /// either one alone is trivially forged.
    pub async fn save_pdf(
        &self,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> LedgerResult<String> {
        if content_type != Some("application/pdf") || !bytes.starts_with(PDF_MAGIC) {
            return Err(LedgerError::UnsupportedFileType);
        }

        let filename = format!("{}.pdf", Uuid::new_v4());
        tokio::fs::write(self.dir.join(&filename), bytes).await?;

        tracing::debug!(filename = %filename, size = bytes.len(), "receipt stored");
        Ok(filename)
    }
}
