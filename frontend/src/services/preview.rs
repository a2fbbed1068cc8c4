//! Browser file handles: metadata for validation, data URLs for previews.

use gloo_file::futures::read_as_data_url;
use web_sys::File;

use crate::session::{FileCandidate, PreviewLoader};

impl FileCandidate for File {
    fn name(&self) -> String {
        File::name(self)
    }

    fn size(&self) -> u64 {
        // Blob sizes are exposed as f64 but are always whole byte counts
        web_sys::Blob::size(self) as u64
    }

    fn mime_type(&self) -> String {
        self.type_()
    }
}

/// Reads the selected file locally with a `FileReader`.
pub struct BrowserPreviewLoader;

impl PreviewLoader<File> for BrowserPreviewLoader {
    async fn load_preview(&self, file: &File) -> Option<String> {
        let blob = gloo_file::File::from(file.clone());
        match read_as_data_url(&blob).await {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("Failed to read {} as data URL: {}", File::name(file), e);
                None
            }
        }
    }
}
