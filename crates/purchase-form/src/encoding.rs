use futures::future::try_join_all;

use purchase_core::models::{EncodedDocument, FileCollection};
use purchase_core::FormResult;

/// Read and base64-encode every attachment concurrently.
///
/// Output order follows the collection. The first read failure fails the
/// whole step and no partial list is returned.
pub async fn encode_documents(files: &FileCollection) -> FormResult<Vec<EncodedDocument>> {
    try_join_all(files.iter().map(|file| file.encode())).await
}
