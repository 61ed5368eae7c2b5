//! Avatar storage port.

use crate::error::AvatarError;

/// Outbound port for storing avatar images on an external host.
///
/// The adapter uploads the raw bytes and returns a publicly reachable URL.
#[async_trait::async_trait]
pub trait AvatarStore: Send + Sync + 'static {
    /// Uploads an image and returns its public URL.
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AvatarError>;
}
