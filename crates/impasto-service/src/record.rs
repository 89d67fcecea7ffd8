//! Wire model for image records exchanged with the persistence service.

use serde::{Deserialize, Serialize};

/// One image record as the service stores it.
///
/// Field names mirror the service's JSON (camelCase); `image_data`
/// carries the raw encoded file bytes and crosses the wire base64-encoded.
/// The core never decodes these bytes itself -- pixel work happens on
/// buffers the caller already decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    /// Service-assigned identifier; zero for records not yet created.
    #[serde(default)]
    pub id: i64,

    /// Display name shown in the library.
    pub name: String,

    /// Raw encoded image bytes (PNG, JPEG, BMP).
    #[serde(with = "base64_bytes")]
    pub image_data: Vec<u8>,

    /// Pixel width of the decoded image.
    pub width: u32,

    /// Pixel height of the decoded image.
    pub height: u32,

    /// Pixel format label as reported by the producer (e.g. `"RGB32"`).
    pub pixel_format: String,

    /// Source path the image was loaded from.
    pub path: String,
}

/// serde adapter: `Vec<u8>` as a base64 string on the wire.
mod base64_bytes {
    use base64::Engine as _;
    use base64::prelude::BASE64_STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64_STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
