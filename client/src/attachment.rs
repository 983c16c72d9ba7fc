//! In-memory file attachments picked in a form.
//!
//! Files are never uploaded incrementally: the picker result is held as an
//! object URL or a base64 data URI and sent along with the form payload.
//! Type and size limits are advisory UI checks, not a security boundary.

use serde::{Deserialize, Serialize};

const MB: u64 = 1024 * 1024;

/// What a file input accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachmentKind {
    /// Banner creative, 2 MB.
    BannerImage,
    /// Posters, covers, thumbnails and ticket screenshots, 5 MB.
    Image,
    /// Track audio, 50 MB.
    Audio,
    /// Video file, 500 MB.
    Video,
}

impl AttachmentKind {
    pub fn max_bytes(&self) -> u64 {
        match self {
            AttachmentKind::BannerImage => 2 * MB,
            AttachmentKind::Image => 5 * MB,
            AttachmentKind::Audio => 50 * MB,
            AttachmentKind::Video => 500 * MB,
        }
    }

    /// MIME type prefix the picker filters on.
    pub fn mime_prefix(&self) -> &'static str {
        match self {
            AttachmentKind::BannerImage | AttachmentKind::Image => "image/",
            AttachmentKind::Audio => "audio/",
            AttachmentKind::Video => "video/",
        }
    }

    /// Value for the `accept` attribute of a file input.
    pub fn accept(&self) -> &'static str {
        match self {
            AttachmentKind::BannerImage | AttachmentKind::Image => "image/*",
            AttachmentKind::Audio => "audio/*",
            AttachmentKind::Video => "video/*",
        }
    }

    /// Checks a picked file, returning the inline error message on rejection.
    pub fn check(&self, mime_type: &str, size_bytes: u64) -> Result<(), String> {
        if !mime_type.starts_with(self.mime_prefix()) {
            return Err(format!("Неподдерживаемый тип файла: {}", display_mime(mime_type)));
        }
        if size_bytes > self.max_bytes() {
            return Err(format!("Файл слишком большой (максимум {} МБ)", self.max_bytes() / MB));
        }
        Ok(())
    }
}

fn display_mime(mime_type: &str) -> &str {
    if mime_type.is_empty() {
        "неизвестно"
    } else {
        mime_type
    }
}

/// How the file content is held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum AttachmentData {
    /// `blob:` URL from `URL.createObjectURL`, valid for the page lifetime.
    ObjectUrl(String),
    /// `data:<mime>;base64,...` from a `FileReader`.
    DataUri(String),
    /// Already hosted file (editing an existing entity, or CLI input).
    Remote(String),
}

/// A picked file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub data: AttachmentData,
}

impl Attachment {
    /// Validates against `kind` and wraps the picked file.
    pub fn picked(
        kind: AttachmentKind,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        data: AttachmentData,
    ) -> Result<Self, String> {
        let mime_type = mime_type.into();
        kind.check(&mime_type, size_bytes)?;
        Ok(Self {
            file_name: file_name.into(),
            mime_type,
            size_bytes,
            data,
        })
    }

    /// Reference sent to the backend and used for previews.
    pub fn reference(&self) -> &str {
        match &self.data {
            AttachmentData::ObjectUrl(url) | AttachmentData::DataUri(url) | AttachmentData::Remote(url) => url,
        }
    }

    /// Object URLs must be revoked by the browser when the preview is cleared.
    pub fn object_url(&self) -> Option<&str> {
        match &self.data {
            AttachmentData::ObjectUrl(url) => Some(url),
            _ => None,
        }
    }

    /// Human-readable size, e.g. `1.5 МБ`.
    pub fn size_label(&self) -> String {
        if self.size_bytes >= MB {
            format!("{:.1} МБ", self.size_bytes as f64 / MB as f64)
        } else {
            format!("{} КБ", (self.size_bytes + 1023) / 1024)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_per_kind() {
        assert_eq!(AttachmentKind::BannerImage.max_bytes(), 2 * MB);
        assert_eq!(AttachmentKind::Image.max_bytes(), 5 * MB);
        assert_eq!(AttachmentKind::Audio.max_bytes(), 50 * MB);
        assert_eq!(AttachmentKind::Video.max_bytes(), 500 * MB);
    }

    #[test]
    fn test_check_mime_prefix_and_size() {
        assert!(AttachmentKind::Image.check("image/png", 4 * MB).is_ok());
        assert!(AttachmentKind::Image.check("audio/mpeg", 1024).is_err());
        let err = AttachmentKind::BannerImage.check("image/jpeg", 3 * MB).unwrap_err();
        assert!(err.contains("2 МБ"));
    }

    #[test]
    fn test_picked_attachment() {
        let att = Attachment::picked(
            AttachmentKind::Audio,
            "demo.mp3",
            "audio/mpeg",
            3 * MB / 2,
            AttachmentData::ObjectUrl("blob:http://localhost/1234".into()),
        )
        .unwrap();
        assert_eq!(att.reference(), "blob:http://localhost/1234");
        assert_eq!(att.object_url(), Some("blob:http://localhost/1234"));
        assert_eq!(att.size_label(), "1.5 МБ");

        assert!(Attachment::picked(
            AttachmentKind::Video,
            "clip.mov",
            "",
            10,
            AttachmentData::DataUri("data:,".into()),
        )
        .is_err());
    }
}
