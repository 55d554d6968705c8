// Multipart payload for blog create / update.
//
// Text fields and image parts go out in a single request, so atomicity of
// "upload + save" is entirely the backend's concern.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An image file part, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl ImageFile {
    /// Read an image from disk, guessing the MIME type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self, Error> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::Multipart(format!("{}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_owned();
        let mime = guess_mime(&file_name).map(String::from);
        Ok(Self {
            file_name,
            bytes,
            mime,
        })
    }

    fn into_part(self) -> Result<Part, Error> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        match self.mime {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| Error::Multipart(format!("invalid MIME type {mime:?}: {e}"))),
            None => Ok(part),
        }
    }
}

fn guess_mime(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

/// Publication status of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
}

impl BlogStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

/// Form contents for creating or updating a blog post.
#[derive(Debug, Clone, Default)]
pub struct BlogDraft {
    pub title: String,
    pub subtitle: Option<String>,
    pub content: String,
    pub excerpt: Option<String>,
    pub author_name: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub status: BlogStatus,
    pub is_featured: bool,
    pub featured_image: Option<ImageFile>,
    pub banner_image: Option<ImageFile>,
    pub images: Vec<ImageFile>,
}

impl BlogDraft {
    /// Names of required text fields that are blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("content", &self.content),
            ("author_name", &self.author_name),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Text fields in submission order. Optional blanks are skipped.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("content", self.content.clone()),
            ("author_name", self.author_name.clone()),
        ];
        if let Some(ref subtitle) = self.subtitle {
            fields.push(("subtitle", subtitle.clone()));
        }
        if let Some(ref excerpt) = self.excerpt {
            fields.push(("excerpt", excerpt.clone()));
        }
        if let Some(ref category) = self.category {
            fields.push(("category", category.clone()));
        }
        fields.push((
            "tags",
            serde_json::to_string(&self.tags).unwrap_or_else(|_| "[]".into()),
        ));
        fields.push(("status", self.status.as_str().to_owned()));
        fields.push(("is_featured", if self.is_featured { "1" } else { "0" }.to_owned()));
        fields
    }

    /// Consume the draft into a multipart form.
    pub fn into_form(self) -> Result<Form, Error> {
        let mut form = Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }
        if let Some(image) = self.featured_image {
            form = form.part("featured_image", image.into_part()?);
        }
        if let Some(image) = self.banner_image {
            form = form.part("banner_image", image.into_part()?);
        }
        for image in self.images {
            form = form.part("images", image.into_part()?);
        }
        Ok(form)
    }
}
