//! Multipart Payloads
//!
//! Transport-neutral form bodies. Each transport turns a [`FormPayload`]
//! into its own multipart encoding (reqwest `Form`, browser `FormData`).

/// An image chosen in the card editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Guess a content type from the file extension
    pub fn guess_content_type(file_name: &str) -> &'static str {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }
}

/// Value of one multipart field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(ImageFile),
}

/// Ordered list of multipart fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    parts: Vec<(String, FormValue)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.parts.push((name.to_string(), FormValue::Text(value.into())));
        self
    }

    pub fn file(&mut self, name: &str, file: ImageFile) -> &mut Self {
        self.parts.push((name.to_string(), FormValue::File(file)));
        self
    }

    pub fn parts(&self) -> &[(String, FormValue)] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<(String, FormValue)> {
        self.parts
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.parts.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Text value for `name`, `None` for missing or file fields
    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(FormValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn has_files(&self) -> bool {
        self.parts.iter().any(|(_, v)| matches!(v, FormValue::File(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_lookup() {
        let mut payload = FormPayload::new();
        payload
            .text("title", "Alice")
            .file("avatar", ImageFile::new("a.png", "image/png", vec![1, 2, 3]));

        assert_eq!(payload.get_text("title"), Some("Alice"));
        assert_eq!(payload.get_text("avatar"), None);
        assert!(payload.contains("avatar"));
        assert!(payload.has_files());
        assert!(!payload.contains("slug"));
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(ImageFile::guess_content_type("me.JPG"), "image/jpeg");
        assert_eq!(ImageFile::guess_content_type("bg.webp"), "image/webp");
        assert_eq!(ImageFile::guess_content_type("noext"), "application/octet-stream");
    }
}
