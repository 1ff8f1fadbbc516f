use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Text,
    Pdf,
    Url,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentType::Text => "text",
            ContentType::Pdf => "pdf",
            ContentType::Url => "url",
        };
        f.write_str(name)
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ContentType::Text),
            "pdf" => Ok(ContentType::Pdf),
            "url" => Ok(ContentType::Url),
            other => Err(format!("unknown content type '{}', expected text, pdf or url", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// server-assigned id, the only identity a content record has
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateContentRequest {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_uses_backend_field_names() {
        let content: Content = serde_json::from_value(json!({
            "id": "abc",
            "title": "Ownership",
            "content": "Every value has an owner.",
            "type": "pdf",
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(content.content_type, ContentType::Pdf);
        assert_eq!(content.category, None);
        assert_eq!(content.created_at, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn update_request_only_sends_set_fields() {
        let request = UpdateContentRequest {
            title: Some("New title".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"title": "New title"})
        );
    }

    #[test]
    fn content_type_parses_cli_names() {
        assert_eq!("url".parse::<ContentType>(), Ok(ContentType::Url));
        assert!("video".parse::<ContentType>().is_err());
        assert_eq!(ContentType::Text.to_string(), "text");
    }
}
