use anyhow::Context;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use super::render::export_text;
use crate::model::{AiResult, Content, ContentType};

#[derive(Serialize, Debug)]
#[serde(untagged)]
enum Frontmatter<'a> {
    Id(&'a str),
    Title(&'a str),
    Type(&'a ContentType),
    Category(Option<&'a str>),
    CreatedAt(&'a str),
}

/// File name for an exported record: the slugged title, or the id when the
/// title has nothing sluggable in it.
pub fn content_file_name(content: &Content) -> String {
    let mut slugger = github_slugger::Slugger::default();
    let slug = slugger.slug(&content.title);
    if slug.is_empty() {
        format!("{}.md", content.id)
    } else {
        format!("{}.md", slug)
    }
}

/// Markdown with a YAML frontmatter block carrying the record's metadata.
pub fn serialize_content(content: &Content) -> anyhow::Result<String> {
    let mut fm: BTreeMap<&str, Frontmatter> = BTreeMap::new();
    fm.insert("id", Frontmatter::Id(content.id.as_str()));
    fm.insert("title", Frontmatter::Title(content.title.as_str()));
    fm.insert("type", Frontmatter::Type(&content.content_type));
    fm.insert("category", Frontmatter::Category(content.category.as_deref()));
    fm.insert("created_at", Frontmatter::CreatedAt(content.created_at.as_str()));

    Ok(format!(
        r#"---
{}---

{}
"#,
        serde_yaml_ng::to_string(&fm).context("failed to serialize content metadata")?,
        content.content.trim_end()
    ))
}

pub fn write_content(content: &Content, output_dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .context(format!("failed to create {}", output_dir.display()))?;

    let path = output_dir.join(content_file_name(content));
    let body = serialize_content(content)?;
    fs::write(&path, body).context(format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Saves the plain-text export of an AI result under its usual file name.
pub fn write_ai_result(result: &AiResult, output_dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .context(format!("failed to create {}", output_dir.display()))?;

    let (file_name, text) = export_text(result);
    let path = output_dir.join(file_name);
    fs::write(&path, text).context(format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SummaryResponse;

    fn content(title: &str) -> Content {
        Content {
            id: "c-42".into(),
            title: title.into(),
            content: "Light becomes sugar.\n".into(),
            content_type: ContentType::Text,
            category: Some("Biology".into()),
            created_at: "2024-02-02T08:00:00Z".into(),
        }
    }

    #[test]
    fn file_name_is_slugged_title() {
        assert_eq!(content_file_name(&content("Intro to Photosynthesis")), "intro-to-photosynthesis.md");
        assert_eq!(content_file_name(&content("!!!")), "c-42.md");
    }

    #[test]
    fn frontmatter_precedes_body() {
        let text = serialize_content(&content("Photosynthesis")).unwrap();
        assert!(text.starts_with("---\n"));
        assert!(text.contains("title: Photosynthesis\n"));
        assert!(text.contains("type: text\n"));
        assert!(text.contains("category: Biology\n"));
        assert!(text.ends_with("---\n\nLight becomes sugar.\n"));
    }

    #[test]
    fn writes_files_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("export");

        let path = write_content(&content("Cells"), &out).unwrap();
        assert_eq!(path, out.join("cells.md"));

        let summary = AiResult::Summary(SummaryResponse {
            summary: "Cells are small.".into(),
            key_points: vec![],
            word_count: 3.0,
        });
        let path = write_ai_result(&summary, &out).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "Cells are small.");
    }
}
