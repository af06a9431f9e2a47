//! Projects exported from the previous site as a static `projects.json`,
//! served when no database is configured.

use std::path::{Path, PathBuf};

use reelfolio_model::{Locale, Project, ProjectId};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LegacyYear {
    Number(i64),
    Text(String),
}

impl LegacyYear {
    fn as_year(&self) -> Option<i32> {
        match self {
            LegacyYear::Number(n) => i32::try_from(*n).ok(),
            LegacyYear::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProject {
    pub slug: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<LegacyYear>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl LegacyProject {
    /// Exported projects are published, Spanish, and keep file order.
    pub fn into_project(self, position: usize) -> Project {
        let non_blank =
            |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        Project {
            id: ProjectId::new(),
            title: non_blank(self.title).unwrap_or_else(|| self.slug.clone()),
            slug: self.slug,
            locale: Locale::default(),
            summary: non_blank(self.excerpt),
            description: non_blank(self.html),
            credits: None,
            year: self.year.as_ref().and_then(LegacyYear::as_year),
            order: i32::try_from(position).ok().map(|p| -p),
            client: None,
            piece_type: None,
            duration: None,
            video_url: non_blank(self.video_url),
            external_link: None,
            cover_image_path: non_blank(self.cover_image),
            gallery_image_paths: self.gallery,
            gallery_video_paths: Vec::new(),
            tags: self.roles,
            is_featured: false,
            published: true,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Reads the export on every call. Missing or malformed files yield `[]`.
#[derive(Debug, Clone)]
pub struct LegacyProjects {
    path: PathBuf,
}

impl LegacyProjects {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Vec<LegacyProject> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "legacy projects file unavailable");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<LegacyProject>>(&raw) {
            Ok(projects) => projects,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "legacy projects file is malformed");
                Vec::new()
            }
        }
    }

    pub fn projects(&self) -> Vec<Project> {
        self.read()
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.into_project(i))
            .collect()
    }

    pub fn find(&self, slug: &str) -> Option<Project> {
        self.projects().into_iter().find(|p| p.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn reads_export_with_mixed_year_types() {
        let file = write(
            r#"[
                {"slug":"bestefar","title":"Bestefar","year":2021,"roles":["director"],
                 "coverImage":"bestefar/cover.jpg","videoUrl":"https://vimeo.com/1"},
                {"slug":"untitled","year":"2019"}
            ]"#,
        );
        let legacy = LegacyProjects::new(file.path());
        let projects = legacy.projects();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].year, Some(2021));
        assert_eq!(projects[0].tags, vec!["director"]);
        assert_eq!(projects[0].cover_image_path.as_deref(), Some("bestefar/cover.jpg"));
        assert_eq!(projects[1].title, "untitled");
        assert_eq!(projects[1].year, Some(2019));
        assert!(projects.iter().all(|p| p.published));
        assert!(legacy.find("untitled").is_some());
    }

    #[test]
    fn missing_or_malformed_files_are_empty() {
        assert!(LegacyProjects::new("/nonexistent/projects.json").read().is_empty());
        let file = write(r#"{"not":"an array"}"#);
        assert!(LegacyProjects::new(file.path()).read().is_empty());
    }
}
