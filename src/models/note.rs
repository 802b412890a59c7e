// Note model for filesystem-based storage
// The id is the storage-relative path, assigned when the note is first saved

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Note frontmatter (YAML header in .md file)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteFrontmatter {
    #[serde(default)]
    pub title: String,
    #[serde(default = "epoch")]
    pub created: DateTime<Local>,
    #[serde(default = "epoch")]
    pub modified: DateTime<Local>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

fn epoch() -> DateTime<Local> {
    DateTime::<Utc>::default().with_timezone(&Local)
}

// `tags:` with no value is null in YAML
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Full note with parsed data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub created: DateTime<Local>,
    pub modified: DateTime<Local>,
    pub tags: Vec<String>,
    pub content: String,
}

impl Note {
    pub fn new(title: impl Into<String>, tags: Vec<String>) -> Self {
        let now = Local::now();
        Self {
            id: String::new(),
            title: title.into(),
            created: now,
            modified: now,
            tags,
            content: String::new(),
        }
    }

    pub(crate) fn from_frontmatter(id: impl Into<String>, fm: NoteFrontmatter, content: String) -> Self {
        Self {
            id: id.into(),
            title: fm.title,
            created: fm.created,
            modified: fm.modified,
            tags: fm.tags,
            content,
        }
    }

    pub fn is_saved(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
