use serde::{Deserialize, Serialize};

/// A bookmark as handed to or returned by an import engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ImportedBookmark {
    pub title: String,
    pub url: String,
    /// Folder names from the root down to the bookmark's parent
    #[serde(default)]
    pub path: Vec<String>,
    /// Creation time in seconds since the Unix epoch, when the source has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<i64>,
}

impl ImportedBookmark {
    /// Create a new bookmark at the top level
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            path: Vec::new(),
            date_added: None,
        }
    }

    /// Place the bookmark under the given folder path
    pub fn in_folder<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date_added(mut self, timestamp: i64) -> Self {
        self.date_added = Some(timestamp);
        self
    }
}
