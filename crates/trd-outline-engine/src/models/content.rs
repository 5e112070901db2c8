use serde::{Deserialize, Serialize};

/// A classified unit of non-heading text.
///
/// Serialized with a `type` tag (`text`, `bullet-list`, `numbered-list`,
/// `code-block`, `bold-text`, `requirement`, `table`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentItem {
    Text { content: String },
    /// Bullet text without its `- ` / `* ` marker.
    BulletList { content: String },
    /// Item text without its leading `N.` number.
    NumberedList { content: String },
    /// A single line carrying a code fence marker, kept verbatim.
    CodeBlock { content: String },
    /// A line containing `**...**` markup, kept verbatim.
    BoldText { content: String },
    Requirement { id: String, content: String },
    Table(Table),
}

impl ContentItem {
    pub fn text(content: impl Into<String>) -> Self {
        ContentItem::Text {
            content: content.into(),
        }
    }

    /// The kebab-case tag this item serializes with.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentItem::Text { .. } => "text",
            ContentItem::BulletList { .. } => "bullet-list",
            ContentItem::NumberedList { .. } => "numbered-list",
            ContentItem::CodeBlock { .. } => "code-block",
            ContentItem::BoldText { .. } => "bold-text",
            ContentItem::Requirement { .. } => "requirement",
            ContentItem::Table(_) => "table",
        }
    }

    /// The stored line text, for every kind except tables.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentItem::Text { content }
            | ContentItem::BulletList { content }
            | ContentItem::NumberedList { content }
            | ContentItem::CodeBlock { content }
            | ContentItem::BoldText { content }
            | ContentItem::Requirement { content, .. } => Some(content),
            ContentItem::Table(_) => None,
        }
    }
}

/// A pipe-delimited table reconstructed from consecutive rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Every source line of the table, separators included.
    #[serde(rename = "rawContent")]
    pub raw_content: Vec<String>,
}

impl Table {
    /// Tables without a header row are shown as their raw lines.
    pub fn is_raw(&self) -> bool {
        self.headers.is_empty()
    }
}
