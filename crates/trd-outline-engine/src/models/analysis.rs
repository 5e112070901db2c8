use serde::{Deserialize, Serialize};

/// The generated-analysis JSON returned by the generation service.
///
/// Only the document fields are read; any of them may be null or missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub trd: Option<String>,
    #[serde(default)]
    pub hld: Option<String>,
    #[serde(default)]
    pub lld: Option<String>,
}

/// Which generated document a text field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Trd,
    Hld,
    Lld,
}

impl DocumentKind {
    pub fn suffix(self) -> &'static str {
        match self {
            DocumentKind::Trd => "trd",
            DocumentKind::Hld => "hld",
            DocumentKind::Lld => "lld",
        }
    }
}

impl AnalysisPayload {
    /// Present document fields, in `trd`, `hld`, `lld` order.
    pub fn documents(&self) -> impl Iterator<Item = (DocumentKind, &str)> {
        [
            (DocumentKind::Trd, self.trd.as_deref()),
            (DocumentKind::Hld, self.hld.as_deref()),
            (DocumentKind::Lld, self.lld.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, text)| text.map(|t| (kind, t)))
    }
}
