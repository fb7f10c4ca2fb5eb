use serde::Serialize;

/// One row of the `messages` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRow {
    pub id: String,
    pub lang_code: String,
    pub content: String,
    /// Unix seconds of the last write.
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageCount {
    pub lang_code: String,
    pub count: u64,
}

/// Row totals, overall and per stored language code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: u64,
    pub per_language: Vec<LanguageCount>,
}
