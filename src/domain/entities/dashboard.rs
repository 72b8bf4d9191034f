use serde::Serialize;

use super::contact_message::MessageStats;

/// Row counts across the content tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ContentCounts {
    pub projects: i64,
    pub featured_projects: i64,
    pub skills: i64,
    pub work_experience: i64,
    pub education: i64,
    pub social_links: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DashboardSummary {
    #[serde(flatten)]
    pub content: ContentCounts,
    pub messages: MessageStats,
}
