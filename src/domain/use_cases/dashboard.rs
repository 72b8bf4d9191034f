use crate::{
    entities::dashboard::DashboardSummary,
    errors::AppError,
    repositories::{contact_message::ContactMessageRepository, dashboard::DashboardRepository},
};

pub struct DashboardHandler<D>
where
    D: DashboardRepository,
{
    pub dashboard_repo: D,
}

impl<D> DashboardHandler<D>
where
    D: DashboardRepository,
{
    pub fn new(dashboard_repo: D) -> Self {
        DashboardHandler { dashboard_repo }
    }

    pub async fn summary<C>(&self, contact_repo: &C) -> Result<DashboardSummary, AppError>
    where
        C: ContactMessageRepository,
    {
        let (content, messages) = futures::try_join!(
            self.dashboard_repo.content_counts(),
            contact_repo.message_stats()
        )?;

        Ok(DashboardSummary { content, messages })
    }

    pub async fn database_reachable(&self) -> bool {
        self.dashboard_repo.check_connection().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::{contact_message::MessageStats, dashboard::ContentCounts},
        repositories::{contact_message::MockContactMessageRepository, dashboard::MockDashboardRepository},
    };

    #[tokio::test]
    async fn summary_combines_content_and_inbox_counts() {
        let mut dashboard = MockDashboardRepository::new();
        dashboard.expect_content_counts().returning(|| {
            Ok(ContentCounts {
                projects: 4,
                featured_projects: 2,
                ..ContentCounts::default()
            })
        });
        let mut contacts = MockContactMessageRepository::new();
        contacts.expect_message_stats().returning(|| {
            Ok(MessageStats { total: 3, new: 1, read: 1, replied: 1 })
        });

        let summary = DashboardHandler::new(dashboard).summary(&contacts).await.unwrap();
        assert_eq!(summary.content.projects, 4);
        assert_eq!(summary.messages.total, 3);
    }
}
