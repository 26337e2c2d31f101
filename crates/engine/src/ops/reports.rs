use crate::{Dashboard, Predicate, ResultEngine, aggregate::Summary};

use super::Engine;

impl Engine {
    /// Compute every dashboard report from a fresh snapshot of the store.
    ///
    /// Nothing is cached: each call reads all records again, so the result
    /// is as recent as that read.
    pub async fn dashboard(&self) -> ResultEngine<Dashboard> {
        let snapshot = self.find(&Predicate::all()).await?;
        tracing::debug!(records = snapshot.len(), "computing dashboard");
        Ok(Dashboard::from_records(&snapshot))
    }

    /// Only the scalar summary metrics of the dashboard.
    pub async fn summary(&self) -> ResultEngine<Summary> {
        let snapshot = self.find(&Predicate::all()).await?;
        Ok(crate::aggregate::summary(&snapshot))
    }
}
