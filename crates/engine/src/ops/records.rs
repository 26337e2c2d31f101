//! Record repository: bulk create and predicate-scoped read, update and delete.
//!
//! Every mutation runs as one unit of work through [`with_tx`]: it commits only
//! when the whole operation succeeds and is rolled back on any error.

use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Predicate, Record, ResultEngine, sales,
    schema::{self, FieldMap},
};

use super::{Affected, Engine, with_tx};

impl Engine {
    /// Insert a batch of records built from client field maps.
    ///
    /// - Keys outside the schema are dropped.
    /// - Absent fields take their default (`date` is the insert time).
    /// - Any payload failing validation rejects the whole batch before
    ///   anything is written.
    ///
    /// Returns the number of records created.
    pub async fn create_many(&self, payloads: &[FieldMap]) -> ResultEngine<u64> {
        let models = payloads
            .iter()
            .map(schema::active_model)
            .collect::<ResultEngine<Vec<_>>>()?;
        if models.is_empty() {
            return Ok(0);
        }

        let created = models.len() as u64;
        with_tx!(self, |db_tx| {
            for model in models {
                sales::Entity::insert(model).exec(&db_tx).await?;
            }
            tracing::debug!(created, "sales records created");
            Ok(created)
        })
    }

    /// Return every record matching `predicate`, ordered by id.
    pub async fn find(&self, predicate: &Predicate) -> ResultEngine<Vec<Record>> {
        let models = sales::Entity::find()
            .filter(predicate.condition())
            .order_by_asc(sales::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Record::from).collect())
    }

    /// Return the record with the given id, if any.
    pub async fn record(&self, id: i32) -> ResultEngine<Option<Record>> {
        let model = sales::Entity::find_by_id(id).one(&self.database).await?;
        Ok(model.map(Record::from))
    }

    /// Overwrite the fields present in `patch` on every record matching
    /// `predicate`, leaving the other fields untouched.
    ///
    /// The patch is validated before the transaction starts. A patch with no
    /// field of the schema writes nothing but still reports the matches.
    pub async fn update_matching(
        &self,
        predicate: &Predicate,
        patch: &FieldMap,
    ) -> ResultEngine<Affected> {
        let patch = schema::patch_model(patch)?;
        let condition = predicate.condition();
        with_tx!(self, |db_tx| {
            let matched = sales::Entity::find()
                .filter(condition.clone())
                .count(&db_tx)
                .await?;
            if matched == 0 {
                tracing::info!("update matched no sales records");
                return Ok(Affected::NotFound);
            }

            let Some(patch) = patch else {
                return Ok(Affected::Rows(matched));
            };
            let result = sales::Entity::update_many()
                .set(patch)
                .filter(condition)
                .exec(&db_tx)
                .await?;
            tracing::debug!(updated = result.rows_affected, "sales records updated");
            Ok(Affected::Rows(result.rows_affected))
        })
    }

    /// Delete every record matching `predicate`, as one atomic set.
    pub async fn delete_matching(&self, predicate: &Predicate) -> ResultEngine<Affected> {
        let condition = predicate.condition();
        with_tx!(self, |db_tx| {
            let matched = sales::Entity::find()
                .filter(condition.clone())
                .count(&db_tx)
                .await?;
            if matched == 0 {
                tracing::info!("delete matched no sales records");
                return Ok(Affected::NotFound);
            }

            let result = sales::Entity::delete_many()
                .filter(condition)
                .exec(&db_tx)
                .await?;
            tracing::debug!(deleted = result.rows_affected, "sales records deleted");
            Ok(Affected::Rows(result.rows_affected))
        })
    }
}
