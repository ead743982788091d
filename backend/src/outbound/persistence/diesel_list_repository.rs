//! PostgreSQL-backed [`ListRepository`] implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};

use crate::domain::ports::{ListRepository, PersistenceError};
use crate::domain::{BucketList, ListId, UserId};

use super::error_mapping::map_diesel_error;
use super::models::{ListChanges, ListRow};
use super::pool::DbPool;
use super::schema::bucket_lists;

diesel::define_sql_function! {
    /// SQL `lower()`, used for the case-insensitive name lookup.
    fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Diesel-backed implementation of the [`ListRepository`] port.
#[derive(Clone)]
pub struct DieselListRepository {
    pool: DbPool,
}

impl DieselListRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn rows_to_lists(rows: Vec<ListRow>) -> Result<Vec<BucketList>, PersistenceError> {
    rows.into_iter().map(BucketList::try_from).collect()
}

#[async_trait]
impl ListRepository for DieselListRepository {
    async fn create(&self, list: &BucketList) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await?;
        diesel::insert_into(bucket_lists::table)
            .values(ListRow::from(list))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "bucket list name"))?;
        Ok(())
    }

    async fn find_by_owner_and_slug(
        &self,
        owner: &UserId,
        slug: &str,
    ) -> Result<Option<BucketList>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row: Option<ListRow> = bucket_lists::table
            .filter(bucket_lists::user_id.eq(owner.as_uuid()))
            .filter(bucket_lists::slug.eq(slug))
            .select(ListRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "bucket list name"))?;
        row.map(BucketList::try_from).transpose()
    }

    async fn find_by_owner_and_name_ci(
        &self,
        owner: &UserId,
        name: &str,
    ) -> Result<Option<BucketList>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let row: Option<ListRow> = bucket_lists::table
            .filter(bucket_lists::user_id.eq(owner.as_uuid()))
            .filter(lower(bucket_lists::name).eq(name.to_lowercase()))
            .select(ListRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "bucket list name"))?;
        row.map(BucketList::try_from).transpose()
    }

    async fn page_by_owner(
        &self,
        owner: &UserId,
        request: PageRequest,
    ) -> Result<Page<BucketList>, PersistenceError> {
        let mut conn = self.pool.get().await?;

        let total: i64 = bucket_lists::table
            .filter(bucket_lists::user_id.eq(owner.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "bucket list name"))?;

        let rows: Vec<ListRow> = bucket_lists::table
            .filter(bucket_lists::user_id.eq(owner.as_uuid()))
            .order(bucket_lists::name.asc())
            .offset(i64::try_from(request.offset()).unwrap_or(i64::MAX))
            .limit(i64::try_from(request.limit()).unwrap_or(i64::MAX))
            .select(ListRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "bucket list name"))?;

        let items = rows_to_lists(rows)?;
        let total = u64::try_from(total).unwrap_or(0);
        Ok(Page::new(items, request, total))
    }

    async fn recent_by_owner(
        &self,
        owner: &UserId,
        limit: u32,
    ) -> Result<Vec<BucketList>, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let rows: Vec<ListRow> = bucket_lists::table
            .filter(bucket_lists::user_id.eq(owner.as_uuid()))
            .order(bucket_lists::modified_at.desc())
            .limit(i64::from(limit))
            .select(ListRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "bucket list name"))?;
        rows_to_lists(rows)
    }

    async fn update(&self, list: &BucketList) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let updated = diesel::update(
            bucket_lists::table
                .filter(bucket_lists::id.eq(list.id().as_uuid()))
                .filter(bucket_lists::user_id.eq(list.owner_id().as_uuid())),
        )
        .set(ListChanges::from(list))
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, "bucket list name"))?;
        Ok(updated > 0)
    }

    async fn delete(&self, owner: &UserId, id: &ListId) -> Result<bool, PersistenceError> {
        let mut conn = self.pool.get().await?;
        let deleted = diesel::delete(
            bucket_lists::table
                .filter(bucket_lists::id.eq(id.as_uuid()))
                .filter(bucket_lists::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, "bucket list name"))?;
        Ok(deleted > 0)
    }
}
