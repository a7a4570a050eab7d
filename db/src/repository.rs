//! Generic record store over any SeaORM entity.
//!
//! Every method takes the connection explicitly so callers can pass either a
//! pooled `DatabaseConnection` or an open `DatabaseTransaction`.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityTrait, IntoActiveModel, Order, PaginatorTrait, PrimaryKeyTrait, QueryFilter, QueryOrder,
    QuerySelect, Value,
};
use std::marker::PhantomData;

/// Generic repository that works with any SeaORM entity
pub struct Repository<E>
where
    E: EntityTrait,
{
    _phantom: PhantomData<E>,
}

impl<E> Repository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send + 'static,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
    E::Model: IntoActiveModel<E::ActiveModel>,
{
    pub async fn insert<C>(db: &C, active_model: E::ActiveModel) -> Result<E::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        active_model.insert(db).await
    }

    pub async fn find_by_id<C>(
        db: &C,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<Option<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        E::find_by_id(id).one(db).await
    }

    /// Lookup on a column carrying a unique constraint.
    pub async fn find_one_by<C, V>(
        db: &C,
        column: E::Column,
        value: V,
    ) -> Result<Option<E::Model>, DbErr>
    where
        C: ConnectionTrait,
        V: Into<Value>,
    {
        E::find().filter(column.eq(value)).one(db).await
    }

    /// Filtered, ordered slice. `limit = None` returns everything after `offset`.
    pub async fn find_many<C>(
        db: &C,
        condition: Condition,
        order: &[(E::Column, Order)],
        offset: u64,
        limit: Option<u64>,
    ) -> Result<Vec<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut query = E::find().filter(condition);
        for (column, ord) in order {
            query = query.order_by(*column, ord.clone());
        }
        // SQLite only accepts OFFSET after a LIMIT clause.
        match (offset, limit) {
            (_, Some(limit)) => query = query.offset(offset).limit(limit),
            (0, None) => {}
            (offset, None) => query = query.offset(offset).limit(i64::MAX as u64),
        }
        query.all(db).await
    }

    pub async fn count<C>(db: &C, condition: Condition) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        E::find().filter(condition).count(db).await
    }

    /// Writes only the `Set` fields of `active_model`. Returns `None` if the
    /// row does not exist.
    pub async fn update_fields<C>(
        db: &C,
        active_model: E::ActiveModel,
    ) -> Result<Option<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        match active_model.update(db).await {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Returns `true` if a row was removed.
    pub async fn delete<C>(
        db: &C,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        let res = E::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }
}
