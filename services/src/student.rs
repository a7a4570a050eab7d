use chrono::Utc;
use db::{
    models::{
        attendance_record,
        student::{ActiveModel, Column, Entity},
    },
    repository::Repository,
};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, NotSet, Order, QueryFilter,
    Set, SqlErr, TransactionTrait,
};
use tracing::info;

use crate::error::{EntityKind, ServiceError, ServiceResult};
use crate::service::ToActiveModel;

pub use db::models::student::Model as Student;

const DUPLICATE_ON_CREATE: &str = "Roll number already registered";
const DUPLICATE_ON_UPDATE: &str = "Roll number already taken";

#[derive(Debug, Clone)]
pub struct CreateStudent {
    pub name: String,
    pub roll_no: String,
    pub department: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateStudent {
    pub name: Option<String>,
    pub roll_no: Option<String>,
    pub department: Option<String>,
}

impl UpdateStudent {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.roll_no.is_none() && self.department.is_none()
    }
}

impl ToActiveModel<Entity> for CreateStudent {
    fn to_active_model(self) -> ActiveModel {
        ActiveModel {
            name: Set(self.name),
            roll_no: Set(self.roll_no),
            department: Set(self.department),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl ToActiveModel<Entity> for UpdateStudent {
    /// Only the provided fields are `Set`; the caller fills in the id.
    fn to_active_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: self.name.map_or(NotSet, Set),
            roll_no: self.roll_no.map_or(NotSet, Set),
            department: self.department.map_or(NotSet, Set),
            created_at: NotSet,
        }
    }
}

/// Maps a unique-index violation on `roll_no` to a conflict with `message`.
fn map_unique(err: DbErr, message: &str) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::Conflict(message.to_string()),
        _ => ServiceError::Database(err),
    }
}

pub struct StudentService;

impl StudentService {
    pub async fn create(db: &DatabaseConnection, params: CreateStudent) -> ServiceResult<Student> {
        if Repository::<Entity>::find_one_by(db, Column::RollNo, params.roll_no.clone())
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(DUPLICATE_ON_CREATE.to_string()));
        }

        let student = Repository::<Entity>::insert(db, params.to_active_model())
            .await
            .map_err(|e| map_unique(e, DUPLICATE_ON_CREATE))?;

        info!(student_id = student.id, roll_no = %student.roll_no, "Registered student");
        Ok(student)
    }

    /// Ordered by id ascending.
    pub async fn list(db: &DatabaseConnection, skip: u64, limit: u64) -> ServiceResult<Vec<Student>> {
        Ok(Repository::<Entity>::find_many(
            db,
            Condition::all(),
            &[(Column::Id, Order::Asc)],
            skip,
            Some(limit),
        )
        .await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i64) -> ServiceResult<Student> {
        Repository::<Entity>::find_by_id(db, id)
            .await?
            .ok_or(ServiceError::not_found(EntityKind::Student, id))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: i64,
        params: UpdateStudent,
    ) -> ServiceResult<Student> {
        let current = Self::get(db, id).await?;
        if params.is_empty() {
            return Ok(current);
        }

        if let Some(roll_no) = params.roll_no.as_deref() {
            let holder = Repository::<Entity>::find_one_by(db, Column::RollNo, roll_no).await?;
            if holder.is_some_and(|s| s.id != id) {
                return Err(ServiceError::Conflict(DUPLICATE_ON_UPDATE.to_string()));
            }
        }

        let mut patch = params.to_active_model();
        patch.id = Set(id);

        let updated = Repository::<Entity>::update_fields(db, patch)
            .await
            .map_err(|e| map_unique(e, DUPLICATE_ON_UPDATE))?
            .ok_or(ServiceError::not_found(EntityKind::Student, id))?;

        info!(student_id = id, "Updated student");
        Ok(updated)
    }

    /// Removes the student together with their attendance records.
    pub async fn delete(db: &DatabaseConnection, id: i64) -> ServiceResult<()> {
        let txn = db.begin().await?;

        if Repository::<Entity>::find_by_id(&txn, id).await?.is_none() {
            txn.rollback().await?;
            return Err(ServiceError::not_found(EntityKind::Student, id));
        }

        let records = attendance_record::Entity::delete_many()
            .filter(attendance_record::Column::StudentId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;
        Repository::<Entity>::delete(&txn, id).await?;

        txn.commit().await?;

        info!(student_id = id, records, "Deleted student");
        Ok(())
    }
}
