use crate::domain::{
    models::{
        appointment::{Appointment, AppointmentFilter, AppointmentStatus},
        slot::Slot,
    },
    ports::AppointmentRepository,
};
use crate::error::AppError;
use crate::infra::repositories::map_write_error;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepo {
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (id, name, email, phone, date, slot, message, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *"
        )
            .bind(&appointment.id).bind(&appointment.name).bind(&appointment.email).bind(&appointment.phone)
            .bind(appointment.date).bind(appointment.slot.to_string()).bind(&appointment.message)
            .bind(appointment.status.as_str()).bind(appointment.created_at)
            .fetch_one(&self.pool).await.map_err(map_write_error)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::StoreUnavailable)
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE date = $1 ORDER BY slot ASC").bind(date).fetch_all(&self.pool).await.map_err(AppError::StoreUnavailable)
    }

    async fn find_active_by_slot(&self, date: NaiveDate, slot: &Slot) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE date = $1 AND slot = $2 AND status IN ('pending', 'approved')")
            .bind(date).bind(slot.to_string())
            .fetch_all(&self.pool).await.map_err(AppError::StoreUnavailable)
    }

    async fn list(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM appointments WHERE 1 = 1");
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(date) = filter.date {
            query.push(" AND date = ").push_bind(date);
        }
        query.push(" ORDER BY created_at DESC, id DESC");

        query.build_query_as::<Appointment>().fetch_all(&self.pool).await.map_err(AppError::StoreUnavailable)
    }

    async fn update_status(&self, id: &str, status: AppointmentStatus) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("UPDATE appointments SET status = $1 WHERE id = $2 RETURNING *")
            .bind(status.as_str()).bind(id)
            .fetch_optional(&self.pool).await.map_err(map_write_error)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::StoreUnavailable)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Appointment not found".into())); }
        Ok(())
    }
}
