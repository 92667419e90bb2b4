use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppResult;
use crate::models::employee::{Employee, EmployeeRow};

#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(connect_options)
            .await?;

        Ok(Database { pool })
    }

    /// Single-connection in-memory database. The connection is never recycled,
    /// otherwise the database would vanish with it.
    #[cfg(test)]
    pub async fn in_memory() -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let db = Database { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        let migrations = [include_str!("../migrations/001_employees.sql")];

        for (idx, migration_sql) in migrations.iter().enumerate() {
            tracing::info!("Running migration {}", idx + 1);
            sqlx::raw_sql(migration_sql).execute(&self.pool).await?;
        }

        tracing::info!("All migrations completed");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn get_employee_by_id(&self, id: i64) -> AppResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, name, CAST(flags AS BLOB) AS flags
            FROM employees
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Employee::from))
    }

    pub async fn get_all_employees(&self) -> AppResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, name, CAST(flags AS BLOB) AS flags
            FROM employees
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    pub async fn employee_exists(&self, id: i64) -> AppResult<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Replaces the stored flags column wholesale. Returns false when no row matched.
    pub async fn set_employee_flags(&self, id: i64, flags_json: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE employees SET flags = ? WHERE id = ?")
            .bind(flags_json)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Test fixtures only; employees are otherwise pre-seeded outside the service.
    #[cfg(test)]
    pub async fn insert_employee(&self, id: i64, name: &str, flags: Option<&str>) -> AppResult<()> {
        sqlx::query("INSERT INTO employees (id, name, flags) VALUES (?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(flags)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
