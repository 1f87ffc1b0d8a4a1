//! PostgreSQL repository adapter.

use async_trait::async_trait;
use sqlx::PgPool;

use conversions_types::{
    ConversionId, ConversionRecord, ConversionRepository, CurrencyCode, DepartmentId,
    NewConversion, RepoError,
};

use crate::types::{CONVERSION_COLUMNS, PgConversionRow};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository with native `NUMERIC` and `TIMESTAMPTZ` columns.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_currency_conversions_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ConversionRepository for PostgresRepo {
    async fn add(&self, conversion: NewConversion) -> Result<ConversionRecord, RepoError> {
        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO currency_conversions
               (from_currency, to_currency, amount, exchange_rate, converted_amount, conversion_date, department_id)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING id"#,
        )
        .bind(conversion.from_currency.as_str())
        .bind(conversion.to_currency.as_str())
        .bind(conversion.amount)
        .bind(conversion.exchange_rate)
        .bind(conversion.converted_amount)
        .bind(conversion.conversion_date)
        .bind(conversion.department_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let id = ConversionId::new(id);
        tracing::debug!(%id, "Conversion stored");
        Ok(conversion.into_record(id))
    }

    async fn get_by_id(&self, id: ConversionId) -> Result<Option<ConversionRecord>, RepoError> {
        let sql = format!(
            "SELECT {} FROM currency_conversions WHERE id = $1",
            CONVERSION_COLUMNS
        );
        let row: Option<PgConversionRow> = sqlx::query_as(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(PgConversionRow::into_domain).transpose()
    }

    async fn get_by_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        let sql = format!(
            "SELECT {} FROM currency_conversions WHERE department_id = $1 \
             ORDER BY conversion_date DESC, id DESC",
            CONVERSION_COLUMNS
        );
        let rows: Vec<PgConversionRow> = sqlx::query_as(&sql)
            .bind(department_id.value())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(PgConversionRow::into_domain).collect()
    }

    async fn get_by_target_currency(
        &self,
        code: &CurrencyCode,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        let sql = format!(
            "SELECT {} FROM currency_conversions WHERE to_currency = $1 \
             ORDER BY conversion_date DESC, id DESC",
            CONVERSION_COLUMNS
        );
        let rows: Vec<PgConversionRow> = sqlx::query_as(&sql)
            .bind(code.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(PgConversionRow::into_domain).collect()
    }

    async fn get_all(&self) -> Result<Vec<ConversionRecord>, RepoError> {
        let sql = format!(
            "SELECT {} FROM currency_conversions ORDER BY conversion_date DESC, id DESC",
            CONVERSION_COLUMNS
        );
        let rows: Vec<PgConversionRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(PgConversionRow::into_domain).collect()
    }
}
