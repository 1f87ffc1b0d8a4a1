//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use conversions_types::{
    ConversionId, ConversionRecord, ConversionRepository, CurrencyCode, DepartmentId,
    NewConversion, RepoError,
};

use crate::types::{CONVERSION_COLUMNS, SqliteConversionRow, format_timestamp};

const MIGRATION: &str = include_str!("../migrations/0001_create_currency_conversions.sql");

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
///
/// Decimals and timestamps are stored as text.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema. Safe to run more than once.
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        sqlx::raw_sql(MIGRATION)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;
        Ok(())
    }

    async fn fetch_where(
        &self,
        filter: &str,
        bind: Option<FilterValue<'_>>,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        let sql = format!(
            "SELECT {} FROM currency_conversions {} ORDER BY conversion_date DESC, id DESC",
            CONVERSION_COLUMNS, filter
        );
        let query = sqlx::query_as::<_, SqliteConversionRow>(&sql);
        let query = match bind {
            Some(FilterValue::Int(v)) => query.bind(v),
            Some(FilterValue::Text(v)) => query.bind(v),
            None => query,
        };

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(SqliteConversionRow::into_domain).collect()
    }
}

enum FilterValue<'a> {
    Int(i64),
    Text(&'a str),
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ConversionRepository for SqliteRepo {
    async fn add(&self, conversion: NewConversion) -> Result<ConversionRecord, RepoError> {
        let result = sqlx::query(
            r#"INSERT INTO currency_conversions
               (from_currency, to_currency, amount, exchange_rate, converted_amount, conversion_date, department_id)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(conversion.from_currency.as_str())
        .bind(conversion.to_currency.as_str())
        .bind(conversion.amount.to_string())
        .bind(conversion.exchange_rate.to_string())
        .bind(conversion.converted_amount.to_string())
        .bind(format_timestamp(&conversion.conversion_date))
        .bind(conversion.department_id.value())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        let id = ConversionId::new(result.last_insert_rowid());
        tracing::debug!(%id, "Conversion stored");
        Ok(conversion.into_record(id))
    }

    async fn get_by_id(&self, id: ConversionId) -> Result<Option<ConversionRecord>, RepoError> {
        let sql = format!(
            "SELECT {} FROM currency_conversions WHERE id = ?",
            CONVERSION_COLUMNS
        );
        let row: Option<SqliteConversionRow> = sqlx::query_as(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(SqliteConversionRow::into_domain).transpose()
    }

    async fn get_by_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        self.fetch_where(
            "WHERE department_id = ?",
            Some(FilterValue::Int(department_id.value())),
        )
        .await
    }

    async fn get_by_target_currency(
        &self,
        code: &CurrencyCode,
    ) -> Result<Vec<ConversionRecord>, RepoError> {
        self.fetch_where(
            "WHERE to_currency = ?",
            Some(FilterValue::Text(code.as_str())),
        )
        .await
    }

    async fn get_all(&self) -> Result<Vec<ConversionRecord>, RepoError> {
        self.fetch_where("", None).await
    }
}
