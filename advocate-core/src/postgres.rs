//! Postgres-backed [`AdvocateStore`].
//!
//! The search predicate is generated from [`SearchField::ALL`]: every field is
//! lower-cased and compared with `LIKE` against an escaped `%needle%`
//! pattern, which is the same contract as the in-memory matcher. Specialties
//! are matched one tag at a time, never as the serialized JSON array.
//!
//! The needle is folded in Rust before binding; only the column side goes
//! through Postgres `lower()`. The two agree only when the database's
//! `LC_CTYPE` is a UTF-8 locale (e.g. `en_US.UTF-8`). Under the `C` locale
//! `lower()` folds ASCII only, so stored text like `"ÆRØ"` is not found by
//! `"ærø"` even though the fixture store finds it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::{Result, StoreError};
use crate::matcher::{normalize_query, SearchField};
use crate::store::{AdvocateStore, StoreKind};
use crate::types::{Advocate, NewAdvocate, PhoneNumber};

/// Requires a UTF-8 `LC_CTYPE`; see the module docs.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS advocates (
    id                  SERIAL PRIMARY KEY,
    first_name          TEXT NOT NULL,
    last_name           TEXT NOT NULL,
    city                TEXT NOT NULL,
    degree              TEXT NOT NULL,
    specialties         JSONB NOT NULL DEFAULT '[]'::jsonb,
    years_of_experience INTEGER NOT NULL CHECK (years_of_experience >= 0),
    phone_number        BIGINT NOT NULL,
    created_at          TIMESTAMPTZ DEFAULT now()
)
"#;

const COLUMNS: &str = "id, first_name, last_name, city, degree, specialties, \
                       years_of_experience, phone_number, created_at";

/// SQL condition for one searched field, with the pattern bound as `$1`.
pub fn field_predicate(field: SearchField) -> &'static str {
    match field {
        SearchField::FirstName => r"lower(first_name) LIKE $1 ESCAPE '\'",
        SearchField::LastName => r"lower(last_name) LIKE $1 ESCAPE '\'",
        SearchField::FullName => r"lower(first_name || ' ' || last_name) LIKE $1 ESCAPE '\'",
        SearchField::City => r"lower(city) LIKE $1 ESCAPE '\'",
        SearchField::Degree => r"lower(degree) LIKE $1 ESCAPE '\'",
        SearchField::Specialty => {
            r"EXISTS (SELECT 1 FROM jsonb_array_elements_text(specialties) AS s(tag) WHERE lower(s.tag) LIKE $1 ESCAPE '\')"
        }
        SearchField::YearsOfExperience => r"years_of_experience::text LIKE $1 ESCAPE '\'",
    }
}

/// Full filtered select, ordered by primary key.
pub fn search_sql() -> String {
    let predicates: Vec<&str> = SearchField::ALL.iter().map(|f| field_predicate(*f)).collect();
    format!(
        "SELECT {COLUMNS} FROM advocates WHERE {} ORDER BY id",
        predicates.join(" OR ")
    )
}

/// Wrap a normalized needle as a literal-substring `LIKE` pattern.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Debug, sqlx::FromRow)]
struct AdvocateRow {
    id: i32,
    first_name: String,
    last_name: String,
    city: String,
    degree: String,
    specialties: Json<Vec<String>>,
    years_of_experience: i32,
    phone_number: i64,
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<AdvocateRow> for Advocate {
    type Error = StoreError;

    fn try_from(row: AdvocateRow) -> Result<Self> {
        let years_of_experience = u32::try_from(row.years_of_experience).map_err(|_| {
            StoreError::Invalid(format!(
                "advocate {} has negative years_of_experience {}",
                row.id, row.years_of_experience
            ))
        })?;
        let phone_number = u64::try_from(row.phone_number).map_err(|_| {
            StoreError::Invalid(format!(
                "advocate {} has negative phone_number {}",
                row.id, row.phone_number
            ))
        })?;
        Ok(Advocate {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            city: row.city,
            degree: row.degree,
            specialties: row.specialties.0,
            years_of_experience,
            phone_number: PhoneNumber(phone_number),
            created_at: row.created_at,
        })
    }
}

fn decode_rows(rows: Vec<AdvocateRow>) -> Result<Vec<Advocate>> {
    rows.into_iter().map(Advocate::try_from).collect()
}

pub struct PgAdvocateStore {
    pool: PgPool,
}

impl PgAdvocateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `advocates` table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl AdvocateStore for PgAdvocateStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Database
    }

    async fn search(&self, query: Option<&str>) -> Result<Vec<Advocate>> {
        let rows: Vec<AdvocateRow> = match query.and_then(normalize_query) {
            Some(needle) => {
                sqlx::query_as(&search_sql())
                    .bind(like_pattern(&needle))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as(&format!("SELECT {COLUMNS} FROM advocates ORDER BY id"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        tracing::debug!(
            query = query.unwrap_or("all records"),
            count = rows.len(),
            "database search"
        );
        decode_rows(rows)
    }

    async fn insert_many(&self, advocates: &[NewAdvocate]) -> Result<Vec<Advocate>> {
        let sql = format!(
            "INSERT INTO advocates (first_name, last_name, city, degree, specialties, \
             years_of_experience, phone_number) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );

        let mut tx = self.pool.begin().await?;
        let mut rows = Vec::with_capacity(advocates.len());
        for advocate in advocates {
            let years = i32::try_from(advocate.years_of_experience).map_err(|_| {
                StoreError::Invalid(format!(
                    "years_of_experience {} out of range",
                    advocate.years_of_experience
                ))
            })?;
            let phone = i64::try_from(advocate.phone_number.digits()).map_err(|_| {
                StoreError::Invalid(format!(
                    "phone_number {} out of range",
                    advocate.phone_number.digits()
                ))
            })?;
            let row: AdvocateRow = sqlx::query_as(&sql)
                .bind(&advocate.first_name)
                .bind(&advocate.last_name)
                .bind(&advocate.city)
                .bind(&advocate.degree)
                .bind(Json(&advocate.specialties))
                .bind(years)
                .bind(phone)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }
        tx.commit().await?;

        tracing::info!(count = rows.len(), "inserted advocates");
        decode_rows(rows)
    }
}
