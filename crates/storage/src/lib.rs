use std::{str::FromStr, time::Duration};

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    SqlitePool,
};
use thiserror::Error;

use jobpulse_core::types::{
    Application, Company, Job, NewApplication, NewCompany, NewJob, NewReview, NewUser, Review,
    User,
};
use jobpulse_core::SeedGateway;

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// SQLite extended result code for a violated foreign key.
const SQLITE_CONSTRAINT_FOREIGNKEY: &str = "787";

/// Top-level database handle that owns the SQLite connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Establishes a new SQLite connection pool for the provided connection string.
    ///
    /// Every pooled connection enforces foreign keys and runs in WAL mode.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(StorageError::Connect)?
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(StorageError::Connect)?;

        Ok(Self { pool })
    }

    /// Applies the schema located under `migrations/`.
    pub async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(StorageError::Migration)?;
        Ok(())
    }

    /// Closes every pooled connection. Later queries fail with `PoolClosed`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn users(&self) -> UserRepository {
        UserRepository {
            pool: self.pool.clone(),
        }
    }

    pub fn companies(&self) -> CompanyRepository {
        CompanyRepository {
            pool: self.pool.clone(),
        }
    }

    /// Returns a handle for job postings and their saved-by links.
    pub fn jobs(&self) -> JobRepository {
        JobRepository {
            pool: self.pool.clone(),
        }
    }

    pub fn applications(&self) -> ApplicationRepository {
        ApplicationRepository {
            pool: self.pool.clone(),
        }
    }

    pub fn reviews(&self) -> ReviewRepository {
        ReviewRepository {
            pool: self.pool.clone(),
        }
    }

    /// Exposes the inner pool when lower level access is required.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// General storage level errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to connect to sqlite: {0}")]
    Connect(sqlx::Error),
    #[error("failed to run database migrations: {0}")]
    Migration(MigrateError),
    #[error("{table} row references a missing record")]
    MissingReference {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    fn from_insert(table: &'static str, err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err)
                if db_err.code().as_deref() == Some(SQLITE_CONSTRAINT_FOREIGNKEY) =>
            {
                Self::MissingReference {
                    table,
                    source: sqlx::Error::Database(db_err),
                }
            }
            other => Self::Database(other),
        }
    }
}

/// Repository responsible for the `users` table.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub async fn create(&self, user: NewUser) -> Result<User, StorageError> {
        let created_at = Utc::now();
        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, email, role, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(to_rfc3339(created_at))
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::from_insert("users", err))?;

        Ok(user.into_stored(created_at))
    }
}

/// Repository responsible for the `companies` table.
#[derive(Clone)]
pub struct CompanyRepository {
    pool: SqlitePool,
}

impl CompanyRepository {
    pub async fn create(&self, company: NewCompany) -> Result<Company, StorageError> {
        let created_at = Utc::now();
        sqlx::query(
            "INSERT INTO companies \
             (id, name, description, industry, location, website, owner_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&company.id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(&company.industry)
        .bind(&company.location)
        .bind(&company.website)
        .bind(&company.owner_id)
        .bind(to_rfc3339(created_at))
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::from_insert("companies", err))?;

        Ok(company.into_stored(created_at))
    }
}

/// Repository responsible for the `jobs` and `job_saved_by` tables.
#[derive(Clone)]
pub struct JobRepository {
    pool: SqlitePool,
}

impl JobRepository {
    /// Inserts the job and its saved-by links in one transaction.
    pub async fn create(&self, job: NewJob) -> Result<Job, StorageError> {
        let created_at = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO jobs \
             (id, title, description, location, salary, job_type, company_id, posted_by_id, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(job.salary)
        .bind(job.job_type.as_str())
        .bind(&job.company_id)
        .bind(&job.posted_by_id)
        .bind(to_rfc3339(created_at))
        .execute(&mut *tx)
        .await
        .map_err(|err| StorageError::from_insert("jobs", err))?;

        for user_id in &job.saved_by {
            sqlx::query("INSERT INTO job_saved_by (job_id, user_id) VALUES (?, ?)")
                .bind(&job.id)
                .bind(user_id)
                .execute(&mut *tx)
                .await
                .map_err(|err| StorageError::from_insert("job_saved_by", err))?;
        }

        tx.commit().await?;
        Ok(job.into_stored(created_at))
    }
}

/// Repository responsible for the `applications` table.
#[derive(Clone)]
pub struct ApplicationRepository {
    pool: SqlitePool,
}

impl ApplicationRepository {
    pub async fn create(&self, application: NewApplication) -> Result<Application, StorageError> {
        let created_at = Utc::now();
        sqlx::query(
            "INSERT INTO applications (id, job_id, applicant_id, resume, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&application.id)
        .bind(&application.job_id)
        .bind(&application.applicant_id)
        .bind(&application.resume)
        .bind(application.status.as_str())
        .bind(to_rfc3339(created_at))
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::from_insert("applications", err))?;

        Ok(application.into_stored(created_at))
    }
}

/// Repository responsible for the `reviews` table.
#[derive(Clone)]
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    pub async fn create(&self, review: NewReview) -> Result<Review, StorageError> {
        let created_at = Utc::now();
        sqlx::query(
            "INSERT INTO reviews \
             (id, reviewer_id, entity_id, entity_type, rating, comment, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&review.id)
        .bind(&review.reviewer_id)
        .bind(&review.entity_id)
        .bind(review.entity_type.as_str())
        .bind(i64::from(review.rating))
        .bind(&review.comment)
        .bind(to_rfc3339(created_at))
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::from_insert("reviews", err))?;

        Ok(review.into_stored(created_at))
    }
}

impl SeedGateway for Database {
    type Error = StorageError;

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        self.users().create(user).await
    }

    async fn create_company(&self, company: NewCompany) -> Result<Company, StorageError> {
        self.companies().create(company).await
    }

    async fn create_job(&self, job: NewJob) -> Result<Job, StorageError> {
        self.jobs().create(job).await
    }

    async fn create_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, StorageError> {
        self.applications().create(application).await
    }

    async fn create_review(&self, review: NewReview) -> Result<Review, StorageError> {
        self.reviews().create(review).await
    }

    async fn close(&self) {
        Database::close(self).await;
    }
}

fn to_rfc3339(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobpulse_core::types::{JobType, ReviewEntityType, Role};
    use tempfile::TempDir;

    async fn setup_db() -> (TempDir, Database) {
        let dir = tempfile::tempdir().expect("tempdir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("seed.db").display());
        let db = Database::connect(&url).await.expect("connect");
        db.run_migrations().await.expect("migrations");
        (dir, db)
    }

    fn new_user(id: &str, role: Role) -> NewUser {
        NewUser {
            id: id.to_string(),
            first_name: "Mia".into(),
            last_name: "Lopez".into(),
            email: format!("{id}@example.com"),
            role,
        }
    }

    fn new_company(id: &str, owner_id: &str) -> NewCompany {
        NewCompany {
            id: id.to_string(),
            name: "Lopez LLC".into(),
            description: "Seamless modular platform".into(),
            industry: "Finance".into(),
            location: "Lisbon".into(),
            website: "https://lopez.io".into(),
            owner_id: owner_id.to_string(),
        }
    }

    fn new_job(id: &str, company_id: &str, posted_by_id: &str, saved_by: Vec<String>) -> NewJob {
        NewJob {
            id: id.to_string(),
            title: "Accountant".into(),
            description: "Lorem ipsum.".into(),
            location: "Berlin".into(),
            salary: 55_000.5,
            job_type: JobType::Remote,
            company_id: company_id.to_string(),
            posted_by_id: posted_by_id.to_string(),
            saved_by,
        }
    }

    async fn count(db: &Database, table: &str) -> i64 {
        let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(db.pool())
            .await
            .expect("count rows");
        row.0
    }

    #[tokio::test]
    async fn migrations_apply() {
        let (_dir, db) = setup_db().await;

        let tables: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'")
                .fetch_one(db.pool())
                .await
                .expect("fetch tables");
        assert!(tables.0 >= 6, "expected seed tables to be created");
    }

    #[tokio::test]
    async fn create_user_assigns_timestamp_and_persists_role() {
        let (_dir, db) = setup_db().await;
        let before = Utc::now();

        let user = db
            .create_user(new_user("u-1", Role::CompanyOwner))
            .await
            .expect("insert user");
        assert_eq!(user.id, "u-1");
        assert!(user.created_at >= before);

        let role: (String,) = sqlx::query_as("SELECT role FROM users WHERE id = 'u-1'")
            .fetch_one(db.pool())
            .await
            .expect("fetch role");
        assert_eq!(role.0, "COMPANY");
    }

    #[tokio::test]
    async fn company_with_unknown_owner_is_rejected() {
        let (_dir, db) = setup_db().await;

        let err = db
            .create_company(new_company("c-1", "missing"))
            .await
            .expect_err("foreign key should fail");
        assert!(matches!(
            err,
            StorageError::MissingReference {
                table: "companies",
                ..
            }
        ));
        assert_eq!(count(&db, "companies").await, 0);
    }

    #[tokio::test]
    async fn job_persists_saved_by_links() {
        let (_dir, db) = setup_db().await;
        db.create_user(new_user("owner", Role::CompanyOwner))
            .await
            .expect("owner");
        db.create_user(new_user("fan", Role::Seeker))
            .await
            .expect("fan");
        db.create_company(new_company("c-1", "owner"))
            .await
            .expect("company");

        let job = db
            .create_job(new_job("j-1", "c-1", "owner", vec!["fan".to_string()]))
            .await
            .expect("job");
        assert_eq!(job.saved_by, vec!["fan".to_string()]);
        assert_eq!(count(&db, "job_saved_by").await, 1);

        let salary: (f64,) = sqlx::query_as("SELECT salary FROM jobs WHERE id = 'j-1'")
            .fetch_one(db.pool())
            .await
            .expect("salary");
        assert_eq!(salary.0, 55_000.5);
    }

    #[tokio::test]
    async fn job_with_unknown_saver_rolls_back() {
        let (_dir, db) = setup_db().await;
        db.create_user(new_user("owner", Role::CompanyOwner))
            .await
            .expect("owner");
        db.create_company(new_company("c-1", "owner"))
            .await
            .expect("company");

        let err = db
            .create_job(new_job("j-1", "c-1", "owner", vec!["ghost".to_string()]))
            .await
            .expect_err("saver must exist");
        assert!(matches!(
            err,
            StorageError::MissingReference {
                table: "job_saved_by",
                ..
            }
        ));
        assert_eq!(count(&db, "jobs").await, 0);
    }

    #[tokio::test]
    async fn review_rating_outside_bounds_is_rejected() {
        let (_dir, db) = setup_db().await;
        db.create_user(new_user("seeker", Role::Seeker))
            .await
            .expect("seeker");

        let review = NewReview {
            id: "r-1".into(),
            reviewer_id: "seeker".into(),
            entity_id: "c-1".into(),
            entity_type: ReviewEntityType::Company,
            rating: 6,
            comment: "Too good.".into(),
        };
        let err = db.create_review(review).await.expect_err("check constraint");
        assert!(matches!(err, StorageError::Database(_)));
    }

    #[tokio::test]
    async fn close_rejects_later_writes() {
        let (_dir, db) = setup_db().await;
        SeedGateway::close(&db).await;

        let err = db
            .create_user(new_user("late", Role::Admin))
            .await
            .expect_err("pool is closed");
        assert!(matches!(err, StorageError::Database(sqlx::Error::PoolClosed)));
    }
}
