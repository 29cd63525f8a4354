use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{BillRecord, BillStatus, FileUpload, StoredFile};
use crate::store::{BillsCollection, FileCollection, Store};

/// Bills and receipts persisted in a local SQLite database.
/// Receipt files are copied into `attachments_dir`.
pub struct SqliteStore {
    pool: SqlitePool,
    attachments_dir: PathBuf,
}

impl SqliteStore {
    pub async fn new(database_path: &str, attachments_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        // Create database if it doesn't exist
        if !Path::new(database_path).exists() {
            std::fs::File::create(database_path)?;
        }

        let database_url = format!("sqlite://{}", database_path);
        let pool = SqlitePool::connect(&database_url).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bills (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                type TEXT NOT NULL,
                name TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                status TEXT NOT NULL,
                commentary TEXT,
                comment_admin TEXT,
                file_url TEXT,
                file_name TEXT,
                vat TEXT,
                pct INTEGER NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_bills_date ON bills(date)")
            .execute(&pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS files (
                key TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                file_name TEXT NOT NULL,
                mime_type TEXT NOT NULL,
                path TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        info!("Opened bill store at {}", database_path);
        Ok(SqliteStore {
            pool,
            attachments_dir: attachments_dir.into(),
        })
    }

    fn bill_from_row(row: &SqliteRow) -> Result<BillRecord, StoreError> {
        let id: String = row.try_get("id")?;
        let status: String = row.try_get("status")?;
        let pct: i64 = row.try_get("pct")?;
        let pct = u32::try_from(pct).map_err(|_| StoreError::Corrupt {
            id: id.clone(),
            field: "pct",
            value: pct.to_string(),
        })?;

        Ok(BillRecord {
            id,
            email: row.try_get("email")?,
            bill_type: row.try_get("type")?,
            name: row.try_get("name")?,
            amount: row.try_get("amount")?,
            date: row.try_get("date")?,
            status: BillStatus::from(status),
            commentary: row.try_get("commentary")?,
            comment_admin: row.try_get("comment_admin")?,
            file_url: row.try_get("file_url")?,
            file_name: row.try_get("file_name")?,
            vat: row.try_get("vat")?,
            pct,
        })
    }
}

#[async_trait]
impl BillsCollection for SqliteStore {
    async fn list(&self) -> Result<Vec<BillRecord>, StoreError> {
        let rows = sqlx::query("SELECT * FROM bills ORDER BY date DESC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::bill_from_row).collect()
    }

    async fn update(&self, bill: &BillRecord) -> Result<BillRecord, StoreError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO bills
            (id, email, type, name, amount, date, status, commentary, comment_admin, file_url, file_name, vat, pct)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&bill.id)
        .bind(&bill.email)
        .bind(&bill.bill_type)
        .bind(&bill.name)
        .bind(bill.amount)
        .bind(&bill.date)
        .bind(bill.status.as_str())
        .bind(&bill.commentary)
        .bind(&bill.comment_admin)
        .bind(&bill.file_url)
        .bind(&bill.file_name)
        .bind(&bill.vat)
        .bind(i64::from(bill.pct))
        .execute(&self.pool)
        .await?;

        debug!("Saved bill {}", bill.id);
        Ok(bill.clone())
    }
}

#[async_trait]
impl FileCollection for SqliteStore {
    async fn create(&self, upload: FileUpload) -> Result<StoredFile, StoreError> {
        tokio::fs::create_dir_all(&self.attachments_dir).await?;

        let key = Uuid::new_v4().to_string();
        let path = self.attachments_dir.join(format!("{}-{}", key, upload.file_name));
        tokio::fs::write(&path, &upload.bytes).await?;
        let path = tokio::fs::canonicalize(&path).await?;

        let inserted = sqlx::query("INSERT INTO files (key, email, file_name, mime_type, path) VALUES (?, ?, ?, ?, ?)")
            .bind(&key)
            .bind(&upload.email)
            .bind(&upload.file_name)
            .bind(&upload.mime_type)
            .bind(path.to_string_lossy().to_string())
            .execute(&self.pool)
            .await;

        if let Err(e) = inserted {
            if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                warn!("Could not remove orphan receipt {}: {}", path.display(), remove_err);
            }
            return Err(e.into());
        }

        info!("Stored receipt {} ({} bytes) as {}", upload.file_name, upload.bytes.len(), key);
        Ok(StoredFile {
            file_url: format!("file://{}", path.display()),
            key,
        })
    }
}

impl Store for SqliteStore {
    fn bills(&self) -> &dyn BillsCollection {
        self
    }

    fn files(&self) -> &dyn FileCollection {
        self
    }
}
