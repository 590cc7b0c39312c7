//! PostgreSQL storage backend.

use async_trait::async_trait;
use bb8::Pool;
use bb8_postgres::PostgresConnectionManager;
use tokio_postgres::{NoTls, Row};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::models::{Book, BookDraft, BookId, BookPatch};
use crate::traits::BookStore;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS books (
    id          BIGSERIAL PRIMARY KEY,
    title       TEXT NOT NULL,
    author      TEXT NOT NULL,
    year        INTEGER NOT NULL,
    genre       TEXT NOT NULL,
    pages       INTEGER NOT NULL,
    available   BOOLEAN NOT NULL DEFAULT TRUE,
    cover_url   TEXT,
    description TEXT,
    rating      DOUBLE PRECISION
)";

/// Storage backend over a PostgreSQL `books` table.
///
/// Every operation runs in its own transaction; an error before commit rolls
/// the whole operation back, so nothing is ever partially applied. Id
/// assignment is delegated to the table's `BIGSERIAL` column.
pub struct PostgresStore {
    pool: Pool<PostgresConnectionManager<NoTls>>,
}

impl PostgresStore {
    /// Connect a pool to `database_url` and ensure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let manager = PostgresConnectionManager::new_from_stringlike(database_url, NoTls)
            .map_err(|e| StoreError::Backend {
                source: Some(eyre::eyre!("invalid database URL: {}", e)),
            })?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(|e| StoreError::Backend {
                source: Some(eyre::eyre!("failed to build connection pool: {}", e)),
            })?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create the `books` table if it is not there yet.
    async fn init_schema(&self) -> Result<()> {
        let conn = self.conn().await?;
        conn.execute(SCHEMA, &[]).await.map_err(db_err)?;
        info!("books table ready");
        Ok(())
    }

    async fn conn(
        &self,
    ) -> Result<bb8::PooledConnection<'_, PostgresConnectionManager<NoTls>>> {
        self.pool.get().await.map_err(|e| StoreError::Backend {
            source: Some(eyre::eyre!("failed to acquire database connection: {}", e)),
        })
    }
}

fn db_err(e: tokio_postgres::Error) -> StoreError {
    StoreError::Backend {
        source: Some(eyre::eyre!("database error: {}", e)),
    }
}

fn book_from_row(row: &Row) -> Result<Book> {
    Ok(Book {
        id: BookId(row.try_get("id").map_err(db_err)?),
        title: row.try_get("title").map_err(db_err)?,
        author: row.try_get("author").map_err(db_err)?,
        year: row.try_get("year").map_err(db_err)?,
        genre: row.try_get("genre").map_err(db_err)?,
        pages: row.try_get("pages").map_err(db_err)?,
        available: row.try_get("available").map_err(db_err)?,
        cover_url: row.try_get("cover_url").map_err(db_err)?,
        description: row.try_get("description").map_err(db_err)?,
        rating: row.try_get("rating").map_err(db_err)?,
    })
}

#[async_trait]
impl BookStore for PostgresStore {
    async fn get(&self, id: BookId) -> Result<Option<Book>> {
        debug!(%id, "fetching book from database");
        let conn = self.conn().await?;
        let row = conn
            .query_opt("SELECT * FROM books WHERE id = $1", &[&id.0])
            .await
            .map_err(db_err)?;
        row.as_ref().map(book_from_row).transpose()
    }

    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<Book>> {
        debug!(skip, limit, "listing books from database");
        let conn = self.conn().await?;
        let rows = conn
            .query(
                "SELECT * FROM books ORDER BY id OFFSET $1 LIMIT $2",
                &[&(skip as i64), &(limit as i64)],
            )
            .await
            .map_err(db_err)?;
        rows.iter().map(book_from_row).collect()
    }

    async fn create(&self, draft: BookDraft) -> Result<Book> {
        draft.validate()?;
        let year = draft.year.ok_or_else(|| StoreError::InvalidBook {
            message: "year is required".to_string(),
        })?;

        let conn = self.conn().await?;
        let row = conn
            .query_one(
                "INSERT INTO books \
                 (title, author, year, genre, pages, available, cover_url, description, rating) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
                 RETURNING *",
                &[
                    &draft.title,
                    &draft.author,
                    &year,
                    &draft.genre,
                    &draft.pages,
                    &draft.available,
                    &draft.cover_url,
                    &draft.description,
                    &draft.rating,
                ],
            )
            .await
            .map_err(db_err)?;

        let book = book_from_row(&row)?;
        info!(id = %book.id, title = %book.title, "book created in database");
        Ok(book)
    }

    async fn update(&self, id: BookId, patch: BookPatch) -> Result<Option<Book>> {
        patch.validate()?;
        let mut conn = self.conn().await?;
        let tx = conn.transaction().await.map_err(db_err)?;

        let Some(row) = tx
            .query_opt("SELECT * FROM books WHERE id = $1 FOR UPDATE", &[&id.0])
            .await
            .map_err(db_err)?
        else {
            debug!(%id, "book not found for update");
            return Ok(None);
        };

        let mut book = book_from_row(&row)?;
        patch.apply_to(&mut book);

        tx.execute(
            "UPDATE books SET title = $2, author = $3, year = $4, genre = $5, pages = $6, \
             available = $7, cover_url = $8, description = $9, rating = $10 \
             WHERE id = $1",
            &[
                &id.0,
                &book.title,
                &book.author,
                &book.year,
                &book.genre,
                &book.pages,
                &book.available,
                &book.cover_url,
                &book.description,
                &book.rating,
            ],
        )
        .await
        .map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;

        info!(%id, "book updated in database");
        Ok(Some(book))
    }

    async fn delete(&self, id: BookId) -> Result<Option<Book>> {
        let conn = self.conn().await?;
        let row = conn
            .query_opt("DELETE FROM books WHERE id = $1 RETURNING *", &[&id.0])
            .await
            .map_err(db_err)?;
        if row.is_some() {
            info!(%id, "book deleted from database");
        }
        row.as_ref().map(book_from_row).transpose()
    }
}
