//! Repository for the post log.

use crate::{DatabaseResult, NewPostRecord, PgSettings, PostRecord, establish_connection};
use diesel::prelude::*;
use moonx_error::{DatabaseError, DatabaseErrorKind};

/// Repository trait for post log operations.
///
/// The log is append-only: there is no update or delete.
pub trait PostLogRepository {
    /// Get the post identifier of the highest-id row.
    ///
    /// # Returns
    /// Some(tweet_id) when the log has rows, None on the first run
    ///
    /// # Errors
    /// Returns DatabaseError if the query fails
    fn last_post_id(&mut self) -> DatabaseResult<Option<String>>;

    /// Append one row and commit it.
    ///
    /// # Returns
    /// The stored row with its assigned id
    ///
    /// # Errors
    /// Returns DatabaseError if the insert or the commit fails
    fn record_post(&mut self, new_record: NewPostRecord) -> DatabaseResult<PostRecord>;

    /// List the most recent rows, highest id first.
    ///
    /// # Errors
    /// Returns DatabaseError if the query fails
    fn recent_posts(&mut self, limit: i64) -> DatabaseResult<Vec<PostRecord>>;
}

/// PostgreSQL implementation of PostLogRepository.
///
/// Owns the single connection opened at process start; dropping the
/// repository closes it.
pub struct PostgresPostLogRepository {
    conn: PgConnection,
}

impl PostgresPostLogRepository {
    /// Create a new repository that takes ownership of a connection.
    ///
    /// # Example
    /// ```no_run
    /// use moonx_database::{PgSettings, PostgresPostLogRepository, establish_connection};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let conn = establish_connection(&PgSettings::from_url("postgres://localhost/moonx"))?;
    /// let repo = PostgresPostLogRepository::new(conn);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }

    /// Connect and wrap the connection in a repository.
    ///
    /// # Errors
    /// Returns DatabaseError if the server cannot be reached
    pub fn connect(settings: &PgSettings) -> DatabaseResult<Self> {
        establish_connection(settings).map(Self::new)
    }

    /// Borrow the underlying connection, e.g. to run migrations.
    pub fn connection_mut(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}

impl PostLogRepository for PostgresPostLogRepository {
    #[tracing::instrument(skip(self))]
    fn last_post_id(&mut self) -> DatabaseResult<Option<String>> {
        use crate::schema::tweet_logs::dsl;

        dsl::tweet_logs
            .select(dsl::tweet_id)
            .order(dsl::id.desc())
            .first::<String>(&mut self.conn)
            .optional()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))
    }

    #[tracing::instrument(skip(self, new_record), fields(tweet_id = %new_record.tweet_id, replied = new_record.replied))]
    fn record_post(&mut self, new_record: NewPostRecord) -> DatabaseResult<PostRecord> {
        use crate::schema::tweet_logs;

        self.conn
            .transaction(|conn| {
                diesel::insert_into(tweet_logs::table)
                    .values(&new_record)
                    .returning(PostRecord::as_returning())
                    .get_result(conn)
            })
            .map_err(|e: diesel::result::Error| {
                DatabaseError::new(DatabaseErrorKind::Write(e.to_string()))
            })
    }

    #[tracing::instrument(skip(self))]
    fn recent_posts(&mut self, limit: i64) -> DatabaseResult<Vec<PostRecord>> {
        use crate::schema::tweet_logs::dsl;

        dsl::tweet_logs
            .order(dsl::id.desc())
            .limit(limit)
            .select(PostRecord::as_select())
            .load(&mut self.conn)
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))
    }
}
