//! PostgreSQL post log for moonx.
//!
//! The log is a single append-only table, `tweet_logs`, with one row per
//! post that was both published and committed. Its highest `id` row names
//! the reply target of the next run.
//!
//! # Example
//!
//! ```rust,ignore
//! use moonx_database::{PgSettings, PostLogRepository, PostgresPostLogRepository};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = PgSettings::from_url(std::env::var("DATABASE_URL")?);
//! let mut repo = PostgresPostLogRepository::connect(&settings)?;
//! println!("reply target: {:?}", repo.last_post_id()?);
//! # Ok(())
//! # }
//! ```

mod connection;
mod in_memory_repository;
mod migrations;
mod models;
mod post_log_repository;

// Public modules for external access
pub mod schema;

pub use connection::{PgSettings, establish_connection};
pub use in_memory_repository::InMemoryPostLogRepository;
pub use migrations::run_migrations;
pub use models::{NewPostRecord, PostRecord};
pub use post_log_repository::{PostLogRepository, PostgresPostLogRepository};

use moonx_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
