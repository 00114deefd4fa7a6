//! Audit file storage for moonx.
//!
//! Raw responses from the astronomy provider and the posting service are
//! written to an output directory so an operator can see exactly what each
//! run received. Two write modes exist:
//!
//! - **Overwrite**: a fixed file name replaced on every run (`moon_raw.json`)
//! - **Unique**: a timestamped name that never replaces an earlier file
//!   (`tweet_metadata_20250101_193000.json`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;

pub use filesystem::{AuditStore, RAW_ASTRONOMY_FILE, POST_METADATA_PREFIX, timestamped_name};
