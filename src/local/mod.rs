//! Local Git repository discovery.
//!
//! Used to fill in the repository slug and pull request number when they are
//! not configured, and to locate the repository-level configuration file.
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use pr_inbox::local::discover_repository;
//!
//! let local_repo = discover_repository(Utf8Path::new("."))?;
//! let origin = local_repo.github_origin()?;
//! assert!(!origin.owner().is_empty());
//! # Ok::<(), pr_inbox::local::LocalDiscoveryError>(())
//! ```

mod discovery;
mod error;
mod remote;

pub use discovery::{LocalRepository, discover_repository};
pub use error::LocalDiscoveryError;
pub use remote::{GitHubOrigin, parse_github_remote};
