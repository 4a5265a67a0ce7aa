//! # msbuild-finder
//!
//! Locate the MSBuild executable that matches a requested tools version,
//! target architecture and platform.
//!
//! MSBuild lives in very different places depending on the release
//! generation: the .NET Framework directory for old versions, versioned
//! directories under Program Files for 12.0 through 15.0, and Visual Studio
//! installation roots (discovered through `vswhere.exe`) for 2017 and later.
//! On Linux and macOS the Mono `msbuild` command is preferred over `xbuild`.
//!
//! ## Features
//!
//! - `ResolutionRequest` describing what the caller wants
//! - `MsBuildFinder` session owning the version registry and directory cache
//! - `find()` async function for one-shot resolution
//! - `find_blocking()` for synchronous callers
//!
//! ## Example
//!
//! ```rust,no_run
//! use msbuild_finder::{find, Architecture, Platform, RequestedVersion, ResolutionRequest};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let request = ResolutionRequest::new(
//!         Platform::from_identifier("win32"),
//!         Architecture::X64,
//!         RequestedVersion::Auto,
//!     );
//!
//!     match find(&request).await {
//!         Ok(resolved) => println!("Using {}", resolved),
//!         Err(e) => eprintln!("{} ({})", e, e.fix_suggestion()),
//!     }
//! }
//! ```

mod detection;
mod error;
mod host;
mod options;
mod registry;
mod request;
mod resolve;
mod resolved;

pub use error::{FinderError, ProbeFailure};
pub use host::{CommandOutput, SystemHost, ToolHost};
pub use options::FindOptions;
pub use registry::{VersionKey, VersionRegistry};
pub use request::{Architecture, Platform, RequestedVersion, ResolutionRequest};
pub use resolve::{find, find_blocking, MsBuildFinder};
pub use resolved::ResolvedPath;
