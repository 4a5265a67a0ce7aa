//! MSBuild resolution entry point.

use crate::detection::{
    detect_version, find_edition_folder, find_executables_under, query_latest_install_path,
    DirectoryScanner,
};
use crate::{
    Architecture, FindOptions, FinderError, Platform, RequestedVersion, ResolutionRequest,
    ResolvedPath, SystemHost, ToolHost, VersionKey, VersionRegistry,
};
use std::path::{Component, Path, PathBuf};

const PROGRAM_FILES_X86_VAR: &str = "ProgramFiles(x86)";
const PROGRAM_FILES_VAR: &str = "ProgramFiles";
const PROGRAM_FILES_X86_DEFAULT: &str = "C:/Program Files (x86)";
const PROGRAM_FILES_DEFAULT: &str = "C:/Program Files";

const WINDIR_VAR: &str = "WINDIR";
const WINDIR_DEFAULT: &str = "C:/Windows";

/// Directory name MSBuild uses for 64-bit binaries.
const AMD64_DIR: &str = "amd64";

/// A resolution session.
///
/// The session owns the version registry and the directory cache. Versions
/// discovered while resolving one request stay known for later requests on
/// the same finder, and directories are listed at most once. Use separate
/// finders for independent sessions.
///
/// # Example
///
/// ```rust,no_run
/// use msbuild_finder::{
///     Architecture, MsBuildFinder, Platform, RequestedVersion, ResolutionRequest,
/// };
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), msbuild_finder::FinderError> {
///     let mut finder = MsBuildFinder::new();
///     let request = ResolutionRequest::new(
///         Platform::current(),
///         Architecture::X64,
///         "16.0".parse()?,
///     );
///     let msbuild = finder.resolve(&request).await?;
///     println!("{}", msbuild);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MsBuildFinder<H = SystemHost> {
    host: H,
    registry: VersionRegistry,
    scanner: DirectoryScanner,
}

impl MsBuildFinder<SystemHost> {
    /// Finder on the real system with default options.
    pub fn new() -> Self {
        Self::with_options(&FindOptions::default())
    }

    pub fn with_options(options: &FindOptions) -> Self {
        Self::with_host(SystemHost::new(options))
    }
}

impl Default for MsBuildFinder<SystemHost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ToolHost> MsBuildFinder<H> {
    /// Finder using a custom host and the seeded version registry.
    pub fn with_host(host: H) -> Self {
        Self {
            host,
            registry: VersionRegistry::default(),
            scanner: DirectoryScanner::new(),
        }
    }

    /// The versions known to this session.
    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    /// Installation root reported by `vswhere.exe` under `root`, if any.
    pub async fn installer_path(&self, root: &Path) -> Option<PathBuf> {
        query_latest_install_path(&self.host, root).await
    }

    /// Resolve a request to an executable path or command name.
    ///
    /// # Resolution Process
    ///
    /// - Linux/macOS: `msbuild` if it is on `PATH`, otherwise `xbuild`
    /// - Other non-Windows platforms: `xbuild`
    /// - Windows:
    ///   1. Pick Program Files (x86) for `X64`, Program Files otherwise
    ///   2. For `auto` or versions above 15, run automatic detection, which
    ///      also registers newly installed versions
    ///   3. For 15.0 prefer a Visual Studio 2017 edition folder
    ///   4. Build the path for the version's generation
    ///
    /// # Errors
    ///
    /// - [`FinderError::UnknownVersion`] if the version has no known mapping
    /// - [`FinderError::ExecutableNotFound`] if a 16.0+ installation has no
    ///   `MSBuild.exe` for the requested architecture
    pub async fn resolve(
        &mut self,
        request: &ResolutionRequest,
    ) -> Result<ResolvedPath, FinderError> {
        match request.platform {
            Platform::Unix => Ok(self.unix_command()),
            Platform::Other => Ok(ResolvedPath::XBUILD),
            Platform::Windows => self.resolve_windows(request).await,
        }
    }

    /// [`resolve`](Self::resolve) on a private current-thread runtime.
    ///
    /// Must not be called from inside an async context.
    pub fn resolve_blocking(
        &mut self,
        request: &ResolutionRequest,
    ) -> Result<ResolvedPath, FinderError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(FinderError::Runtime)?;
        runtime.block_on(self.resolve(request))
    }

    fn unix_command(&self) -> ResolvedPath {
        match self.host.find_on_path("msbuild") {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using msbuild over xbuild");
                ResolvedPath::MSBUILD
            }
            None => ResolvedPath::XBUILD,
        }
    }

    fn env_dir(&self, key: &str, default: &str) -> PathBuf {
        self.host
            .env_var(key)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(default))
    }

    /// On 64-bit systems MSBuild lives under the x86 Program Files folder.
    fn program_files_root(&self, architecture: Architecture) -> PathBuf {
        if architecture.is_64_bit() {
            self.env_dir(PROGRAM_FILES_X86_VAR, PROGRAM_FILES_X86_DEFAULT)
        } else {
            self.env_dir(PROGRAM_FILES_VAR, PROGRAM_FILES_DEFAULT)
        }
    }

    async fn resolve_windows(
        &mut self,
        request: &ResolutionRequest,
    ) -> Result<ResolvedPath, FinderError> {
        let is_64_bit = request.architecture.is_64_bit();
        let path_root = self.program_files_root(request.architecture);

        let (msbuild_root, version) = match request.requested_version {
            RequestedVersion::Auto => self.detect(&path_root).await,
            RequestedVersion::Exact(version) if version.major() > 15 => {
                let (root, _) = self.detect(&path_root).await;
                (root, version)
            }
            RequestedVersion::Exact(version) if version >= VersionKey::VS2017 => {
                let root = find_edition_folder(&path_root).unwrap_or(path_root);
                (root, version)
            }
            RequestedVersion::Exact(version) => (path_root, version),
        };

        let display = self
            .registry
            .lookup(version)
            .ok_or_else(|| FinderError::UnknownVersion {
                requested: request.requested_version.to_string(),
            })?
            .to_string();

        let major = version.major();
        if major > 15 {
            let msbuild_home = msbuild_root.join("MSBuild");
            let executables = find_executables_under(&mut self.scanner, &msbuild_home).map_err(|e| {
                FinderError::ExecutableNotFound {
                    search_root: msbuild_home.clone(),
                    source: Some(e),
                }
            })?;
            let exe = executables
                .into_iter()
                .find(|exe| has_amd64_component(exe) == is_64_bit)
                .ok_or_else(|| FinderError::ExecutableNotFound {
                    search_root: msbuild_home.clone(),
                    source: None,
                })?;
            Ok(ResolvedPath::Executable(exe))
        } else if major >= 12 {
            let mut bin = msbuild_root.join("MSBuild").join(&display).join("Bin");
            if is_64_bit {
                bin.push(AMD64_DIR);
            }
            Ok(ResolvedPath::Executable(bin.join("MSBuild.exe")))
        } else {
            let windows_dir = match &request.windows_directory {
                Some(dir) => dir.clone(),
                None => self.env_dir(WINDIR_VAR, WINDIR_DEFAULT),
            };
            let framework = if is_64_bit { "Framework64" } else { "Framework" };
            Ok(ResolvedPath::Executable(
                windows_dir
                    .join("Microsoft.Net")
                    .join(framework)
                    .join(&display)
                    .join("MSBuild.exe"),
            ))
        }
    }

    async fn detect(&mut self, path_root: &Path) -> (PathBuf, VersionKey) {
        detect_version(&self.host, &mut self.registry, &mut self.scanner, path_root).await
    }
}

fn has_amd64_component(path: &Path) -> bool {
    path.components()
        .any(|component| matches!(component, Component::Normal(name) if name == AMD64_DIR))
}

/// Resolve a request with a fresh finder on the real system.
///
/// # Example
///
/// ```rust,no_run
/// use msbuild_finder::{find, Architecture, Platform, RequestedVersion, ResolutionRequest};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let request =
///         ResolutionRequest::new(Platform::current(), Architecture::X86, RequestedVersion::Auto);
///     match find(&request).await {
///         Ok(msbuild) => println!("MSBuild: {}", msbuild),
///         Err(e) => eprintln!("{}", e),
///     }
/// }
/// ```
pub async fn find(request: &ResolutionRequest) -> Result<ResolvedPath, FinderError> {
    MsBuildFinder::new().resolve(request).await
}

/// Synchronous [`find`] for callers without an async runtime.
pub fn find_blocking(request: &ResolutionRequest) -> Result<ResolvedPath, FinderError> {
    MsBuildFinder::new().resolve_blocking(request)
}
