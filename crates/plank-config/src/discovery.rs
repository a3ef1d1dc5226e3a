//! Locating and loading per-application override declarations.
//!
//! Applications live in subdirectories of `applications/`; each carries a
//! `plank.toml` declaration. A missing directory or declaration is a fatal
//! configuration error; a build must never proceed on an empty plan.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::compose::compose;
use crate::env::BuildMode;
use crate::error::{ConfigError, Result};
use crate::overrides::OverrideDeclaration;
use crate::plan::BuildPlan;

/// Directory under the workspace root that holds the applications.
pub const APPLICATIONS_DIR: &str = "applications";

/// Declaration filename expected inside each application directory.
pub const DECLARATION_FILE: &str = "plank.toml";

/// A resolved application: its name and the directory backing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    name: String,
    dir: PathBuf,
}

impl Application {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Source tree the plan compiles from.
    pub fn src_dir(&self) -> PathBuf {
        self.dir.join("src")
    }

    /// Output directory for emitted assets.
    pub fn dist_dir(&self) -> PathBuf {
        self.dir.join("dist")
    }

    pub fn declaration_path(&self) -> PathBuf {
        self.dir.join(DECLARATION_FILE)
    }
}

/// Filesystem resolution of application identifiers.
///
/// # Example
///
/// ```no_run
/// use plank_config::{AppDiscovery, BuildMode};
///
/// let discovery = AppDiscovery::new(".");
/// let plan = discovery.plan(BuildMode::Production, "shop").unwrap();
/// ```
pub struct AppDiscovery {
    root: PathBuf,
}

impl AppDiscovery {
    /// Create a discovery rooted at the directory holding `applications/`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an application identifier to its directory.
    pub fn resolve(&self, name: &str) -> Result<Application> {
        let dir = self.root.join(APPLICATIONS_DIR).join(name);
        if !dir.is_dir() {
            return Err(ConfigError::ApplicationNotFound {
                name: name.to_string(),
                dir,
            });
        }
        Ok(Application::new(name, dir))
    }

    /// Load an application's override declaration.
    pub fn load(&self, app: &Application) -> Result<OverrideDeclaration> {
        let path = app.declaration_path();
        if !path.is_file() {
            return Err(ConfigError::DeclarationNotFound { path });
        }

        let content = fs::read_to_string(&path)?;
        let declaration = OverrideDeclaration::from_toml(&content)?;
        debug!(app = app.name(), path = %path.display(), "loaded override declaration");
        Ok(declaration)
    }

    /// Resolve, load, and compose in one step.
    pub fn plan(&self, mode: BuildMode, name: &str) -> Result<BuildPlan> {
        let app = self.resolve(name)?;
        let overrides = self.load(&app)?;
        Ok(compose(mode, &app, &overrides))
    }

    /// Names of applications that carry a declaration, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let apps_dir = self.root.join(APPLICATIONS_DIR);
        if !apps_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&apps_dir)? {
            let entry = entry?;
            if !entry.path().is_dir() || !entry.path().join(DECLARATION_FILE).is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}
