use anyhow::{anyhow, Result};
use std::env;
use std::path::{Path, PathBuf};

pub const ASSETS_DIR_ENV: &str = "PLATER_ASSETS_DIR";

/// Fixed layout the installer assumes inside the host project.
#[derive(Debug, Clone)]
pub struct HostLayout {
    root: PathBuf,
}

impl HostLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn src(&self) -> PathBuf {
        self.root.join("src")
    }

    pub fn components_dir(&self) -> PathBuf {
        self.src().join("components").join("auth")
    }

    pub fn views_dir(&self) -> PathBuf {
        self.src().join("views").join("auth")
    }

    pub fn utils_dir(&self) -> PathBuf {
        self.src().join("utils")
    }

    pub fn composables_dir(&self) -> PathBuf {
        self.src().join("composables")
    }

    pub fn store_module(&self) -> PathBuf {
        self.src().join("store").join("modules").join("auth.js")
    }

    pub fn store_index(&self) -> PathBuf {
        self.src().join("store").join("index.js")
    }

    pub fn router_index(&self) -> PathBuf {
        self.src().join("router").join("index.js")
    }

    pub fn router_module(&self) -> PathBuf {
        self.src().join("router").join("auth.js")
    }

    pub fn entry_point(&self) -> PathBuf {
        self.src().join("main.js")
    }

    pub fn config_module(&self) -> PathBuf {
        self.src().join("config").join("auth.js")
    }
}

/// Layout of the shipped scaffolding tree: `src/` holds the feature
/// sources, `stubs/` holds files installed with host-specific paths.
#[derive(Debug, Clone)]
pub struct AssetLayout {
    root: PathBuf,
}

impl AssetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn components(&self) -> PathBuf {
        self.root.join("src").join("components")
    }

    pub fn views(&self) -> PathBuf {
        self.root.join("src").join("views")
    }

    pub fn utils(&self) -> PathBuf {
        self.root.join("src").join("utils")
    }

    pub fn composables(&self) -> PathBuf {
        self.root.join("src").join("composables")
    }

    pub fn store_module(&self) -> PathBuf {
        self.root.join("src").join("store").join("auth.js")
    }

    pub fn router_stub(&self) -> PathBuf {
        self.root.join("stubs").join("router").join("auth.js")
    }

    pub fn config_stub(&self) -> PathBuf {
        self.root.join("stubs").join("config").join("auth.js")
    }
}

/// Locate the scaffolding assets: explicit flag, then environment
/// override, then an `assets` directory near the executable (walking up a
/// few levels to cover `target/debug` layouts).
pub fn resolve_assets(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        if dir.is_dir() {
            return Ok(dir);
        }
        return Err(anyhow!("Assets directory {} does not exist", dir.display()));
    }

    if let Ok(dir) = env::var(ASSETS_DIR_ENV) {
        let dir = PathBuf::from(dir);
        if dir.is_dir() {
            return Ok(dir);
        }
        return Err(anyhow!(
            "{} points at {}, which does not exist",
            ASSETS_DIR_ENV,
            dir.display()
        ));
    }

    let exe = env::current_exe()?;
    let mut dir = exe.parent();
    for _ in 0..3 {
        if let Some(candidate) = dir {
            let assets = candidate.join("assets");
            if assets.is_dir() {
                tracing::debug!("Using assets at {}", assets.display());
                return Ok(assets);
            }
            dir = candidate.parent();
        }
    }

    Err(anyhow!(
        "Could not locate the scaffolding assets; pass --assets or set {}",
        ASSETS_DIR_ENV
    ))
}
