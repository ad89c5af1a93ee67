use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const MANIFEST_FILE: &str = "package.json";

/// Substring of the manifest name that marks a Vue3Plate project.
/// Matched exactly (case-sensitive), no normalization.
pub const NAME_MARKER: &str = "vue3plate";

/// Alternative eligibility path: the project declares the full framework
/// stack even if its name doesn't carry the marker.
pub const REQUIRED_FRAMEWORKS: [&str; 3] = ["vue", "vue-router", "vuex"];

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("could not read {MANIFEST_FILE}: {0}")]
    Read(#[from] std::io::Error),
    #[error("could not parse {MANIFEST_FILE} as JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The slice of `package.json` the prober consults. Read-only; never
/// written back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: HashMap<String, String>,
}

impl Manifest {
    pub fn load(project_root: &Path) -> Result<Option<Self>, ManifestError> {
        let path = project_root.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let manifest: Manifest = serde_json::from_str(&content)?;
        Ok(Some(manifest))
    }

    pub fn has_name_marker(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.contains(NAME_MARKER))
    }

    pub fn has_framework_stack(&self) -> bool {
        REQUIRED_FRAMEWORKS
            .iter()
            .all(|dep| self.dependencies.contains_key(*dep))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    /// No manifest file at the project root. Fails closed.
    MissingManifest,
    /// Manifest present but neither the name marker nor the framework
    /// stack was found.
    Unrecognized,
    /// Manifest recognized but the project has no source directory.
    MissingSrcDir,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eligibility::Eligible => write!(f, "project is a Vue3Plate project"),
            Eligibility::MissingManifest => {
                write!(f, "no {} found in the project root", MANIFEST_FILE)
            }
            Eligibility::Unrecognized => write!(
                f,
                "manifest name does not contain '{}' and the {} dependencies are not all declared",
                NAME_MARKER,
                REQUIRED_FRAMEWORKS.join(", ")
            ),
            Eligibility::MissingSrcDir => {
                write!(f, "project has no src directory")
            }
        }
    }
}

/// Decide whether installation should proceed. Reads the manifest, nothing
/// else; a malformed manifest propagates as an error (unexpected failure),
/// a missing one fails closed.
pub fn probe(project_root: &Path) -> Result<Eligibility, ManifestError> {
    let manifest = match Manifest::load(project_root)? {
        Some(manifest) => manifest,
        None => return Ok(Eligibility::MissingManifest),
    };

    if !manifest.has_name_marker() && !manifest.has_framework_stack() {
        return Ok(Eligibility::Unrecognized);
    }

    if !project_root.join("src").is_dir() {
        return Ok(Eligibility::MissingSrcDir);
    }

    Ok(Eligibility::Eligible)
}
