use crate::copier::{copy_directory, copy_file, copy_file_transformed};
use crate::manifest::{self, Eligibility};
use crate::patcher::{
    add_init_call, add_init_import, add_router_import, add_store_import, patch_file,
    register_store_module, rewrite_parent_imports, splice_auth_routes, Edit,
};
use crate::paths::{AssetLayout, HostLayout};
use anyhow::{Context, Result};
use console::style;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug)]
pub enum InstallOutcome {
    Installed,
    /// Eligibility check failed; nothing was written.
    Ineligible(Eligibility),
}

pub struct Installer {
    host: HostLayout,
    assets: AssetLayout,
}

impl Installer {
    pub fn new(project_root: PathBuf, asset_root: PathBuf) -> Self {
        Self {
            host: HostLayout::new(project_root),
            assets: AssetLayout::new(asset_root),
        }
    }

    /// Run the full installation: eligibility check, then the fixed copy
    /// and patch sequence. Steps after a failing one are not attempted and
    /// nothing already written is rolled back.
    pub fn run(&self) -> Result<InstallOutcome> {
        step("Installing Vue3Plate authentication scaffolding...");

        let eligibility = manifest::probe(self.host.root())
            .with_context(|| format!("Could not probe {}", self.host.root().display()))?;
        if !eligibility.is_eligible() {
            println!(
                "{} Not a Vue3Plate project: {}",
                style("✗").red().bold(),
                eligibility
            );
            return Ok(InstallOutcome::Ineligible(eligibility));
        }

        self.copy_components()?;
        self.copy_views()?;
        self.copy_utils()?;
        self.install_store_module()?;
        self.copy_composables()?;
        self.install_routes()?;
        self.patch_entry_point()?;
        self.patch_store_index()?;
        self.install_config()?;

        println!(
            "{} Authentication scaffolding installed",
            style("✓").green().bold()
        );
        Ok(InstallOutcome::Installed)
    }

    fn copy_components(&self) -> Result<()> {
        step("Copying authentication components...");
        copy_directory(
            &self.assets.components(),
            &self.host.components_dir(),
            &mut HashSet::new(),
        )
        .context("Could not copy components")
    }

    fn copy_views(&self) -> Result<()> {
        step("Copying authentication views...");
        copy_directory(
            &self.assets.views(),
            &self.host.views_dir(),
            &mut HashSet::new(),
        )
        .context("Could not copy views")
    }

    fn copy_utils(&self) -> Result<()> {
        step("Copying authentication utilities...");
        copy_directory(
            &self.assets.utils(),
            &self.host.utils_dir(),
            &mut HashSet::new(),
        )
        .context("Could not copy utilities")
    }

    /// The store module nests one level deeper in the host than in the
    /// asset tree, so its parent-relative imports are rewritten on the way.
    fn install_store_module(&self) -> Result<()> {
        step("Setting up authentication store...");
        copy_file_transformed(
            &self.assets.store_module(),
            &self.host.store_module(),
            rewrite_parent_imports,
        )
        .context("Could not install store module")?;
        Ok(())
    }

    fn copy_composables(&self) -> Result<()> {
        step("Copying authentication composables...");
        copy_directory(
            &self.assets.composables(),
            &self.host.composables_dir(),
            &mut HashSet::new(),
        )
        .context("Could not copy composables")
    }

    fn install_routes(&self) -> Result<()> {
        step("Updating router with auth routes...");
        let edits: &[Edit] = &[add_router_import, splice_auth_routes];
        patch_file(&self.host.router_index(), edits)
            .context("Could not patch the router index")?;
        copy_file(&self.assets.router_stub(), &self.host.router_module())
            .context("Could not install the route module")?;
        Ok(())
    }

    fn patch_entry_point(&self) -> Result<()> {
        step("Updating entry point with auth initialization...");
        let edits: &[Edit] = &[add_init_import, add_init_call];
        patch_file(&self.host.entry_point(), edits)
            .context("Could not patch the entry point")?;
        Ok(())
    }

    fn patch_store_index(&self) -> Result<()> {
        step("Registering auth store module...");
        let edits: &[Edit] = &[add_store_import, register_store_module];
        patch_file(&self.host.store_index(), edits)
            .context("Could not patch the store index")?;
        Ok(())
    }

    fn install_config(&self) -> Result<()> {
        step("Creating authentication configuration...");
        copy_file(&self.assets.config_stub(), &self.host.config_module())
            .context("Could not install the config module")?;
        Ok(())
    }
}

fn step(message: &str) {
    println!("{} {}", style("==>").cyan().bold(), message);
}
