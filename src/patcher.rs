//! Anchor-based text edits for wiring installed modules into existing host
//! source files.
//!
//! Every transform is a pure function `&str -> Option<String>` where `None`
//! means "no change". Each one is guarded on its own marker so re-running
//! the installer never duplicates an insertion, and an absent anchor is a
//! silent skip, never an error: the installer degrades to "partially wired"
//! rather than aborting.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

pub type Edit = fn(&str) -> Option<String>;

const ROUTER_IMPORT: &str = "import authRoutes from './auth.js';\n";
const ROUTES_SPREAD_MARKER: &str = "...authRoutes";
const STORE_IMPORT: &str = "import auth from './modules/auth.js';\n";
const INIT_IMPORT: &str = "import { initAuth } from './composables/useAuth.js';\n";
const INIT_SNIPPET: &str = "// Initialize authentication\nawait initAuth();\n\n";

/// Add the auth routes import to the router index, anchored after the
/// first vue-router import. Falls back to prepending when the file has no
/// import list.
pub fn add_router_import(text: &str) -> Option<String> {
    if text.contains("import authRoutes from './auth.js'") {
        return None;
    }
    Some(insert_after_import_anchor(
        text,
        r"import .*from .*vue-router.*;?\n",
        ROUTER_IMPORT,
    ))
}

/// Splice `...authRoutes` just before the closing bracket of the routes
/// array, inserting a separating comma only when the existing body doesn't
/// already end in one.
pub fn splice_auth_routes(text: &str) -> Option<String> {
    if text.contains(ROUTES_SPREAD_MARKER) {
        return None;
    }
    // The literal usually spans lines, so the match must cross newlines.
    let re = Regex::new(r"(?s)routes:\s*\[(.*?)\]").unwrap();
    let captures = re.captures(text)?;
    let whole = captures.get(0).unwrap();
    let body = captures.get(1).unwrap().as_str();

    let trimmed = body.trim_end();
    let needs_comma = !trimmed.is_empty() && !trimmed.ends_with(',');

    let mut out = String::with_capacity(text.len() + 32);
    out.push_str(&text[..whole.start()]);
    out.push_str("routes: [");
    out.push_str(body);
    if needs_comma {
        out.push(',');
    }
    out.push_str("\n    ...authRoutes\n  ]");
    out.push_str(&text[whole.end()..]);
    Some(out)
}

/// Register the store module import at the top of the store index.
pub fn add_store_import(text: &str) -> Option<String> {
    if text.contains("import auth from './modules/auth.js'") {
        return None;
    }
    Some(format!("{STORE_IMPORT}{text}"))
}

/// Add `auth` to the store's `modules` object.
pub fn register_store_module(text: &str) -> Option<String> {
    if text.contains("auth,") || !text.contains("modules:") {
        return None;
    }
    let re = Regex::new(r"modules:\s*\{").unwrap();
    let m = re.find(text)?;
    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(&text[..m.start()]);
    out.push_str("modules: {\n    auth,");
    out.push_str(&text[m.end()..]);
    Some(out)
}

/// Add the `initAuth` composable import to the entry-point.
pub fn add_init_import(text: &str) -> Option<String> {
    if text.contains("import { initAuth }") {
        return None;
    }
    Some(format!("{INIT_IMPORT}{text}"))
}

/// Insert the auth initialization call immediately before the application
/// mount, gated on the call not being present anywhere in the file.
pub fn add_init_call(text: &str) -> Option<String> {
    if text.contains("initAuth()") {
        return None;
    }
    let re = Regex::new(r#"app\.mount\(['"]#app['"]\)"#).unwrap();
    let m = re.find(text)?;
    let mut out = String::with_capacity(text.len() + INIT_SNIPPET.len());
    out.push_str(&text[..m.start()]);
    out.push_str(INIT_SNIPPET);
    out.push_str(&text[m.start()..]);
    Some(out)
}

/// The store module moves one directory deeper when installed under
/// `store/modules/`, so its parent-relative imports gain one more hop.
pub fn rewrite_parent_imports(text: &str) -> String {
    let re = Regex::new(r#"(from\s+['"])\.\./"#).unwrap();
    re.replace_all(text, "${1}../../").into_owned()
}

fn insert_after_import_anchor(text: &str, anchor: &str, import: &str) -> String {
    let re = Regex::new(anchor).unwrap();
    match re.find(text) {
        Some(m) => {
            let mut out = String::with_capacity(text.len() + import.len());
            out.push_str(&text[..m.end()]);
            out.push_str(import);
            out.push_str(&text[m.end()..]);
            out
        }
        None => format!("{import}{text}"),
    }
}

/// Apply `edits` in order to the file at `path`, writing back only when
/// the final text differs from the original. Missing file is a no-op.
pub fn patch_file(path: &Path, edits: &[Edit]) -> Result<bool> {
    if !path.exists() {
        tracing::debug!("{} not found, nothing to patch", path.display());
        return Ok(false);
    }

    let original = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;

    let mut text = original.clone();
    for edit in edits {
        if let Some(updated) = edit(&text) {
            text = updated;
        }
    }

    if text != original {
        fs::write(path, &text)
            .with_context(|| format!("Could not write {}", path.display()))?;
        tracing::info!("Updated {}", path.display());
        Ok(true)
    } else {
        tracing::info!("{} already up to date", path.display());
        Ok(false)
    }
}
