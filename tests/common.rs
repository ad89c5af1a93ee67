use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const ROUTER_INDEX: &str = "\
import { createRouter, createWebHistory } from 'vue-router'
import HomeView from '../views/HomeView.vue'

const router = createRouter({
  history: createWebHistory(),
  routes: [
    {
      path: '/',
      name: 'home',
      component: HomeView
    }
  ]
})

export default router
";

pub const MAIN_JS: &str = "\
import { createApp } from 'vue'
import App from './App.vue'
import router from './router'
import store from './store'

const app = createApp(App)
app.use(router)
app.use(store)
app.mount('#app')
";

pub const STORE_INDEX: &str = "\
import { createStore } from 'vuex'

export default createStore({
  modules: {
  }
})
";

pub struct TestContext {
    pub _temp_dir: TempDir,
    pub project_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub bin_path: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// A sandbox holding an eligible host project and a scaffolding asset
    /// tree, both freshly generated.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let project_dir = temp_dir.path().join("project");
        let assets_dir = temp_dir.path().join("assets");
        let bin_path = PathBuf::from(env!("CARGO_BIN_EXE_plater"));

        let ctx = Self {
            _temp_dir: temp_dir,
            project_dir,
            assets_dir,
            bin_path,
        };
        ctx.seed_project();
        ctx.seed_assets();
        ctx
    }

    pub fn cmd(&self) -> Command {
        Command::new(&self.bin_path)
    }

    pub fn install(&self) -> CommandOutput {
        self.cmd()
            .arg("install")
            .arg(&self.project_dir)
            .arg("--assets")
            .arg(&self.assets_dir)
            .output()
            .expect("Failed to run plater")
            .into()
    }

    pub fn write_project_file(&self, rel: &str, content: &str) {
        write_file(&self.project_dir.join(rel), content);
    }

    pub fn write_asset_file(&self, rel: &str, content: &str) {
        write_file(&self.assets_dir.join(rel), content);
    }

    pub fn read_project_file(&self, rel: &str) -> String {
        fs::read_to_string(self.project_dir.join(rel))
            .unwrap_or_else(|e| panic!("Could not read {}: {}", rel, e))
    }

    pub fn project_has(&self, rel: &str) -> bool {
        self.project_dir.join(rel).exists()
    }

    /// Relative path -> file bytes for the whole project tree, for
    /// byte-identical comparisons across installer runs.
    pub fn snapshot_project(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        let mut snapshot = BTreeMap::new();
        collect_files(&self.project_dir, &self.project_dir, &mut snapshot);
        snapshot
    }

    fn seed_project(&self) {
        self.write_project_file(
            "package.json",
            r#"{"name": "demo-vue3plate-app", "dependencies": {"vue": "^3.4.0"}}"#,
        );
        self.write_project_file("src/router/index.js", ROUTER_INDEX);
        self.write_project_file("src/main.js", MAIN_JS);
        self.write_project_file("src/store/index.js", STORE_INDEX);
    }

    fn seed_assets(&self) {
        self.write_asset_file(
            "src/components/LoginForm.vue",
            "<template>login form</template>\n",
        );
        self.write_asset_file(
            "src/views/LoginPage.vue",
            "<template>login page</template>\n",
        );
        self.write_asset_file("src/utils/api.js", "export const authApi = {}\n");
        self.write_asset_file(
            "src/store/auth.js",
            "import { authApi } from '../utils/api.js'\n\nexport default { namespaced: true }\n",
        );
        self.write_asset_file(
            "src/composables/useAuth.js",
            "export async function initAuth() {}\n",
        );
        self.write_asset_file("stubs/router/auth.js", "export default []\n");
        self.write_asset_file(
            "stubs/config/auth.js",
            "export default { tokenKey: 'vue3plate_auth_token' }\n",
        );
    }
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    fs::write(path, content).expect("Failed to write file");
}

fn collect_files(root: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
    for entry in fs::read_dir(dir).expect("Failed to read dir") {
        let entry = entry.expect("Failed to read entry");
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            let rel = path.strip_prefix(root).expect("Path outside root").to_path_buf();
            out.insert(rel, fs::read(&path).expect("Failed to read file"));
        }
    }
}

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

#[allow(dead_code)]
impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        if !self.status.success() {
            panic!(
                "Command failed with status {:?}\nstdout: {}\nstderr: {}",
                self.status.code(),
                self.stdout,
                self.stderr
            );
        }
        self
    }

    pub fn assert_failure(&self) -> &Self {
        assert!(
            !self.status.success(),
            "Command unexpectedly succeeded\nstdout: {}\nstderr: {}",
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Stdout did not contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }
}
