//! App-shell cache manifest

/// Worker glue script loaded by `sw.js`
pub const WORKER_SCRIPT: &str = "/pkg-worker/babymode_worker.js";

/// Worker module `sw.js` instantiates on every worker start. Kept in the
/// shell so the worker can boot without a network.
pub const WORKER_WASM: &str = "/pkg-worker/babymode_worker_bg.wasm";

/// Name and contents of the versioned app-shell cache
///
/// Bumping `name` is how a new release invalidates the previous shell: on
/// activation every cache with a different name is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheManifest {
    /// Cache name, versioned by a literal suffix
    pub name: &'static str,
    /// URLs fetched and stored on install
    pub shell: &'static [&'static str],
    /// Cached document served to navigations when the network is down
    pub fallback: &'static str,
}

impl CacheManifest {
    pub const DEFAULT: CacheManifest = CacheManifest {
        name: "baby-mode-v1",
        shell: &[
            "/",
            "/index.html",
            "/css/styles.css",
            "/pkg/babymode_web.js",
            "/pkg/babymode_web_bg.wasm",
            WORKER_SCRIPT,
            WORKER_WASM,
            "/manifest.json",
        ],
        fallback: "/index.html",
    };

    /// Names in `existing` that belong to another version
    pub fn stale<'a>(&self, existing: &'a [String]) -> Vec<&'a str> {
        existing
            .iter()
            .map(String::as_str)
            .filter(|name| *name != self.name)
            .collect()
    }

    /// Check whether `url` is part of the app shell
    pub fn contains(&self, url: &str) -> bool {
        self.shell.contains(&url)
    }
}

impl Default for CacheManifest {
    fn default() -> Self {
        Self::DEFAULT
    }
}
