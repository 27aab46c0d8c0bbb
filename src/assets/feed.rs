use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AssetMatcher;
use crate::Config;

pub type ListenerId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetModule {
    pub file: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

/// All modules loaded for one `workspace/project`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAssets {
    pub workspace: String,
    pub project: String,
    pub module_count: usize,
    pub modules: Vec<AssetModule>,
}

struct Bucket {
    workspace: String,
    project: String,
    modules: Vec<AssetModule>,
}

/// Asset loads grouped by `workspace/project`, in first-seen order.
///
/// Listeners are called after every change, in registration order. A
/// listener that panics is logged and dropped.
pub struct AssetFeed {
    matcher: AssetMatcher,
    buckets: Vec<Bucket>,
    index: HashMap<String, usize>,
    listeners: Vec<(ListenerId, Box<dyn Fn()>)>,
    last_listener: ListenerId,
}

impl AssetFeed {
    pub fn new(matcher: AssetMatcher) -> Self {
        Self {
            matcher,
            buckets: Vec::new(),
            index: HashMap::new(),
            listeners: Vec::new(),
            last_listener: 0,
        }
    }

    /// Record one finished request if it is a module asset. Returns whether
    /// it was recorded.
    pub fn observe_request(&mut self, url: &str, timestamp: DateTime<Utc>) -> bool {
        let Some(request) = self.matcher.matches(url) else {
            return false;
        };
        self.on_asset_loaded(&request.workspace, &request.project, &request.file, url, timestamp);
        true
    }

    pub fn on_asset_loaded(
        &mut self,
        workspace: &str,
        project: &str,
        file: &str,
        url: &str,
        timestamp: DateTime<Utc>,
    ) {
        let key = format!("{workspace}/{project}");
        let slot = *self.index.entry(key).or_insert_with(|| {
            self.buckets.push(Bucket {
                workspace: workspace.to_string(),
                project: project.to_string(),
                modules: Vec::new(),
            });
            self.buckets.len() - 1
        });
        self.buckets[slot].modules.push(AssetModule {
            file: file.to_string(),
            url: url.to_string(),
            timestamp,
        });
        tracing::trace!(workspace, project, file, "Asset loaded");
        self.notify();
    }

    pub fn grouped(&self) -> Vec<ProjectAssets> {
        self.buckets
            .iter()
            .map(|bucket| ProjectAssets {
                workspace: bucket.workspace.clone(),
                project: bucket.project.clone(),
                module_count: bucket.modules.len(),
                modules: bucket.modules.clone(),
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.index.clear();
        self.notify();
    }

    pub fn add_listener(&mut self, listener: impl Fn() + 'static) -> ListenerId {
        self.last_listener += 1;
        self.listeners.push((self.last_listener, Box::new(listener)));
        self.last_listener
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let mut panicked = Vec::new();
        for (id, listener) in &self.listeners {
            if catch_unwind(AssertUnwindSafe(|| listener())).is_err() {
                tracing::error!(listener_id = %id, "Asset listener panicked, removing");
                panicked.push(*id);
            }
        }
        self.listeners.retain(|(id, _)| !panicked.contains(id));
    }
}

impl From<&Config> for AssetFeed {
    fn from(config: &Config) -> Self {
        Self::new(AssetMatcher::new(config.asset_host.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn feed() -> AssetFeed {
        AssetFeed::new(AssetMatcher::new("cdn.example.com"))
    }

    #[test]
    fn test_groups_by_workspace_and_project() {
        let mut feed = feed();
        let now = Utc::now();
        feed.on_asset_loaded("acme", "web", "a.js", "https://x/a.js", now);
        feed.on_asset_loaded("acme", "admin", "b.js", "https://x/b.js", now);
        feed.on_asset_loaded("acme", "web", "c.css", "https://x/c.css", now);

        let grouped = feed.grouped();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].project, "web");
        assert_eq!(grouped[0].module_count, 2);
        assert_eq!(grouped[0].modules[1].file, "c.css");
        assert_eq!(grouped[1].project, "admin");
        assert_eq!(grouped[1].module_count, 1);
    }

    #[test]
    fn test_observe_request_filters_urls() {
        let mut feed = feed();
        let now = Utc::now();
        assert!(feed.observe_request("https://cdn.example.com/acme/web/latest/assets/main.js", now));
        assert!(!feed.observe_request("https://cdn.example.com/favicon.ico", now));

        let grouped = feed.grouped();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].workspace, "acme");
        assert_eq!(grouped[0].modules[0].file, "main.js");
    }

    #[test]
    fn test_clear_empties_and_notifies() {
        let mut feed = feed();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        feed.add_listener(move || counter.set(counter.get() + 1));

        feed.on_asset_loaded("acme", "web", "a.js", "https://x/a.js", Utc::now());
        feed.clear();

        assert!(feed.grouped().is_empty());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_panicking_listener_is_removed() {
        let mut feed = feed();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        feed.add_listener(|| panic!("listener failure"));
        let healthy = feed.add_listener(move || counter.set(counter.get() + 1));

        feed.clear();
        feed.clear();

        assert_eq!(calls.get(), 2);
        assert_eq!(feed.listeners.len(), 1);
        assert!(feed.remove_listener(healthy));
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let mut feed = feed();
        let order = Rc::new(RefCell::new(Vec::new()));
        let ids: Vec<_> = (0..8)
            .map(|n| {
                let order = order.clone();
                feed.add_listener(move || order.borrow_mut().push(n))
            })
            .collect();

        feed.clear();
        assert_eq!(*order.borrow(), (0..8).collect::<Vec<_>>());

        order.borrow_mut().clear();
        assert!(feed.remove_listener(ids[3]));
        assert!(!feed.remove_listener(ids[3]));
        feed.clear();
        assert_eq!(*order.borrow(), [0, 1, 2, 4, 5, 6, 7]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut feed = feed();
        feed.on_asset_loaded("acme", "web", "a.js", "https://x/a.js", Utc::now());
        let json = serde_json::to_value(feed.grouped()).unwrap();
        assert_eq!(json[0]["moduleCount"], 1);
    }
}
