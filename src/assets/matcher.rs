use url::Url;

/// An asset request recognized as belonging to a `workspace/project`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub workspace: String,
    pub project: String,
    pub file: String,
}

/// Recognizes `https://<host>/{workspace}/{project}/latest/assets/{file}`.
///
/// `file` may span several path segments. Query and fragment are not part of
/// it. Matching runs on the parsed URL, so `.` and `..` segments are resolved
/// first.
#[derive(Debug, Clone)]
pub struct AssetMatcher {
    host: String,
}

impl AssetMatcher {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn matches(&self, url: &str) -> Option<AssetRequest> {
        let url = Url::parse(url).ok()?;
        if url.scheme() != "https" || url.host_str() != Some(self.host.as_str()) || url.port().is_some() {
            return None;
        }

        let segments: Vec<&str> = url.path_segments()?.collect();
        let [workspace, project, "latest", "assets", file @ ..] = segments.as_slice() else {
            return None;
        };
        if workspace.is_empty() || project.is_empty() || file.is_empty() {
            return None;
        }

        let file = file.join("/");
        if file.is_empty() {
            return None;
        }
        Some(AssetRequest {
            workspace: workspace.to_string(),
            project: project.to_string(),
            file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "assets.example.net";

    #[test]
    fn test_matches_asset_url() {
        let matcher = AssetMatcher::new(HOST);
        let request = matcher
            .matches("https://assets.example.net/acme/billing/latest/assets/index-3f2a.js")
            .expect("should match");
        assert_eq!(request.workspace, "acme");
        assert_eq!(request.project, "billing");
        assert_eq!(request.file, "index-3f2a.js");
    }

    #[test]
    fn test_file_may_be_nested_and_drops_query() {
        let matcher = AssetMatcher::new(HOST);
        let request = matcher
            .matches("https://assets.example.net/acme/billing/latest/assets/chunks/a.js?v=2")
            .expect("should match");
        assert_eq!(request.file, "chunks/a.js");
    }

    #[test]
    fn test_dot_segments_are_resolved_before_matching() {
        let matcher = AssetMatcher::new(HOST);
        let request = matcher
            .matches("https://assets.example.net/acme/./billing/latest/assets/old/../a.js")
            .expect("should match");
        assert_eq!(request.project, "billing");
        assert_eq!(request.file, "a.js");

        assert_eq!(
            matcher.matches("https://assets.example.net/acme/billing/latest/assets/../a.js"),
            None
        );
    }

    #[test]
    fn test_rejects_other_urls() {
        let matcher = AssetMatcher::new(HOST);
        for url in [
            "http://assets.example.net/acme/billing/latest/assets/a.js",
            "https://other.example.net/acme/billing/latest/assets/a.js",
            "https://assets.example.net/acme/billing/v2/assets/a.js",
            "https://assets.example.net/acme/latest/assets/a.js",
            "https://assets.example.net/acme/billing/latest/assets/",
            "not a url",
        ] {
            assert_eq!(matcher.matches(url), None, "{url}");
        }
    }
}
