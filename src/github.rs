//! Client for the GitHub REST API, covering the two calls the tool makes:
//! repository search and topic replacement.

use std::time::Duration;

use serde::Deserialize;

/// Base URL of the GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Number of search results requested; only the first page is ever used.
pub const SEARCH_PAGE_SIZE: u32 = 100;
/// User agent sent with every request; the API rejects requests without one.
pub const USER_AGENT: &str = concat!("topictool/", env!("CARGO_PKG_VERSION"));
/// Per-request timeout.
pub const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The service answered with an error status.
    #[error("github: HTTP {status}: {reason}")]
    Response { status: u16, reason: String },
    /// The request never completed.
    #[error("github: {0}")]
    Transport(Box<ureq::Error>),
    /// The response body could not be decoded.
    #[error("github: invalid response: {0}")]
    Decode(#[from] std::io::Error),
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let fallback = response.status_text().to_owned();
                let reason = response
                    .into_json::<ApiError>()
                    .map(|e| e.message)
                    .unwrap_or(fallback);

                Self::Response { status, reason }
            }
            err => Self::Transport(Box::new(err)),
        }
    }
}

/// Error payload returned by the API.
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// The owner of a repository.
#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// A repository descriptor, as returned by the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
    /// Current topics, compared as opaque, case-sensitive strings.
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Repository {
    /// The `owner/name` addressing key.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    total_count: u64,
    #[serde(default)]
    items: Vec<Repository>,
}

#[derive(Debug, Deserialize)]
struct Topics {
    names: Vec<String>,
}

/// An authenticated handle to the GitHub API, constructed once at startup
/// and shared by all operations.
#[derive(Clone)]
pub struct Client {
    agent: ureq::Agent,
    url: String,
    token: String,
}

impl Client {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_url(DEFAULT_API_URL, token)
    }

    /// Create a client against a custom API base, eg. a GitHub Enterprise
    /// instance.
    pub fn with_url(url: impl Into<String>, token: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(TIMEOUT).build();

        Self {
            agent,
            url: url.into(),
            token: token.into(),
        }
    }

    /// Search repositories via the service's query syntax. Only the first
    /// page of results is returned.
    ///
    /// GitHub API docs: <https://docs.github.com/en/rest/search#search-repositories>
    pub fn search_repositories(&self, query: &str) -> Result<Vec<Repository>, Error> {
        let results: SearchResults = self
            .request("GET", "/search/repositories")
            .query("q", query)
            .query("page", "1")
            .query("per_page", &SEARCH_PAGE_SIZE.to_string())
            .call()?
            .into_json()?;

        log::debug!(
            target: "github",
            "search `{query}` matched {} repositories, {} returned",
            results.total_count,
            results.items.len()
        );

        Ok(results.items)
    }

    /// Replace all topics of `owner/name` with the given list, returning
    /// the topics now set on the repository.
    pub fn replace_all_topics(
        &self,
        owner: &str,
        name: &str,
        topics: &[String],
    ) -> Result<Vec<String>, Error> {
        log::debug!(target: "github", "setting topics of {owner}/{name} to [{}]", topics.join(","));

        let topics: Topics = self
            .request("PUT", &format!("/repos/{owner}/{name}/topics"))
            .send_json(serde_json::json!({ "names": topics }))?
            .into_json()?;

        Ok(topics.names)
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        self.agent
            .request(method, &format!("{}{}", self.url, path))
            .set("Accept", "application/vnd.github+json")
            .set("Authorization", &format!("token {}", self.token))
            .set("User-Agent", USER_AGENT)
    }
}
