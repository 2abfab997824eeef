use serde::Deserialize;

// GitHub search API response structures
#[derive(Debug, Deserialize)]
pub struct GitHubSearchResponse {
    pub total_count: u64,
    pub items: Vec<GitHubRepo>,
}

#[derive(Debug, Deserialize)]
pub struct GitHubRepo {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stargazers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    pub owner: GitHubOwner,
}

#[derive(Debug, Deserialize)]
pub struct GitHubOwner {
    pub login: String,
    pub avatar_url: String,
}
