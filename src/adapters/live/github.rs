//! Live adapter for the `RepoHost` port using the GitHub REST API.

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::ports::repo_host::{BranchLookup, RepoHandle, RepoHost, TreeEntry};

const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("gitprep/", env!("CARGO_PKG_VERSION"));

/// Live repository host backed by the GitHub REST API.
pub struct GitHubHost {
    client: Client,
    token: String,
    username: String,
}

impl GitHubHost {
    /// Creates a new GitHub host adapter for the given account.
    #[must_use]
    pub fn new(username: String, token: String) -> Self {
        Self { client: Client::new(), token, username }
    }

    fn get(&self, url: &str) -> Result<Response, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .map_err(|e| format!("GitHub request failed: {e}"))?)
    }

    fn send_json<T: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: &T,
    ) -> Result<Response, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self
            .client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .json(body)
            .send()
            .map_err(|e| format!("GitHub request failed: {e}"))?)
    }

    fn repo_url(&self, repo: &RepoHandle, suffix: &str) -> String {
        format!("{GITHUB_API_URL}/repos/{}/{}{suffix}", repo.owner, repo.name)
    }
}

/// Extracts the API error message from a failed response body.
fn api_error(
    context: &str,
    response: Response,
) -> Box<dyn std::error::Error + Send + Sync> {
    let status = response.status().as_u16();
    let msg = response
        .json::<ApiError>()
        .map(|e| e.message)
        .unwrap_or_else(|_| "unknown error".to_string());
    format!("{context} ({status}): {msg}").into()
}

/// Error body returned by the GitHub API.
#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// Repository metadata subset used by this adapter.
#[derive(Deserialize)]
struct RepoResponse {
    name: String,
    default_branch: String,
    owner: OwnerResponse,
}

/// Owner subset of a repository response.
#[derive(Deserialize)]
struct OwnerResponse {
    login: String,
}

/// Body for creating a repository.
#[derive(Serialize)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
}

/// Ref lookup response.
#[derive(Deserialize)]
struct RefResponse {
    object: RefObject,
}

/// The object a ref points at.
#[derive(Deserialize)]
struct RefObject {
    sha: String,
}

/// Body for creating a ref.
#[derive(Serialize)]
struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    reference: String,
    sha: &'a str,
}

/// Contents lookup response subset.
#[derive(Deserialize)]
struct ContentsResponse {
    sha: String,
}

/// Body for creating or updating a contents-API file.
#[derive(Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

/// Body for creating a blob.
#[derive(Serialize)]
struct CreateBlobRequest<'a> {
    content: &'a str,
    encoding: &'a str,
}

/// Response carrying an object SHA.
#[derive(Deserialize)]
struct ShaResponse {
    sha: String,
}

/// Commit lookup response subset.
#[derive(Deserialize)]
struct CommitResponse {
    tree: ShaResponse,
}

/// One entry in a tree-creation request.
#[derive(Serialize)]
struct TreeEntryRequest<'a> {
    path: &'a str,
    mode: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    sha: &'a str,
}

/// Body for creating a tree.
#[derive(Serialize)]
struct CreateTreeRequest<'a> {
    base_tree: &'a str,
    tree: Vec<TreeEntryRequest<'a>>,
}

/// Body for creating a commit.
#[derive(Serialize)]
struct CreateCommitRequest<'a> {
    message: &'a str,
    tree: &'a str,
    parents: Vec<&'a str>,
}

/// Body for moving a ref.
#[derive(Serialize)]
struct UpdateRefRequest<'a> {
    sha: &'a str,
}

impl RepoHost for GitHubHost {
    fn get_or_create_repo(
        &self,
        name: &str,
        description: &str,
        private: bool,
    ) -> Result<RepoHandle, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!("{GITHUB_API_URL}/repos/{}/{name}", self.username);
        let response = self.get(&url)?;
        let repo: RepoResponse = if response.status().is_success() {
            response.json().map_err(|e| format!("Failed to parse repository response: {e}"))?
        } else if response.status() == StatusCode::NOT_FOUND {
            let body = CreateRepoRequest { name, description, private };
            let create = self.send_json(
                reqwest::Method::POST,
                &format!("{GITHUB_API_URL}/user/repos"),
                &body,
            )?;
            if !create.status().is_success() {
                return Err(api_error("Failed to create repository", create));
            }
            create.json().map_err(|e| format!("Failed to parse repository response: {e}"))?
        } else {
            return Err(api_error("Failed to look up repository", response));
        };
        Ok(RepoHandle {
            owner: repo.owner.login,
            name: repo.name,
            default_branch: repo.default_branch,
        })
    }

    fn branch_tip(
        &self,
        repo: &RepoHandle,
        branch: &str,
    ) -> Result<BranchLookup, Box<dyn std::error::Error + Send + Sync>> {
        let url = self.repo_url(repo, &format!("/git/ref/heads/{branch}"));
        let response = self.get(&url)?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(BranchLookup::Missing),
            // GitHub answers 409 for any ref lookup on a repository
            // without commits.
            StatusCode::CONFLICT => Ok(BranchLookup::EmptyRepo),
            status if status.is_success() => {
                let reference: RefResponse =
                    response.json().map_err(|e| format!("Failed to parse ref response: {e}"))?;
                Ok(BranchLookup::Tip(reference.object.sha))
            }
            _ => Err(api_error("Failed to look up branch", response)),
        }
    }

    fn create_branch(
        &self,
        repo: &RepoHandle,
        branch: &str,
        from_sha: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let url = self.repo_url(repo, "/git/refs");
        let body =
            CreateRefRequest { reference: format!("refs/heads/{branch}"), sha: from_sha };
        let response = self.send_json(reqwest::Method::POST, &url, &body)?;
        if !response.status().is_success() {
            return Err(api_error("Failed to create branch", response));
        }
        Ok(())
    }

    fn file_sha(
        &self,
        repo: &RepoHandle,
        path: &str,
        branch: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        let url = self.repo_url(repo, &format!("/contents/{path}?ref={branch}"));
        let response = self.get(&url)?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let contents: ContentsResponse = response
                    .json()
                    .map_err(|e| format!("Failed to parse contents response: {e}"))?;
                Ok(Some(contents.sha))
            }
            _ => Err(api_error("Failed to probe file", response)),
        }
    }

    fn create_file(
        &self,
        repo: &RepoHandle,
        path: &str,
        content: &str,
        message: &str,
        branch: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

        let url = self.repo_url(repo, &format!("/contents/{path}"));
        let body = PutContentsRequest {
            message,
            content: BASE64.encode(content.as_bytes()),
            branch,
            sha: None,
        };
        let response = self.send_json(reqwest::Method::PUT, &url, &body)?;
        if !response.status().is_success() {
            return Err(api_error("Failed to create file", response));
        }
        Ok(())
    }

    fn update_file(
        &self,
        repo: &RepoHandle,
        path: &str,
        content: &str,
        sha: &str,
        message: &str,
        branch: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

        let url = self.repo_url(repo, &format!("/contents/{path}"));
        let body = PutContentsRequest {
            message,
            content: BASE64.encode(content.as_bytes()),
            branch,
            sha: Some(sha),
        };
        let response = self.send_json(reqwest::Method::PUT, &url, &body)?;
        if !response.status().is_success() {
            return Err(api_error("Failed to update file", response));
        }
        Ok(())
    }

    fn create_blob(
        &self,
        repo: &RepoHandle,
        base64_content: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let url = self.repo_url(repo, "/git/blobs");
        let body = CreateBlobRequest { content: base64_content, encoding: "base64" };
        let response = self.send_json(reqwest::Method::POST, &url, &body)?;
        if !response.status().is_success() {
            return Err(api_error("Failed to create blob", response));
        }
        let blob: ShaResponse =
            response.json().map_err(|e| format!("Failed to parse blob response: {e}"))?;
        Ok(blob.sha)
    }

    fn commit_tree(
        &self,
        repo: &RepoHandle,
        entries: &[TreeEntry],
        parent_sha: &str,
        message: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        // Resolve the parent commit's tree to use as the base.
        let commit_url = self.repo_url(repo, &format!("/git/commits/{parent_sha}"));
        let response = self.get(&commit_url)?;
        if !response.status().is_success() {
            return Err(api_error("Failed to look up parent commit", response));
        }
        let parent: CommitResponse =
            response.json().map_err(|e| format!("Failed to parse commit response: {e}"))?;

        let tree_body = CreateTreeRequest {
            base_tree: &parent.tree.sha,
            tree: entries
                .iter()
                .map(|entry| TreeEntryRequest {
                    path: &entry.path,
                    mode: "100644",
                    kind: "blob",
                    sha: &entry.sha,
                })
                .collect(),
        };
        let tree_response =
            self.send_json(reqwest::Method::POST, &self.repo_url(repo, "/git/trees"), &tree_body)?;
        if !tree_response.status().is_success() {
            return Err(api_error("Failed to create tree", tree_response));
        }
        let tree: ShaResponse =
            tree_response.json().map_err(|e| format!("Failed to parse tree response: {e}"))?;

        let commit_body =
            CreateCommitRequest { message, tree: &tree.sha, parents: vec![parent_sha] };
        let commit_response = self.send_json(
            reqwest::Method::POST,
            &self.repo_url(repo, "/git/commits"),
            &commit_body,
        )?;
        if !commit_response.status().is_success() {
            return Err(api_error("Failed to create commit", commit_response));
        }
        let commit: ShaResponse =
            commit_response.json().map_err(|e| format!("Failed to parse commit response: {e}"))?;
        Ok(commit.sha)
    }

    fn update_branch_ref(
        &self,
        repo: &RepoHandle,
        branch: &str,
        commit_sha: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let url = self.repo_url(repo, &format!("/git/refs/heads/{branch}"));
        let body = UpdateRefRequest { sha: commit_sha };
        let response = self.send_json(reqwest::Method::PATCH, &url, &body)?;
        if !response.status().is_success() {
            return Err(api_error("Failed to update branch ref", response));
        }
        Ok(())
    }
}
