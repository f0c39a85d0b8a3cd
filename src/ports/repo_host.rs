//! Repository-host port for remote repository operations.

use serde::{Deserialize, Serialize};

/// Identifies a repository on the remote host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoHandle {
    /// Account that owns the repository.
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// The repository's default branch (e.g. `"main"`).
    pub default_branch: String,
}

/// Result of probing a branch ref on the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchLookup {
    /// The branch exists; carries the commit SHA at its tip.
    Tip(String),
    /// The repository has commits but no branch with that name.
    Missing,
    /// The repository has no commits at all (no refs exist yet).
    EmptyRepo,
}

/// One entry of a tree to commit: a staged blob at a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Path of the file within the repository.
    pub path: String,
    /// SHA of the blob holding the file's bytes.
    pub sha: String,
}

/// Performs repository operations against a remote host.
///
/// The deployment orchestrator drives this port; the live adapter speaks
/// the GitHub REST API. All operations are synchronous and blocking.
pub trait RepoHost: Send + Sync {
    /// Returns the repository with the given name, creating it when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be fetched or created.
    fn get_or_create_repo(
        &self,
        name: &str,
        description: &str,
        private: bool,
    ) -> Result<RepoHandle, Box<dyn std::error::Error + Send + Sync>>;

    /// Probes the tip of a branch.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure; an absent branch or an
    /// empty repository is reported through [`BranchLookup`], not as an
    /// error.
    fn branch_tip(
        &self,
        repo: &RepoHandle,
        branch: &str,
    ) -> Result<BranchLookup, Box<dyn std::error::Error + Send + Sync>>;

    /// Creates a branch pointing at the given commit SHA.
    ///
    /// # Errors
    ///
    /// Returns an error if the ref cannot be created.
    fn create_branch(
        &self,
        repo: &RepoHandle,
        branch: &str,
        from_sha: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns the blob SHA of a file on a branch, or `None` when the
    /// file does not exist there.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure.
    fn file_sha(
        &self,
        repo: &RepoHandle,
        path: &str,
        branch: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;

    /// Creates a new text file on a branch.
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists or the write fails.
    fn create_file(
        &self,
        repo: &RepoHandle,
        path: &str,
        content: &str,
        message: &str,
        branch: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Updates an existing text file on a branch.
    ///
    /// `sha` must be the file's current blob SHA as returned by
    /// [`RepoHost::file_sha`].
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected or the write fails.
    fn update_file(
        &self,
        repo: &RepoHandle,
        path: &str,
        content: &str,
        sha: &str,
        message: &str,
        branch: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Uploads a base64-encoded blob and returns its SHA.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob cannot be created.
    fn create_blob(
        &self,
        repo: &RepoHandle,
        base64_content: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Creates a tree from the entries on top of a parent commit and a
    /// commit binding that tree; returns the new commit SHA.
    ///
    /// # Errors
    ///
    /// Returns an error if tree or commit creation fails.
    fn commit_tree(
        &self,
        repo: &RepoHandle,
        entries: &[TreeEntry],
        parent_sha: &str,
        message: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Moves a branch ref to the given commit SHA.
    ///
    /// # Errors
    ///
    /// Returns an error if the ref update is rejected.
    fn update_branch_ref(
        &self,
        repo: &RepoHandle,
        branch: &str,
        commit_sha: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
