//! Shared in-memory fakes for exercising ports in tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::diagnostics::Diagnostics;
use crate::ports::filesystem::{DirEntry, FileSystem};
use crate::ports::prompter::Prompter;
use crate::ports::repo_host::{BranchLookup, RepoHandle, RepoHost, TreeEntry};
use crate::ports::template_source::TemplateSource;
use crate::ports::text_gen::{GenerationRequest, TextGenerator};

/// In-memory filesystem for testing without touching disk.
pub struct MemFs {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    unreadable: Mutex<HashSet<PathBuf>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self { files: Mutex::new(HashMap::new()), unreadable: Mutex::new(HashSet::new()) }
    }

    /// Builds a tree rooted at `root` from `(relative path, contents)` pairs.
    pub fn with_files(root: &str, files: &[(&str, &str)]) -> Self {
        let fs = Self::new();
        {
            let mut map = fs.files.lock().unwrap();
            for (rel, contents) in files {
                map.insert(Path::new(root).join(rel), contents.as_bytes().to_vec());
            }
        }
        fs
    }

    pub fn insert_bytes(&self, path: &Path, bytes: Vec<u8>) {
        self.files.lock().unwrap().insert(path.to_path_buf(), bytes);
    }

    /// Marks a file so that reads of it fail.
    pub fn poison(&self, path: &Path) {
        self.unreadable.lock().unwrap().insert(path.to_path_buf());
    }
}

impl FileSystem for MemFs {
    fn read(&self, path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        if self.unreadable.lock().unwrap().contains(path) {
            return Err(format!("Permission denied: {}", path.display()).into());
        }
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let bytes = self.read(path)?;
        Ok(String::from_utf8(bytes).map_err(|e| format!("Not UTF-8: {e}"))?)
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.as_bytes().to_vec());
        Ok(())
    }

    fn canonicalize(
        &self,
        path: &Path,
    ) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
        if self.exists(path) {
            Ok(path.to_path_buf())
        } else {
            Err(format!("File not found: {}", path.display()).into())
        }
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.contains_key(path) || files.keys().any(|k| k.starts_with(path) && k != path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.keys().any(|k| k.starts_with(path) && k != path)
    }

    fn file_size(&self, path: &Path) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|bytes| bytes.len() as u64)
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<DirEntry>, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().unwrap();
        let mut entries: Vec<DirEntry> = Vec::new();
        for key in files.keys() {
            let Ok(rest) = key.strip_prefix(path) else { continue };
            let mut components = rest.components();
            let Some(first) = components.next() else { continue };
            let name = first.as_os_str().to_string_lossy().into_owned();
            let is_dir = components.next().is_some();
            match entries.iter_mut().find(|e| e.name == name) {
                Some(existing) => existing.is_dir = existing.is_dir || is_dir,
                None => entries.push(DirEntry { name, is_dir }),
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Diagnostics sink that records every message for assertions.
///
/// Clones share the same buffer, so a test can keep one handle and hand
/// another to a `ServiceContext`.
#[derive(Clone, Default)]
pub struct RecordingDiagnostics {
    messages: std::sync::Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(level, _)| level == "warn")
            .map(|(_, message)| message)
            .collect()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn info(&self, message: &str) {
        self.messages.lock().unwrap().push(("info".into(), message.into()));
    }

    fn warn(&self, message: &str) {
        self.messages.lock().unwrap().push(("warn".into(), message.into()));
    }

    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(("error".into(), message.into()));
    }
}

/// Text generator that always succeeds with a fixed response.
pub struct StubGenerator(pub &'static str);

impl TextGenerator for StubGenerator {
    fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.0.to_string())
    }
}

/// Text generator that always fails.
pub struct FailingGenerator;

impl TextGenerator for FailingGenerator {
    fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Err("provider unavailable".into())
    }
}

/// Template source that returns a fixed template.
pub struct StubTemplateSource(pub &'static str);

impl TemplateSource for StubTemplateSource {
    fn fetch(&self, _techs: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.0.to_string())
    }
}

/// Scriptable in-memory repository host that logs every operation.
///
/// Clones share state, so a test can keep one handle and box another
/// into a `ServiceContext`.
#[derive(Clone, Default)]
pub struct FakeHost {
    state: std::sync::Arc<Mutex<HostState>>,
}

#[derive(Default)]
struct HostState {
    empty_repo: bool,
    branches: HashMap<String, String>,
    files: HashMap<String, String>,
    fail_once: HashMap<String, usize>,
    ops: Vec<String>,
    commits: usize,
    blobs: usize,
}

impl FakeHost {
    /// A host whose repository already has a `main` branch at `c0`.
    pub fn new() -> Self {
        let host = Self::default();
        host.state.lock().unwrap().branches.insert("main".into(), "c0".into());
        host
    }

    /// A host whose repository has no commits yet.
    pub fn empty() -> Self {
        let host = Self::default();
        host.state.lock().unwrap().empty_repo = true;
        host
    }

    /// Makes the next `times` writes to `path` fail.
    pub fn fail_times(&self, path: &str, times: usize) {
        self.state.lock().unwrap().fail_once.insert(path.to_string(), times);
    }

    /// Pretends `path` already exists on the remote with the given SHA.
    pub fn insert_remote_file(&self, path: &str, sha: &str) {
        self.state.lock().unwrap().files.insert(path.to_string(), sha.to_string());
    }

    /// Every operation performed so far, in order.
    pub fn ops(&self) -> Vec<String> {
        self.state.lock().unwrap().ops.clone()
    }

    fn should_fail(state: &mut HostState, path: &str) -> bool {
        if let Some(remaining) = state.fail_once.get_mut(path) {
            if *remaining > 0 {
                *remaining -= 1;
                return true;
            }
        }
        false
    }
}

impl RepoHost for FakeHost {
    fn get_or_create_repo(
        &self,
        name: &str,
        _description: &str,
        private: bool,
    ) -> Result<RepoHandle, Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("repo:{name}:{private}"));
        Ok(RepoHandle { owner: "octo".into(), name: name.to_string(), default_branch: "main".into() })
    }

    fn branch_tip(
        &self,
        _repo: &RepoHandle,
        branch: &str,
    ) -> Result<BranchLookup, Box<dyn std::error::Error + Send + Sync>> {
        let state = self.state.lock().unwrap();
        if state.empty_repo {
            return Ok(BranchLookup::EmptyRepo);
        }
        Ok(state
            .branches
            .get(branch)
            .map_or(BranchLookup::Missing, |sha| BranchLookup::Tip(sha.clone())))
    }

    fn create_branch(
        &self,
        _repo: &RepoHandle,
        branch: &str,
        from_sha: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("create-branch:{branch}:{from_sha}"));
        state.branches.insert(branch.to_string(), from_sha.to_string());
        Ok(())
    }

    fn file_sha(
        &self,
        _repo: &RepoHandle,
        path: &str,
        _branch: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.state.lock().unwrap().files.get(path).cloned())
    }

    fn create_file(
        &self,
        _repo: &RepoHandle,
        path: &str,
        _content: &str,
        message: &str,
        branch: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.state.lock().unwrap();
        if Self::should_fail(&mut state, path) {
            return Err(format!("simulated failure for {path}").into());
        }
        state.ops.push(format!("create:{path}:{message}"));
        state.files.insert(path.to_string(), format!("sha-{path}"));
        if state.empty_repo {
            state.empty_repo = false;
            state.branches.insert(branch.to_string(), "c1".into());
        }
        Ok(())
    }

    fn update_file(
        &self,
        _repo: &RepoHandle,
        path: &str,
        _content: &str,
        _sha: &str,
        message: &str,
        _branch: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.state.lock().unwrap();
        if Self::should_fail(&mut state, path) {
            return Err(format!("simulated failure for {path}").into());
        }
        state.ops.push(format!("update:{path}:{message}"));
        Ok(())
    }

    fn create_blob(
        &self,
        _repo: &RepoHandle,
        _base64_content: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.state.lock().unwrap();
        state.blobs += 1;
        let sha = format!("blob-{}", state.blobs);
        state.ops.push(format!("blob:{sha}"));
        Ok(sha)
    }

    fn commit_tree(
        &self,
        _repo: &RepoHandle,
        entries: &[TreeEntry],
        parent_sha: &str,
        _message: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.state.lock().unwrap();
        state.commits += 1;
        let sha = format!("commit-{}", state.commits);
        state.ops.push(format!("commit-tree:{}:{parent_sha}", entries.len()));
        Ok(sha)
    }

    fn update_branch_ref(
        &self,
        _repo: &RepoHandle,
        branch: &str,
        commit_sha: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("update-ref:{branch}:{commit_sha}"));
        state.branches.insert(branch.to_string(), commit_sha.to_string());
        Ok(())
    }
}

/// Prompter that replays a scripted sequence of answers.
///
/// `input` and `select` both consume from the same script; `select`
/// expects the scripted answer to match an option literally.
pub struct ScriptedPrompter {
    answers: Mutex<std::vec::IntoIter<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        let answers: Vec<String> = answers.iter().map(|s| (*s).to_string()).collect();
        Self { answers: Mutex::new(answers.into_iter()) }
    }

    fn next_answer(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.answers
            .lock()
            .unwrap()
            .next()
            .ok_or_else(|| "scripted prompter ran out of answers".into())
    }
}

impl Prompter for ScriptedPrompter {
    fn input(
        &self,
        _prompt: &str,
        default: Option<&str>,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let answer = self.next_answer()?;
        if answer.is_empty() {
            if let Some(d) = default {
                return Ok(d.to_string());
            }
        }
        Ok(answer)
    }

    fn confirm(
        &self,
        _prompt: &str,
        default: bool,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let answer = self.next_answer()?;
        match answer.as_str() {
            "" => Ok(default),
            "y" | "yes" => Ok(true),
            _ => Ok(false),
        }
    }

    fn select(
        &self,
        _prompt: &str,
        options: &[&str],
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
        let answer = self.next_answer()?;
        if answer.is_empty() {
            return Ok(0);
        }
        options
            .iter()
            .position(|o| o.eq_ignore_ascii_case(&answer))
            .ok_or_else(|| format!("scripted answer '{answer}' not in options").into())
    }
}
