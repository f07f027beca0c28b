//! Project adapters: a directory on disk and an in-memory file map.

use crate::ids::RepoRef;
use crate::ports::{Project, ProjectFile};
use crate::{Error, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Normalize a project-relative path to `a/b/c` form. Absolute paths and
/// paths escaping the project root are rejected.
pub fn normalize_path(path: &str) -> Result<String> {
    let mut parts = Vec::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => parts.push(
                part.to_str()
                    .ok_or_else(|| Error::InvalidPath(path.to_string()))?
                    .to_string(),
            ),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidPath(path.to_string()));
            }
        }
    }
    if parts.is_empty() {
        return Err(Error::InvalidPath(path.to_string()));
    }
    Ok(parts.join("/"))
}

/// A project checked out in a local directory.
#[derive(Debug, Clone)]
pub struct LocalProject {
    id: RepoRef,
    base_dir: PathBuf,
}

impl LocalProject {
    pub fn new(id: RepoRef, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            id,
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, path: &str) -> Result<(String, PathBuf)> {
        let relative = normalize_path(path)?;
        let full = self.base_dir.join(&relative);
        Ok((relative, full))
    }
}

#[async_trait]
impl Project for LocalProject {
    fn id(&self) -> &RepoRef {
        &self.id
    }

    async fn get_file(&self, path: &str) -> Result<Option<Box<dyn ProjectFile>>> {
        let (relative, full) = self.resolve(path)?;
        match tokio::fs::metadata(&full).await {
            Ok(metadata) if metadata.is_file() => Ok(Some(Box::new(LocalFile {
                path: relative,
                full_path: full,
            }))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn add_file(&self, path: &str, content: &str) -> Result<()> {
        let (relative, full) = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, content).await?;
        debug!(project = %self.id, path = %relative, "Added file");
        Ok(())
    }
}

struct LocalFile {
    path: String,
    full_path: PathBuf,
}

#[async_trait]
impl ProjectFile for LocalFile {
    fn path(&self) -> &str {
        &self.path
    }

    async fn get_content(&self) -> Result<String> {
        Ok(tokio::fs::read_to_string(&self.full_path).await?)
    }

    async fn set_content(&self, content: &str) -> Result<()> {
        tokio::fs::write(&self.full_path, content).await?;
        debug!(path = %self.path, "Updated file");
        Ok(())
    }
}

/// A project held entirely in memory. Clones share the same files.
#[derive(Debug, Clone)]
pub struct InMemoryProject {
    id: RepoRef,
    files: Arc<DashMap<String, String>>,
}

impl InMemoryProject {
    pub fn new(id: RepoRef) -> Self {
        Self {
            id,
            files: Arc::new(DashMap::new()),
        }
    }

    /// Create a project seeded with files.
    pub fn of<'a>(
        id: RepoRef,
        files: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self> {
        let project = Self::new(id);
        for (path, content) in files {
            project
                .files
                .insert(normalize_path(path)?, content.to_string());
        }
        Ok(project)
    }

    /// Content of a file, if present.
    pub fn content(&self, path: &str) -> Option<String> {
        let path = normalize_path(path).ok()?;
        self.files.get(&path).map(|entry| entry.value().clone())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[async_trait]
impl Project for InMemoryProject {
    fn id(&self) -> &RepoRef {
        &self.id
    }

    async fn get_file(&self, path: &str) -> Result<Option<Box<dyn ProjectFile>>> {
        let path = normalize_path(path)?;
        if !self.files.contains_key(&path) {
            return Ok(None);
        }
        Ok(Some(Box::new(InMemoryFile {
            path,
            files: Arc::clone(&self.files),
        })))
    }

    async fn add_file(&self, path: &str, content: &str) -> Result<()> {
        self.files.insert(normalize_path(path)?, content.to_string());
        Ok(())
    }
}

struct InMemoryFile {
    path: String,
    files: Arc<DashMap<String, String>>,
}

#[async_trait]
impl ProjectFile for InMemoryFile {
    fn path(&self) -> &str {
        &self.path
    }

    async fn get_content(&self) -> Result<String> {
        self.files
            .get(&self.path)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::InvalidPath(format!("{} was removed", self.path)))
    }

    async fn set_content(&self, content: &str) -> Result<()> {
        self.files.insert(self.path.clone(), content.to_string());
        Ok(())
    }
}
