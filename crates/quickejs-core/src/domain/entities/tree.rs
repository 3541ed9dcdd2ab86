//! The project tree: an in-memory value of the directory/file structure that
//! will be written to disk.
//!
//! A [`Directory`] maps unique names to [`TreeNode`]s, so one name can never
//! be both a file and a directory at the same level. Entries are kept in a
//! `BTreeMap`, which makes every traversal sorted by name.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// One node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TreeNode {
    Directory(Directory),
    File(String),
}

impl TreeNode {
    pub fn as_directory(&self) -> Option<&Directory> {
        match self {
            Self::Directory(dir) => Some(dir),
            Self::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&str> {
        match self {
            Self::File(content) => Some(content),
            Self::Directory(_) => None,
        }
    }
}

/// A directory: a name-sorted map of children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Directory {
    children: BTreeMap<String, TreeNode>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn get(&self, name: &str) -> Option<&TreeNode> {
        self.children.get(name)
    }

    /// Children in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Insert a file. Fails if `name` is already taken by anything.
    pub fn insert_file(
        &mut self,
        name: &str,
        content: impl Into<String>,
    ) -> Result<(), DomainError> {
        validate_segment(name, name)?;
        match self.children.entry(name.to_string()) {
            Entry::Occupied(_) => Err(DomainError::DuplicatePath { path: name.into() }),
            Entry::Vacant(slot) => {
                slot.insert(TreeNode::File(content.into()));
                Ok(())
            }
        }
    }

    /// Return the child directory `name`, creating it when absent.
    /// Fails if a file already holds that name.
    fn dir_mut(&mut self, name: &str, full_path: &str) -> Result<&mut Directory, DomainError> {
        validate_segment(name, full_path)?;
        let node = self
            .children
            .entry(name.to_string())
            .or_insert_with(|| TreeNode::Directory(Directory::new()));
        match node {
            TreeNode::Directory(dir) => Ok(dir),
            TreeNode::File(_) => Err(DomainError::DuplicatePath {
                path: full_path.to_string(),
            }),
        }
    }
}

/// The root of a generated project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectTree {
    root: Directory,
}

impl ProjectTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Directory {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Add a file at a `/`-separated path, creating parent directories.
    ///
    /// Errors with [`DomainError::DuplicatePath`] if the path is taken or a
    /// parent segment is a file.
    pub fn add_file(&mut self, path: &str, content: impl Into<String>) -> Result<(), DomainError> {
        let (parents, name) = split_path(path)?;
        let mut dir = &mut self.root;
        for segment in parents {
            dir = dir.dir_mut(segment, path)?;
        }
        dir.insert_file(name, content).map_err(|err| match err {
            DomainError::DuplicatePath { .. } => DomainError::DuplicatePath { path: path.into() },
            other => other,
        })
    }

    /// Add a directory (and its parents). Existing directories are reused.
    pub fn add_dir(&mut self, path: &str) -> Result<(), DomainError> {
        let (parents, name) = split_path(path)?;
        let mut dir = &mut self.root;
        for segment in parents.into_iter().chain(std::iter::once(name)) {
            dir = dir.dir_mut(segment, path)?;
        }
        Ok(())
    }

    /// Look a node up by `/`-separated path.
    pub fn get(&self, path: &str) -> Option<&TreeNode> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = segments.next()?;
        let mut node = self.root.get(first)?;
        for segment in segments {
            node = node.as_directory()?.get(segment)?;
        }
        Some(node)
    }

    /// Content of the file at `path`, if it is a file.
    pub fn file(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(TreeNode::as_file)
    }

    pub fn contains_dir(&self, path: &str) -> bool {
        self.get(path).and_then(TreeNode::as_directory).is_some()
    }

    pub fn contains_file(&self, path: &str) -> bool {
        self.file(path).is_some()
    }

    /// Flatten into filesystem entries, parents before children, siblings in
    /// name order.
    pub fn entries(&self) -> Vec<FsEntry> {
        let mut out = Vec::new();
        flatten(&self.root, "", &mut out);
        out
    }

    /// All files as `(path, content)` in traversal order.
    pub fn files(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        collect_files(&self.root, "", &mut out);
        out
    }

    pub fn file_count(&self) -> usize {
        self.files().len()
    }

    pub fn directory_count(&self) -> usize {
        self.entries()
            .iter()
            .filter(|entry| matches!(entry, FsEntry::Directory(_)))
            .count()
    }

    /// A tree must contain at least one entry.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.root.is_empty() {
            return Err(DomainError::EmptyTree);
        }
        Ok(())
    }
}

fn split_path(path: &str) -> Result<(Vec<&str>, &str), DomainError> {
    if path.starts_with('/') {
        return Err(DomainError::AbsolutePathNotAllowed { path: path.into() });
    }
    let mut segments: Vec<&str> = path.split('/').collect();
    let name = segments.pop().unwrap_or_default();
    Ok((segments, name))
}

fn validate_segment(segment: &str, path: &str) -> Result<(), DomainError> {
    if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
        return Err(DomainError::InvalidPathSegment {
            path: path.to_string(),
            segment: segment.to_string(),
        });
    }
    Ok(())
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

fn flatten(dir: &Directory, prefix: &str, out: &mut Vec<FsEntry>) {
    for (name, node) in dir.iter() {
        let path = join(prefix, name);
        // Segments were validated on insertion, so this cannot fail.
        let Ok(relative) = RelativePath::try_new(&path) else {
            continue;
        };
        match node {
            TreeNode::Directory(child) => {
                out.push(FsEntry::Directory(DirectoryToCreate { path: relative }));
                flatten(child, &path, out);
            }
            TreeNode::File(content) => out.push(FsEntry::File(FileToWrite {
                path: relative,
                content: content.clone(),
            })),
        }
    }
}

fn collect_files<'a>(dir: &'a Directory, prefix: &str, out: &mut Vec<(String, &'a str)>) {
    for (name, node) in dir.iter() {
        let path = join(prefix, name);
        match node {
            TreeNode::Directory(child) => collect_files(child, &path, out),
            TreeNode::File(content) => out.push((path, content.as_str())),
        }
    }
}

/// A flattened tree entry handed to the filesystem port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
}

impl FileToWrite {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}
