//! Recursive directory traversal

use std::path::PathBuf;
use walkdir::WalkDir;

/// Produces every regular file reachable under a set of roots
pub trait FileWalker {
    /// Lazily walk `roots` in order. Calling this again restarts the walk.
    fn walk<'a>(&'a self, roots: &'a [PathBuf]) -> Box<dyn Iterator<Item = PathBuf> + 'a>;
}

/// Filesystem walker backed by walkdir
///
/// Hidden files are included and symbolic links are followed. Missing roots
/// and unreadable entries yield nothing instead of failing the walk.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryWalker;

impl FileWalker for DirectoryWalker {
    fn walk<'a>(&'a self, roots: &'a [PathBuf]) -> Box<dyn Iterator<Item = PathBuf> + 'a> {
        Box::new(roots.iter().flat_map(|root| {
            WalkDir::new(root)
                .follow_links(true)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|entry| entry.file_type().is_file())
                .map(walkdir::DirEntry::into_path)
        }))
    }
}
