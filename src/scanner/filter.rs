//! Extension and recency filtering of walked files

use chrono::{DateTime, Duration, Local};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Extensions selected for the report (case-sensitive, without the dot)
pub const WATCHED_EXTENSIONS: [&str; 2] = ["py", "sh"];

/// Length of the trailing recency window
pub const RECENCY_WINDOW_HOURS: i64 = 24;

/// The instant `RECENCY_WINDOW_HOURS` before `now`
pub fn cutoff_from(now: DateTime<Local>) -> DateTime<Local> {
    now - Duration::hours(RECENCY_WINDOW_HOURS)
}

/// Selects files with a watched extension modified strictly after a cutoff
#[derive(Debug, Clone, Copy)]
pub struct ModificationFilter {
    cutoff: SystemTime,
}

impl ModificationFilter {
    pub fn new(cutoff: DateTime<Local>) -> Self {
        Self {
            cutoff: cutoff.into(),
        }
    }

    /// Exact match on the final suffix: `a.py` and `a.tar.sh` match,
    /// `a.PY`, `a.pyc` and `.py` do not.
    pub fn has_watched_extension(path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| WATCHED_EXTENSIONS.contains(&ext))
    }

    /// True if the file's modification time is strictly after the cutoff.
    /// Files whose metadata cannot be read are treated as not modified.
    pub fn modified_after_cutoff(&self, path: &Path) -> bool {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .is_ok_and(|modified| modified > self.cutoff)
    }

    pub fn matches(&self, path: &Path) -> bool {
        Self::has_watched_extension(path) && self.modified_after_cutoff(path)
    }

    /// Keep matching paths, preserving input order
    pub fn select<I>(&self, paths: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        paths.into_iter().filter(|path| self.matches(path)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn touch(path: &Path, modified: SystemTime) {
        fs::write(path, "").unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(modified)
            .unwrap();
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 4, 10, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_cutoff_is_24_hours_before_now() {
        let now = fixed_now();
        assert_eq!(cutoff_from(now), now - Duration::days(1));
    }

    #[test]
    fn test_watched_extensions() {
        assert!(ModificationFilter::has_watched_extension(Path::new("a.py")));
        assert!(ModificationFilter::has_watched_extension(Path::new("dir/run.sh")));
        assert!(ModificationFilter::has_watched_extension(Path::new("bundle.tar.sh")));
        assert!(ModificationFilter::has_watched_extension(Path::new("my file ü.py")));

        assert!(!ModificationFilter::has_watched_extension(Path::new("a.PY")));
        assert!(!ModificationFilter::has_watched_extension(Path::new("a.Sh")));
        assert!(!ModificationFilter::has_watched_extension(Path::new("a.pyc")));
        assert!(!ModificationFilter::has_watched_extension(Path::new("a.py.bak")));
        assert!(!ModificationFilter::has_watched_extension(Path::new(".py")));
        assert!(!ModificationFilter::has_watched_extension(Path::new("py")));
        assert!(!ModificationFilter::has_watched_extension(Path::new("notes.txt")));
    }

    #[test]
    fn test_recent_files_match_old_files_do_not() {
        let dir = TempDir::new().unwrap();
        let now = fixed_now();
        let filter = ModificationFilter::new(cutoff_from(now));

        let recent = dir.path().join("recent.py");
        let stale = dir.path().join("stale.py");
        touch(&recent, (now - Duration::hours(1)).into());
        touch(&stale, (now - Duration::hours(25)).into());

        assert!(filter.matches(&recent));
        assert!(!filter.matches(&stale));
    }

    #[test]
    fn test_mtime_equal_to_cutoff_is_excluded() {
        let dir = TempDir::new().unwrap();
        let now = fixed_now();
        let cutoff = cutoff_from(now);
        let filter = ModificationFilter::new(cutoff);

        let boundary = dir.path().join("boundary.sh");
        let just_after = dir.path().join("just_after.sh");
        touch(&boundary, cutoff.into());
        touch(&just_after, (cutoff + Duration::seconds(1)).into());

        assert!(!filter.matches(&boundary));
        assert!(filter.matches(&just_after));
    }

    #[test]
    fn test_other_extensions_never_match() {
        let dir = TempDir::new().unwrap();
        let now = fixed_now();
        let filter = ModificationFilter::new(cutoff_from(now));

        let text = dir.path().join("y.txt");
        touch(&text, (now - Duration::minutes(5)).into());

        assert!(!filter.matches(&text));
    }

    #[test]
    fn test_missing_file_does_not_match() {
        let dir = TempDir::new().unwrap();
        let filter = ModificationFilter::new(cutoff_from(fixed_now()));

        assert!(!filter.matches(&dir.path().join("gone.py")));
    }

    #[test]
    fn test_select_preserves_order() {
        let dir = TempDir::new().unwrap();
        let now = fixed_now();
        let filter = ModificationFilter::new(cutoff_from(now));

        let names = ["c.py", "skip.txt", "a.sh", "b.py"];
        let paths: Vec<PathBuf> = names.iter().map(|n| dir.path().join(n)).collect();
        for path in &paths {
            touch(path, (now - Duration::hours(2)).into());
        }

        let selected = filter.select(paths.clone());
        assert_eq!(selected, vec![paths[0].clone(), paths[2].clone(), paths[3].clone()]);
    }
}
