//! Taskfile discovery
//!
//! Candidates are probed in a fixed priority order and the first one that
//! exists wins:
//!
//! 1. an explicit path (used unconditionally)
//! 2. the caller directory hint
//! 3. the current working directory
//! 4. up to [`MAX_ANCESTOR_DEPTH`] parent directories
//! 5. the home directory
//! 6. the directory holding the launcher executable
//!
//! Resolution and the `--info` listing share [`Locator::candidates`], so the
//! two can never disagree about order or existence.

use crate::config::settings::LauncherSettings;
use directories::BaseDirs;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

/// How many parent directories above the working directory are searched
pub const MAX_ANCESTOR_DEPTH: usize = 5;

/// Where a candidate path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    Explicit,
    CallerDir,
    WorkingDir,
    /// Parent directory, 1-based distance from the working directory
    Ancestor(usize),
    Home,
    Bundled,
}

impl fmt::Display for CandidateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateOrigin::Explicit => write!(f, "explicit path"),
            CandidateOrigin::CallerDir => write!(f, "caller directory"),
            CandidateOrigin::WorkingDir => write!(f, "working directory"),
            CandidateOrigin::Ancestor(depth) => write!(f, "parent directory (+{})", depth),
            CandidateOrigin::Home => write!(f, "home directory"),
            CandidateOrigin::Bundled => write!(f, "bundled fallback"),
        }
    }
}

/// A probed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub origin: CandidateOrigin,
    pub exists: bool,
}

/// Result of a search, for diagnostics
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Every candidate in priority order
    pub candidates: Vec<Candidate>,
    /// Index into `candidates` of the selected path, `None` when the
    /// deterministic default was used
    pub selected: Option<usize>,
    /// The path resolution settles on
    pub resolved: PathBuf,
}

/// Resolves the active Taskfile path
#[derive(Debug, Clone)]
pub struct Locator {
    explicit: Option<PathBuf>,
    caller_dir: Option<PathBuf>,
    working_dir: PathBuf,
    home_dir: Option<PathBuf>,
    bundled_dir: Option<PathBuf>,
    file_names: Vec<String>,
}

impl Locator {
    /// Create a locator rooted at a working directory with no other roots
    pub fn new(working_dir: PathBuf) -> Self {
        Locator {
            explicit: None,
            caller_dir: None,
            working_dir,
            home_dir: None,
            bundled_dir: None,
            file_names: LauncherSettings::default().file_names,
        }
    }

    /// Create a locator from the process environment
    pub fn from_env(explicit: Option<PathBuf>, settings: &LauncherSettings) -> Self {
        let working_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let home_dir = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        let bundled_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        let mut locator = Locator::new(working_dir).with_file_names(settings.file_names.clone());
        locator.explicit = explicit;
        locator.caller_dir = settings.caller_dir.clone();
        locator.home_dir = home_dir;
        locator.bundled_dir = bundled_dir;
        locator
    }

    /// Use an explicit path, bypassing the search
    pub fn with_explicit(mut self, path: PathBuf) -> Self {
        self.explicit = Some(path);
        self
    }

    /// Set the caller directory hint
    pub fn with_caller_dir(mut self, dir: PathBuf) -> Self {
        self.caller_dir = Some(dir);
        self
    }

    /// Set the home directory
    pub fn with_home_dir(mut self, dir: PathBuf) -> Self {
        self.home_dir = Some(dir);
        self
    }

    /// Set the bundled fallback directory
    pub fn with_bundled_dir(mut self, dir: PathBuf) -> Self {
        self.bundled_dir = Some(dir);
        self
    }

    /// Set the file names probed in each directory
    pub fn with_file_names(mut self, names: Vec<String>) -> Self {
        if !names.is_empty() {
            self.file_names = names;
        }
        self
    }

    /// Every candidate path in priority order, with its existence flag
    pub fn candidates(&self) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        if let Some(path) = &self.explicit {
            candidates.push(Candidate {
                path: path.clone(),
                origin: CandidateOrigin::Explicit,
                exists: is_taskfile(path),
            });
        }

        for (dir, origin) in self.search_dirs() {
            for name in &self.file_names {
                let path = dir.join(name);
                let exists = is_taskfile(&path);
                candidates.push(Candidate {
                    path,
                    origin,
                    exists,
                });
            }
        }

        candidates
    }

    /// Resolve the Taskfile path. Never fails: when nothing exists the
    /// deterministic default is returned so the caller can report it.
    pub fn resolve(&self) -> PathBuf {
        self.report().resolved
    }

    /// Run the search and keep every probed candidate
    pub fn report(&self) -> SearchReport {
        let candidates = self.candidates();
        let selected = candidates
            .iter()
            .position(|c| c.origin == CandidateOrigin::Explicit || c.exists);
        let resolved = match selected {
            Some(index) => candidates[index].path.clone(),
            None => self.default_path(),
        };

        SearchReport {
            candidates,
            selected,
            resolved,
        }
    }

    /// Path used when no candidate exists
    pub fn default_path(&self) -> PathBuf {
        let name = self
            .file_names
            .first()
            .map(String::as_str)
            .unwrap_or(crate::config::settings::TASKFILE_NAMES[0]);

        match &self.caller_dir {
            Some(dir) => dir.join(name),
            None => self.working_dir.join(name),
        }
    }

    /// Directories to probe, in priority order
    fn search_dirs(&self) -> Vec<(PathBuf, CandidateOrigin)> {
        let mut dirs = Vec::new();

        if let Some(dir) = &self.caller_dir {
            dirs.push((dir.clone(), CandidateOrigin::CallerDir));
        }

        dirs.push((self.working_dir.clone(), CandidateOrigin::WorkingDir));

        for (depth, parent) in self
            .working_dir
            .ancestors()
            .skip(1)
            .take(MAX_ANCESTOR_DEPTH)
            .enumerate()
        {
            // A relative working directory runs out of ancestors at ""
            if parent.as_os_str().is_empty() {
                break;
            }
            dirs.push((parent.to_path_buf(), CandidateOrigin::Ancestor(depth + 1)));
        }

        if let Some(dir) = &self.home_dir {
            dirs.push((dir.clone(), CandidateOrigin::Home));
        }

        if let Some(dir) = &self.bundled_dir {
            dirs.push((dir.clone(), CandidateOrigin::Bundled));
        }

        dirs
    }
}

fn is_taskfile(path: &Path) -> bool {
    path.exists() && path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Layout: <tmp>/root/l1/l2/l3/l4/l5/work, plus <tmp>/home, <tmp>/hint,
    /// <tmp>/bundle. The working directory's five ancestors stay inside <tmp>.
    struct Fixture {
        _temp: TempDir,
        base: PathBuf,
        work: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let base = temp.path().to_path_buf();
            let work = base.join("root/l1/l2/l3/l4/l5/work");
            fs::create_dir_all(&work).unwrap();
            for dir in ["home", "hint", "bundle"] {
                fs::create_dir_all(base.join(dir)).unwrap();
            }
            Fixture {
                _temp: temp,
                base,
                work,
            }
        }

        fn dir(&self, rel: &str) -> PathBuf {
            self.base.join(rel)
        }

        fn touch(&self, dir: &Path) -> PathBuf {
            let path = dir.join("Taskfile.yml");
            fs::write(&path, "tasks: {}\n").unwrap();
            path
        }

        fn locator(&self) -> Locator {
            Locator::new(self.work.clone())
                .with_caller_dir(self.dir("hint"))
                .with_home_dir(self.dir("home"))
                .with_bundled_dir(self.dir("bundle"))
        }
    }

    #[test]
    fn test_explicit_path_short_circuits_even_if_missing() {
        let fx = Fixture::new();
        fx.touch(&fx.work);
        let explicit = fx.dir("nowhere/Custom.yml");

        let locator = fx.locator().with_explicit(explicit.clone());
        assert_eq!(locator.resolve(), explicit);
    }

    #[test]
    fn test_caller_dir_beats_working_dir() {
        let fx = Fixture::new();
        fx.touch(&fx.work);
        let hinted = fx.touch(&fx.dir("hint"));

        assert_eq!(fx.locator().resolve(), hinted);
    }

    #[test]
    fn test_working_dir_beats_ancestors() {
        let fx = Fixture::new();
        fx.touch(&fx.dir("root/l1/l2/l3/l4/l5"));
        let local = fx.touch(&fx.work);

        assert_eq!(fx.locator().resolve(), local);
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let fx = Fixture::new();
        fx.touch(&fx.dir("root/l1"));
        let near = fx.touch(&fx.dir("root/l1/l2/l3"));

        assert_eq!(fx.locator().resolve(), near);
    }

    #[test]
    fn test_ancestor_search_is_bounded() {
        let fx = Fixture::new();
        // Five levels up from work is root/l1; root is six levels up
        let at_limit = fx.touch(&fx.dir("root/l1"));
        assert_eq!(fx.locator().resolve(), at_limit);

        fs::remove_file(&at_limit).unwrap();
        fx.touch(&fx.dir("root"));
        let home = fx.touch(&fx.dir("home"));
        assert_eq!(fx.locator().resolve(), home);
    }

    #[test]
    fn test_home_beats_bundled() {
        let fx = Fixture::new();
        fx.touch(&fx.dir("bundle"));
        let home = fx.touch(&fx.dir("home"));

        assert_eq!(fx.locator().resolve(), home);
    }

    #[test]
    fn test_bundled_is_last_resort() {
        let fx = Fixture::new();
        let bundled = fx.touch(&fx.dir("bundle"));

        assert_eq!(fx.locator().resolve(), bundled);
    }

    #[test]
    fn test_second_file_name_is_found() {
        let fx = Fixture::new();
        let yaml = fx.work.join("Taskfile.yaml");
        fs::write(&yaml, "tasks: {}\n").unwrap();

        assert_eq!(fx.locator().resolve(), yaml);
    }

    #[test]
    fn test_default_uses_caller_dir_when_nothing_exists() {
        let fx = Fixture::new();
        assert_eq!(fx.locator().resolve(), fx.dir("hint/Taskfile.yml"));
    }

    #[test]
    fn test_default_uses_working_dir_without_hint() {
        let fx = Fixture::new();
        let locator = Locator::new(fx.work.clone());
        assert_eq!(locator.resolve(), fx.work.join("Taskfile.yml"));
    }

    #[test]
    fn test_directories_are_never_taskfiles() {
        let fx = Fixture::new();
        fs::create_dir(fx.work.join("Taskfile.yml")).unwrap();
        let home = fx.touch(&fx.dir("home"));

        assert_eq!(fx.locator().resolve(), home);
    }

    #[test]
    fn test_candidate_order() {
        let fx = Fixture::new();
        let origins: Vec<CandidateOrigin> = fx
            .locator()
            .candidates()
            .into_iter()
            .map(|c| c.origin)
            .step_by(2)
            .collect();

        assert_eq!(
            origins,
            vec![
                CandidateOrigin::CallerDir,
                CandidateOrigin::WorkingDir,
                CandidateOrigin::Ancestor(1),
                CandidateOrigin::Ancestor(2),
                CandidateOrigin::Ancestor(3),
                CandidateOrigin::Ancestor(4),
                CandidateOrigin::Ancestor(5),
                CandidateOrigin::Home,
                CandidateOrigin::Bundled,
            ]
        );
    }

    #[test]
    fn test_report_agrees_with_resolution() {
        let fx = Fixture::new();
        let layouts: Vec<Vec<&str>> = vec![
            vec![],
            vec!["bundle"],
            vec!["home", "bundle"],
            vec!["root/l1/l2", "home"],
            vec!["root/l1/l2/l3/l4/l5/work", "root/l1"],
            vec!["hint", "home"],
        ];

        for layout in layouts {
            for c in fx.locator().candidates() {
                if c.path.is_file() {
                    fs::remove_file(&c.path).unwrap();
                }
            }
            for dir in &layout {
                fx.touch(&fx.dir(dir));
            }

            let locator = fx.locator();
            let report = locator.report();
            let expected = report
                .candidates
                .iter()
                .find(|c| c.exists)
                .map(|c| c.path.clone())
                .unwrap_or_else(|| locator.default_path());

            assert_eq!(locator.resolve(), expected, "layout {:?}", layout);
            for c in &report.candidates {
                assert_eq!(c.exists, c.path.is_file());
            }
        }
    }

    #[test]
    fn test_explicit_is_listed_first() {
        let fx = Fixture::new();
        let explicit = fx.touch(&fx.dir("bundle"));
        let report = fx.locator().with_explicit(explicit.clone()).report();

        assert_eq!(report.candidates[0].origin, CandidateOrigin::Explicit);
        assert!(report.candidates[0].exists);
        assert_eq!(report.selected, Some(0));
        assert_eq!(report.resolved, explicit);
    }
}
