//! Catalog backed by a Taskfile and the external runner

use crate::config::{load_taskfile, LauncherSettings, Taskfile};
use crate::error::{ConfigError, Result};
use crate::runner::{InterruptFlag, TaskRunner};
use crate::session::Catalog;
use crate::ui::{Console, Menu};
use std::path::Path;

/// Banner shown above the runner's listing
pub const BANNER: &str = "Taskfile Task Launcher";

/// The generic launcher: tasks come from a Taskfile, runs go to the runner
#[derive(Debug)]
pub struct TaskfileLauncher {
    taskfile: Taskfile,
    runner: TaskRunner,
}

impl TaskfileLauncher {
    /// Load the Taskfile at `path`. A missing or unparseable file is an error.
    pub fn open(
        path: &Path,
        settings: &LauncherSettings,
        interrupt: InterruptFlag,
    ) -> Result<Self> {
        let taskfile = load_taskfile(path)?;
        let runner = TaskRunner::new(settings.runner.clone(), path, interrupt);
        Ok(Self::new(taskfile, runner))
    }

    pub fn new(taskfile: Taskfile, runner: TaskRunner) -> Self {
        TaskfileLauncher { taskfile, runner }
    }
}

impl Catalog for TaskfileLauncher {
    fn present(&self, console: &dyn Console) {
        let rule = "─".repeat(BANNER.chars().count() + 2);
        console.heading(&format!("╭{}╮", rule));
        console.heading(&format!("│ {} │", BANNER));
        console.heading(&format!("╰{}╯", rule));

        match self.runner.list() {
            Ok(listing) => console.plain(listing.trim_end()),
            Err(e) => console.error(&format!("Failed to list tasks: {}", e)),
        }
    }

    fn menu(&self) -> Menu {
        Menu::new(self.taskfile.menu_names().into_iter().map(|name| {
            let desc = self.taskfile.get(name).and_then(|meta| meta.desc.clone());
            (name, desc)
        }))
    }

    fn prompt_for(&self, task: &str) -> Option<String> {
        self.taskfile.get(task).and_then(|meta| meta.prompt_text())
    }

    fn execute(&self, task: &str, input: &str, console: &dyn Console) -> Result<i32> {
        if self.taskfile.get(task).is_none() {
            return Err(ConfigError::TaskNotFound(task.to_string()).into());
        }
        Ok(self.runner.run(task, input, console))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_taskfile;
    use crate::error::LataError;
    use crate::ui::{Level, MemoryConsole};
    use std::path::PathBuf;

    fn launcher(yaml: &str) -> TaskfileLauncher {
        let path = PathBuf::from("/nonexistent/Taskfile.yml");
        let taskfile = parse_taskfile(yaml, &path).unwrap();
        let runner = TaskRunner::new("lata-no-such-runner-xyz", &path, InterruptFlag::new());
        TaskfileLauncher::new(taskfile, runner)
    }

    #[test]
    fn test_menu_excludes_default() {
        let launcher = launcher("tasks:\n  build:\n    prompt: 'Target name?'\n  default: {}\n");
        let names: Vec<String> = launcher
            .menu()
            .entries()
            .iter()
            .map(|e| e.name.clone())
            .collect();
        assert_eq!(names, vec!["build"]);
    }

    #[test]
    fn test_menu_carries_descriptions() {
        let launcher = launcher("tasks:\n  build:\n    desc: Build it\n  lint: {}\n");
        let menu = launcher.menu();
        assert_eq!(menu.entries()[0].description.as_deref(), Some("Build it"));
        assert_eq!(menu.entries()[1].description, None);

        let console = MemoryConsole::new();
        launcher.render_menu(&menu, &console);
        assert_eq!(
            console.messages(Level::Debug),
            vec!["build: Build it".to_string()]
        );
    }

    #[test]
    fn test_prompt_lookup() {
        let launcher = launcher("tasks:\n  build:\n    prompt: 'Target name?'\n  lint: {}\n");
        assert_eq!(launcher.prompt_for("build"), Some("Target name?".to_string()));
        assert_eq!(launcher.prompt_for("lint"), None);
        assert_eq!(launcher.prompt_for("missing"), None);
    }

    #[test]
    fn test_listing_failure_is_reported_inline() {
        let launcher = launcher("tasks:\n  build: {}\n");
        let console = MemoryConsole::new();
        launcher.present(&console);

        assert!(console.contains(BANNER));
        assert_eq!(console.messages(Level::Error).len(), 1);
        assert!(console.contains("Failed to list tasks"));
    }

    #[test]
    fn test_unknown_task_is_an_error() {
        let launcher = launcher("tasks:\n  build: {}\n");
        let result = launcher.execute("deploy", "", &MemoryConsole::new());
        assert!(matches!(
            result,
            Err(LataError::Config(ConfigError::TaskNotFound(name))) if name == "deploy"
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let result = TaskfileLauncher::open(
            Path::new("/nonexistent/lata/Taskfile.yml"),
            &LauncherSettings::default(),
            InterruptFlag::new(),
        );
        assert!(matches!(
            result,
            Err(LataError::Config(ConfigError::NotFound(_)))
        ));
    }
}
