//! Core definition file types
//!
//! This module defines the data structures that represent a Taskfile.yml as far
//! as the launcher cares about it. Everything the external runner interprets
//! (commands, deps, vars) is ignored here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the pseudo-task that is never offered in the menu
pub const DEFAULT_TASK: &str = "default";

/// Top-level definition document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskfileDocument {
    /// Tasks in order of first appearance
    #[serde(default, deserialize_with = "deserialize_tasks")]
    pub tasks: Vec<TaskEntry>,
}

/// A named task and the metadata the launcher reads from it
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEntry {
    pub name: String,
    pub metadata: TaskMetadata,
}

/// Per-task attributes consulted by the launcher
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TaskMetadata {
    /// Prompt text shown before the task runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptText>,

    /// Short description, shown with `-v`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

/// A prompt declared as one string or a list of lines
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PromptText {
    Single(String),
    Lines(Vec<String>),
}

impl PromptText {
    /// The prompt as a single line of text
    pub fn text(&self) -> String {
        match self {
            PromptText::Single(s) => s.clone(),
            PromptText::Lines(lines) => lines.join(" "),
        }
    }
}

impl TaskMetadata {
    /// Prompt text, if any non-blank prompt was declared
    pub fn prompt_text(&self) -> Option<String> {
        self.prompt
            .as_ref()
            .map(PromptText::text)
            .filter(|text| !text.trim().is_empty())
    }
}

/// A loaded definition file. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Taskfile {
    path: PathBuf,
    tasks: Vec<TaskEntry>,
}

impl Taskfile {
    /// Wrap parsed tasks with the path they were read from
    pub fn new(path: PathBuf, tasks: Vec<TaskEntry>) -> Self {
        Taskfile { path, tasks }
    }

    /// Path the tasks were loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a task's metadata by name
    pub fn get(&self, name: &str) -> Option<&TaskMetadata> {
        self.tasks
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.metadata)
    }

    /// Task names offered in the menu: every key except `default`, in file order
    pub fn menu_names(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .map(|entry| entry.name.as_str())
            .filter(|name| *name != DEFAULT_TASK)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Custom deserializer for the `tasks` mapping that keeps document order and
/// tolerates shorthand task bodies (strings, lists, null)
fn deserialize_tasks<'de, D>(deserializer: D) -> Result<Vec<TaskEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::Mapping(mapping) => {
            let mut entries: Vec<TaskEntry> = Vec::with_capacity(mapping.len());
            for (key, body) in mapping {
                let name = match key {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return Err(D::Error::custom("task names must be scalars")),
                };

                let metadata = match body {
                    Value::Mapping(_) => {
                        TaskMetadata::deserialize(body).map_err(D::Error::custom)?
                    }
                    // Shorthand bodies carry no launcher metadata
                    _ => TaskMetadata::default(),
                };

                match entries.iter_mut().find(|entry| entry.name == name) {
                    Some(existing) => existing.metadata = metadata,
                    None => entries.push(TaskEntry { name, metadata }),
                }
            }
            Ok(entries)
        }
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("tasks must be a mapping")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_keeps_document_order() {
        let yaml = r#"
tasks:
  zeta:
    cmds: [echo z]
  alpha:
    cmds: [echo a]
  default:
    cmds: [task --list]
  mid:
    cmds: [echo m]
"#;
        let doc: TaskfileDocument = serde_yaml::from_str(yaml).unwrap();
        let names: Vec<&str> = doc.tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "default", "mid"]);
    }

    #[test]
    fn test_deserialize_prompt_and_desc() {
        let yaml = r#"
tasks:
  build:
    desc: Build the target
    prompt: "Target name?"
"#;
        let doc: TaskfileDocument = serde_yaml::from_str(yaml).unwrap();
        let build = &doc.tasks[0].metadata;
        assert_eq!(build.desc, Some("Build the target".to_string()));
        assert_eq!(build.prompt_text(), Some("Target name?".to_string()));
    }

    #[test]
    fn test_deserialize_prompt_list() {
        let yaml = r#"
tasks:
  wipe:
    prompt:
      - "This removes everything."
      - "Continue? (y/N)"
"#;
        let doc: TaskfileDocument = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            doc.tasks[0].metadata.prompt_text(),
            Some("This removes everything. Continue? (y/N)".to_string())
        );
    }

    #[test]
    fn test_deserialize_shorthand_bodies() {
        let yaml = r#"
tasks:
  hello: echo hello
  steps:
    - echo one
    - echo two
  empty:
"#;
        let doc: TaskfileDocument = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(doc.tasks.len(), 3);
        assert!(doc.tasks.iter().all(|t| t.metadata == TaskMetadata::default()));
    }

    #[test]
    fn test_missing_or_null_tasks_is_empty() {
        let doc: TaskfileDocument = serde_yaml::from_str("version: '3'\n").unwrap();
        assert!(doc.tasks.is_empty());

        let doc: TaskfileDocument = serde_yaml::from_str("tasks:\n").unwrap();
        assert!(doc.tasks.is_empty());
    }

    #[test]
    fn test_tasks_must_be_mapping() {
        let result: Result<TaskfileDocument, _> = serde_yaml::from_str("tasks: [a, b]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_equal_names_keep_first_position() {
        let yaml = "tasks:\n  1: {}\n  lint: {}\n  '1':\n    prompt: 'Again?'\n";
        let doc: TaskfileDocument = serde_yaml::from_str(yaml).unwrap();
        let names: Vec<&str> = doc.tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["1", "lint"]);
        assert_eq!(doc.tasks[0].metadata.prompt_text(), Some("Again?".to_string()));
    }

    #[test]
    fn test_blank_prompt_counts_as_none() {
        let meta = TaskMetadata {
            prompt: Some(PromptText::Single("   ".to_string())),
            ..Default::default()
        };
        assert_eq!(meta.prompt_text(), None);
    }

    #[test]
    fn test_menu_names_exclude_default() {
        let taskfile = Taskfile::new(
            PathBuf::from("Taskfile.yml"),
            vec![
                TaskEntry {
                    name: "default".to_string(),
                    metadata: TaskMetadata::default(),
                },
                TaskEntry {
                    name: "build".to_string(),
                    metadata: TaskMetadata::default(),
                },
            ],
        );
        assert_eq!(taskfile.menu_names(), vec!["build"]);
        assert_eq!(taskfile.len(), 2);
        assert!(taskfile.get("default").is_some());
    }
}
