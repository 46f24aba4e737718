//! Numbered task menu

use crate::ui::console::Console;

/// Label of the reserved `0` entry
pub const EXIT_LABEL: &str = "Exit";

/// One selectable menu row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// 1-based position
    pub number: usize,
    pub name: String,
    pub description: Option<String>,
}

/// Tasks numbered contiguously from 1; `0` always means exit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    /// Build a menu from (name, description) pairs, keeping their order
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<String>)>,
        S: Into<String>,
    {
        let entries = items
            .into_iter()
            .enumerate()
            .map(|(i, (name, description))| MenuEntry {
                number: i + 1,
                name: name.into(),
                description,
            })
            .collect();

        Menu { entries }
    }

    /// Build a menu of bare names
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(|name| (name, None)))
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a menu number; `0` and out-of-range numbers have none
    pub fn get(&self, number: usize) -> Option<&MenuEntry> {
        number
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
    }

    /// Render as an indented numbered list
    pub fn render_list(&self, console: &dyn Console) {
        console.plain("");
        console.warn("Select a task to run:");
        for entry in &self.entries {
            console.plain(&format!("  {}. {}", entry.number, entry.name));
            if let Some(desc) = entry.description.as_deref().and_then(|d| d.lines().next()) {
                console.debug(&format!("{}: {}", entry.name, desc.trim()));
            }
        }
        console.plain(&format!("  0. {}", EXIT_LABEL));
        console.hint("Press Ctrl+C to exit at any time");
    }

    /// Render as a table with a description column
    pub fn render_table(&self, title: &str, console: &dyn Console) {
        let name_width = self
            .entries
            .iter()
            .map(|e| e.name.chars().count())
            .chain(std::iter::once("Task".len()))
            .max()
            .unwrap_or(4);
        let number_width = self.len().to_string().len().max("No.".len());

        console.heading(title);
        console.plain(&format!(
            "{:>nw$}  {:<tw$}  {}",
            "No.",
            "Task",
            "Description",
            nw = number_width,
            tw = name_width
        ));
        for entry in &self.entries {
            let description = entry
                .description
                .as_deref()
                .and_then(|d| d.lines().next())
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or("No description");
            console.plain(&format!(
                "{:>nw$}  {:<tw$}  {}",
                entry.number,
                entry.name,
                description,
                nw = number_width,
                tw = name_width
            ));
        }
        console.plain(&format!("{:>nw$}  {}", 0, EXIT_LABEL, nw = number_width));
    }
}
