//! Bundled NameU rename presets

use crate::registry::{shell, Registry};

/// Title shown above the preset table
pub const TITLE: &str = "NameU - unique file name tool";

const NAMEU: &str = "python -m nameu";

/// The preset registry, in menu order
pub fn registry() -> Registry {
    Registry::new(TITLE)
        .task(
            "standard_multi",
            "Standard multi-artist mode - appends the artist name suffix",
            shell(&format!("{} --mode multi --clipboard --keep-timestamp", NAMEU)),
        )
        .task(
            "standard_single",
            "Standard single-artist mode - appends the artist name suffix",
            shell(&format!("{} --mode single --clipboard --keep-timestamp", NAMEU)),
        )
        .task(
            "no_artist_mode",
            "No-artist mode - renames without adding an artist suffix",
            shell(&format!("{} --no-artist --clipboard --keep-timestamp", NAMEU)),
        )
        .task(
            "no_sensitive_convert",
            "No sensitive-word conversion - keeps sensitive words as written",
            shell(&format!(
                "{} --mode multi --clipboard --keep-timestamp --no-convert-sensitive",
                NAMEU
            )),
        )
}
