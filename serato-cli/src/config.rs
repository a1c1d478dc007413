//! CLI configuration

use std::path::PathBuf;

use serato_core::LibraryLayout;

/// Which parts of the library to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    pub tracks: bool,
    pub crates: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Library root containing the `_Serato_` directory
    pub root: PathBuf,
    pub layout: LibraryLayout,
    /// Emit JSON instead of text
    pub json: bool,
    pub sections: Sections,
}
