//! Text rendering of a loaded library

use std::io::{self, Write};

use serato_core::{Crate, Library};

use crate::config::Sections;

/// Write the library as indented text.
///
/// Tracks and crates appear in the library's stored order; subcrates are
/// indented two spaces per nesting level.
pub fn write_library<W: Write>(
    out: &mut W,
    library: &Library,
    sections: Sections,
) -> io::Result<()> {
    if sections.tracks {
        writeln!(out, "All Tracks:")?;
        for track in &library.tracks {
            writeln!(out)?;
            writeln!(out, "  Path: {}", track.path)?;
        }
    }

    if sections.tracks && sections.crates {
        writeln!(out)?;
    }

    if sections.crates {
        writeln!(out, "Crates:")?;
        for c in &library.crates {
            write_crate(out, c, 1)?;
        }
    }

    Ok(())
}

fn write_crate<W: Write>(out: &mut W, c: &Crate, depth: usize) -> io::Result<()> {
    let indent = "  ".repeat(depth);

    writeln!(out)?;
    writeln!(out, "{}Name: {}", indent, c.name)?;
    writeln!(out, "{}Tracks:", indent)?;
    for track in &c.tracks {
        writeln!(out, "{}  Path: {}", indent, track.path)?;
    }

    if !c.subcrates().is_empty() {
        writeln!(out, "{}Subcrates:", indent)?;
        for sub in c.subcrates() {
            write_crate(out, sub, depth + 1)?;
        }
    }
    Ok(())
}
