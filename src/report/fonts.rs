//! Font discovery for PDF rendering.
//!
//! `genpdf` embeds TrueType fonts, so the report needs a regular/bold/italic/
//! bold-italic family on disk. Search order:
//!
//! 1. `REPORT_FONTS_DIR` (expects the `<Family>-Regular.ttf` naming scheme)
//! 2. well-known system font directories with a DejaVu or Liberation family
//!
//! Nothing here bundles font binaries; the error message names the searched
//! locations so a missing family is easy to fix.

use std::path::{Path, PathBuf};

use genpdf::fonts::{FontData, FontFamily};

use crate::error::ReportError;

/// Environment variable pointing at a directory with
/// `<Family>-{Regular,Bold,Italic,BoldItalic}.ttf` files.
pub const FONTS_DIR_ENV: &str = "REPORT_FONTS_DIR";
/// Family name expected inside `REPORT_FONTS_DIR`.
pub const FONTS_FAMILY_ENV: &str = "REPORT_FONTS_FAMILY";

const DEFAULT_ENV_FAMILY: &str = "Roboto";

/// Known system families: directory, then the four file names in
/// regular/bold/italic/bold-italic order.
const SYSTEM_FAMILIES: &[(&str, [&str; 4])] = &[
    (
        "/usr/share/fonts/truetype/dejavu",
        [
            "DejaVuSans.ttf",
            "DejaVuSans-Bold.ttf",
            "DejaVuSans-Oblique.ttf",
            "DejaVuSans-BoldOblique.ttf",
        ],
    ),
    (
        "/usr/share/fonts/dejavu",
        [
            "DejaVuSans.ttf",
            "DejaVuSans-Bold.ttf",
            "DejaVuSans-Oblique.ttf",
            "DejaVuSans-BoldOblique.ttf",
        ],
    ),
    (
        "/usr/share/fonts/TTF",
        [
            "DejaVuSans.ttf",
            "DejaVuSans-Bold.ttf",
            "DejaVuSans-Oblique.ttf",
            "DejaVuSans-BoldOblique.ttf",
        ],
    ),
    (
        "/usr/share/fonts/truetype/liberation",
        [
            "LiberationSans-Regular.ttf",
            "LiberationSans-Bold.ttf",
            "LiberationSans-Italic.ttf",
            "LiberationSans-BoldItalic.ttf",
        ],
    ),
];

/// Locate a usable font family for report rendering.
pub fn load_font_family() -> Result<FontFamily<FontData>, ReportError> {
    for paths in candidate_families() {
        if paths.iter().all(|p| p.is_file()) {
            return family_from_files(&paths);
        }
    }
    Err(ReportError::render(format!(
        "no usable TTF font family found; searched {} and known system font \
         directories ({}); point {} at a directory with \
         <Family>-Regular.ttf files",
        std::env::var(FONTS_DIR_ENV).unwrap_or_else(|_| "<unset>".to_string()),
        SYSTEM_FAMILIES
            .iter()
            .map(|(dir, _)| *dir)
            .collect::<Vec<_>>()
            .join(", "),
        FONTS_DIR_ENV,
    )))
}

/// Indicates whether a complete font family is present on disk. Tests use
/// this to skip PDF rendering on machines without fonts.
pub fn fonts_available() -> bool {
    candidate_families()
        .iter()
        .any(|paths| paths.iter().all(|p| p.is_file()))
}

fn candidate_families() -> Vec<[PathBuf; 4]> {
    let mut candidates = Vec::new();

    if let Ok(dir) = std::env::var(FONTS_DIR_ENV) {
        let family =
            std::env::var(FONTS_FAMILY_ENV).unwrap_or_else(|_| DEFAULT_ENV_FAMILY.to_string());
        let dir = PathBuf::from(dir);
        candidates.push([
            dir.join(format!("{family}-Regular.ttf")),
            dir.join(format!("{family}-Bold.ttf")),
            dir.join(format!("{family}-Italic.ttf")),
            dir.join(format!("{family}-BoldItalic.ttf")),
        ]);
    }

    for (dir, files) in SYSTEM_FAMILIES {
        let dir = Path::new(dir);
        candidates.push([
            dir.join(files[0]),
            dir.join(files[1]),
            dir.join(files[2]),
            dir.join(files[3]),
        ]);
    }

    candidates
}

fn family_from_files(paths: &[PathBuf; 4]) -> Result<FontFamily<FontData>, ReportError> {
    let load = |path: &PathBuf| -> Result<FontData, ReportError> {
        let bytes = std::fs::read(path).map_err(|e| {
            ReportError::render(format!("failed to read font '{}': {e}", path.display()))
        })?;
        FontData::new(bytes, None).map_err(|e| {
            ReportError::render(format!("invalid font file '{}': {e}", path.display()))
        })
    };
    Ok(FontFamily {
        regular: load(&paths[0])?,
        bold: load(&paths[1])?,
        italic: load(&paths[2])?,
        bold_italic: load(&paths[3])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_candidates_are_always_probed() {
        // Independent of the environment there is one candidate per known
        // system family.
        let candidates = candidate_families();
        assert!(candidates.len() >= SYSTEM_FAMILIES.len());
    }

    #[test]
    fn load_reports_searched_locations_when_missing() {
        if fonts_available() {
            // A family exists on this machine; loading must succeed.
            assert!(load_font_family().is_ok());
        } else {
            let err = load_font_family().unwrap_err();
            assert!(matches!(err, ReportError::Render(_)));
            assert!(err.to_string().contains(FONTS_DIR_ENV));
        }
    }
}
