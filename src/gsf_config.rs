// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

//! Spec document I/O
//!
//! Responsibilities:
//! - Config directory resolution (~/.config/gridspec/)
//! - One document per layout surface (workspace.xml, hotseat.xml, ...)
//! - Fallback to the embedded default when a surface has no file on disk
//! - Deployment of embedded defaults, archiving existing files (name.NNNNN)

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::gsc_core::SpecKind;
use crate::gse_error::ConfigError;

// ============================================================================
// SECTION 1: Surfaces and embedded defaults
// ============================================================================

/// A launcher surface backed by its own spec document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Workspace,
    AllApps,
    Folder,
    Hotseat,
    WorkspaceCell,
    AllAppsCell,
}

impl Surface {
    pub const ALL: [Surface; 6] = [
        Surface::Workspace,
        Surface::AllApps,
        Surface::Folder,
        Surface::Hotseat,
        Surface::WorkspaceCell,
        Surface::AllAppsCell,
    ];

    /// Entry kind the surface's document declares
    pub fn kind(self) -> SpecKind {
        match self {
            Surface::Workspace => SpecKind::Workspace,
            Surface::AllApps => SpecKind::AllApps,
            Surface::Folder => SpecKind::Folder,
            Surface::Hotseat => SpecKind::Hotseat,
            Surface::WorkspaceCell | Surface::AllAppsCell => SpecKind::Cell,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Surface::Workspace => "workspace.xml",
            Surface::AllApps => "all_apps.xml",
            Surface::Folder => "folder.xml",
            Surface::Hotseat => "hotseat.xml",
            Surface::WorkspaceCell => "workspace_cell.xml",
            Surface::AllAppsCell => "all_apps_cell.xml",
        }
    }

    /// Embedded default document for this surface
    pub fn default_document(self) -> &'static str {
        match self {
            Surface::Workspace => include_str!("../defaults/workspace.xml"),
            Surface::AllApps => include_str!("../defaults/all_apps.xml"),
            Surface::Folder => include_str!("../defaults/folder.xml"),
            Surface::Hotseat => include_str!("../defaults/hotseat.xml"),
            Surface::WorkspaceCell => include_str!("../defaults/workspace_cell.xml"),
            Surface::AllAppsCell => include_str!("../defaults/all_apps_cell.xml"),
        }
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.file_name();
        f.write_str(name.strip_suffix(".xml").unwrap_or(name))
    }
}

// ============================================================================
// SECTION 2: Config path resolution
// ============================================================================

/// Resolve the standard config directory
pub fn config_dir() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("gridspec");
    path
}

// ============================================================================
// SECTION 3: Document loading
// ============================================================================

/// Load a surface's document from `dir`, falling back to the embedded default
/// when the file does not exist. Any other read failure is an error.
pub fn load_document(dir: &Path, surface: Surface) -> Result<String, ConfigError> {
    let path = dir.join(surface.file_name());

    match fs::read_to_string(&path) {
        Ok(text) => {
            debug!(target: "config", "loaded {} ({} bytes)", path.display(), text.len());
            Ok(text)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(target: "config", "{} not found, using embedded default", path.display());
            Ok(surface.default_document().to_string())
        }
        Err(e) => Err(ConfigError::Io(e)),
    }
}

// ============================================================================
// SECTION 4: Deployment and archiving
// ============================================================================

/// First free `<name>.NNNNN` sibling of `path`, starting at 10000
fn archive_path(path: &Path, file_name: &str) -> PathBuf {
    let mut suffix = 10000;
    loop {
        let candidate = path.with_file_name(format!("{}.{}", file_name, suffix));
        if !candidate.exists() {
            return candidate;
        }
        suffix += 1;
    }
}

/// Write every embedded default into `dir`
///
/// Existing documents are renamed to `<name>.NNNNN` first so hand edits
/// are never lost. Returns the paths written.
pub fn deploy_defaults(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(Surface::ALL.len());
    for surface in Surface::ALL {
        let path = dir.join(surface.file_name());

        if path.exists() {
            let archive = archive_path(&path, surface.file_name());
            fs::rename(&path, &archive)?;
            info!(target: "config", "archived {} -> {}", path.display(), archive.display());
        }

        fs::write(&path, surface.default_document())?;
        info!(target: "config", "deployed embedded default to {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_gridspec() {
        let dir = config_dir();
        assert!(dir.ends_with(".config/gridspec"));
    }

    #[test]
    fn test_surface_kinds() {
        assert_eq!(Surface::WorkspaceCell.kind(), SpecKind::Cell);
        assert_eq!(Surface::AllAppsCell.kind(), SpecKind::Cell);
        assert_eq!(Surface::Folder.kind(), SpecKind::Folder);
        assert_eq!(Surface::AllApps.to_string(), "all_apps");
    }

    #[test]
    fn test_default_documents_declare_their_root() {
        for surface in Surface::ALL {
            let root = crate::gsp_parse::schema(surface.kind()).root_tag;
            assert!(
                surface.default_document().contains(&format!("<{}", root)),
                "{} default lacks <{}>",
                surface,
                root
            );
        }
    }

    #[test]
    fn test_archive_path_skips_taken_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hotseat.xml");
        fs::write(dir.path().join("hotseat.xml.10000"), "").unwrap();

        let archive = archive_path(&path, "hotseat.xml");
        assert_eq!(archive, dir.path().join("hotseat.xml.10001"));
    }
}
