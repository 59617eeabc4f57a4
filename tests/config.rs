// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

use std::fs;

use gridspec::{
    deploy_defaults, load_document, ConfigError, Error, GridRequest, GridSpecs, HotseatPx, LoadOptions, Surface,
};

const CUSTOM_HOTSEAT: &str = r#"
<hotseatSpecs>
    <specs maxAspectRatio="10">
        <hotseatSpec dimensionType="width" maxAvailableSize="9999px">
            <hotseatQsbSpace fixedSize="10px"/>
            <edgePadding fixedSize="11px"/>
        </hotseatSpec>
        <hotseatSpec dimensionType="height" maxAvailableSize="9999px">
            <hotseatQsbSpace fixedSize="12px"/>
            <edgePadding fixedSize="13px"/>
        </hotseatSpec>
    </specs>
</hotseatSpecs>"#;

fn phone_request() -> GridRequest {
    GridRequest::new(2.0, 1080, 2000, 5, 6)
}

#[test]
fn missing_document_falls_back_to_embedded_default() {
    let dir = tempfile::tempdir().unwrap();
    let text = load_document(dir.path(), Surface::Hotseat).unwrap();
    assert_eq!(text, Surface::Hotseat.default_document());
}

#[test]
fn present_document_is_read_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("hotseat.xml"), CUSTOM_HOTSEAT).unwrap();

    let text = load_document(dir.path(), Surface::Hotseat).unwrap();
    assert_eq!(text, CUSTOM_HOTSEAT);
}

#[test]
fn deploy_writes_every_surface() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("gridspec");

    let written = deploy_defaults(&target).unwrap();
    assert_eq!(written.len(), Surface::ALL.len());
    for surface in Surface::ALL {
        let text = fs::read_to_string(target.join(surface.file_name())).unwrap();
        assert_eq!(text, surface.default_document());
    }
}

#[test]
fn redeploy_archives_existing_documents() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("hotseat.xml"), CUSTOM_HOTSEAT).unwrap();

    deploy_defaults(dir.path()).unwrap();
    let archived = fs::read_to_string(dir.path().join("hotseat.xml.10000")).unwrap();
    assert_eq!(archived, CUSTOM_HOTSEAT);

    deploy_defaults(dir.path()).unwrap();
    assert!(dir.path().join("hotseat.xml.10001").exists());
    assert!(!dir.path().join("hotseat.xml.10002").exists());
    // first archive of workspace.xml takes the first free suffix
    assert!(dir.path().join("workspace.xml.10000").exists());
    assert!(!dir.path().join("workspace.xml.10001").exists());
}

#[test]
fn load_mixes_disk_documents_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("hotseat.xml"), CUSTOM_HOTSEAT).unwrap();

    let specs = GridSpecs::load(dir.path(), &LoadOptions::default()).unwrap();
    let grid = specs.resolve_grid(&phone_request()).unwrap();

    assert_eq!(
        grid.hotseat.width.hotseat(),
        Some(&HotseatPx { hotseat_qsb_space_px: 10, edge_padding_px: 11 })
    );
    assert_eq!(
        grid.hotseat.height.hotseat(),
        Some(&HotseatPx { hotseat_qsb_space_px: 12, edge_padding_px: 13 })
    );
    // workspace still comes from the embedded default
    assert_eq!(grid.workspace.width.value("cellSize"), Some(171));
}

#[test]
fn broken_document_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("folder.xml"), "<folderSpecs><specs maxAspectRatio=\"10\"></folderSpecs>").unwrap();

    let err = GridSpecs::load(dir.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Xml { .. })));
}

#[test]
fn wrong_root_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("workspace_cell.xml"), CUSTOM_HOTSEAT).unwrap();

    let err = GridSpecs::load(dir.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::MissingRoot { expected: "cellSpecs" })));
}

#[test]
fn density_scales_dp_values() {
    let specs = GridSpecs::embedded(&LoadOptions { density: 2.0 }).unwrap();
    let grid = specs.resolve_grid(&GridRequest::new(2.0, 2160, 4000, 5, 6)).unwrap();

    // edgePadding 22dp, hotseatQsbSpace 16dp
    assert_eq!(
        grid.hotseat.width.hotseat(),
        Some(&HotseatPx { hotseat_qsb_space_px: 32, edge_padding_px: 44 })
    );
    assert_eq!(grid.workspace.width.value("startPadding"), Some(116));
}
