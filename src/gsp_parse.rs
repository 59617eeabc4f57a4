// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

//! Spec Document Parser - XML Loading Module
//!
//! This module contains:
//! - Static registry mapping each spec kind to its tags and constructor
//! - Parse-time structures (ParsedSpecs, ParsedGroup, ParsedEntry)
//! - XML parsing implementation using quick_xml
//! - Conversion from parse-time structures into a validated SpecTable
//!
//! Tags and attributes are matched by local name, so a namespace prefix
//! such as `launcher:fixedSize` is accepted.

use std::collections::HashMap;

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::gsb_breakpoint::{field, Breakpoint, CellSizes, GridSizes, HotseatSizes, SpecSizes};
use crate::gsc_core::{parse_dimension, parse_flag, parse_float, round_px, Axis, SpecKind};
use crate::gse_error::{ConfigError, Result};
use crate::gst_table::{AspectRatioGroup, SpecTable};
use crate::gsv_value::SizeSpec;

const GROUP_TAG: &str = "specs";

// ============================================================================
// SECTION 1: Load options
// ============================================================================

/// Host-supplied settings that affect how attribute values are read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    /// Pixels per `dp`
    pub density: f32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions { density: 1.0 }
    }
}

// ============================================================================
// SECTION 2: Kind registry
// ============================================================================

type BuildFn = fn(&mut FieldBag) -> std::result::Result<SpecSizes, ConfigError>;

/// Document shape and constructor for one spec kind
pub struct KindSchema {
    pub kind: SpecKind,
    pub root_tag: &'static str,
    pub entry_tag: &'static str,
    pub fields: &'static [&'static str],
    build: BuildFn,
}

const GRID_FIELDS: &[&str] = &[field::START_PADDING, field::END_PADDING, field::GUTTER, field::CELL_SIZE];
const HOTSEAT_FIELDS: &[&str] = &[field::HOTSEAT_QSB_SPACE, field::EDGE_PADDING];
const CELL_FIELDS: &[&str] = &[field::ICON_SIZE, field::ICON_TEXT_SIZE, field::ICON_DRAWABLE_PADDING];

static REGISTRY: [KindSchema; 5] = [
    KindSchema {
        kind: SpecKind::Workspace,
        root_tag: "workspaceSpecs",
        entry_tag: "workspaceSpec",
        fields: GRID_FIELDS,
        build: |bag| Ok(SpecSizes::Workspace(bag.grid()?)),
    },
    KindSchema {
        kind: SpecKind::AllApps,
        root_tag: "allAppsSpecs",
        entry_tag: "allAppsSpec",
        fields: GRID_FIELDS,
        build: |bag| Ok(SpecSizes::AllApps(bag.grid()?)),
    },
    KindSchema {
        kind: SpecKind::Folder,
        root_tag: "folderSpecs",
        entry_tag: "folderSpec",
        fields: GRID_FIELDS,
        build: |bag| Ok(SpecSizes::Folder(bag.grid()?)),
    },
    KindSchema {
        kind: SpecKind::Hotseat,
        root_tag: "hotseatSpecs",
        entry_tag: "hotseatSpec",
        fields: HOTSEAT_FIELDS,
        build: |bag| {
            Ok(SpecSizes::Hotseat(HotseatSizes {
                hotseat_qsb_space: bag.take(field::HOTSEAT_QSB_SPACE)?,
                edge_padding: bag.take(field::EDGE_PADDING)?,
            }))
        },
    },
    KindSchema {
        kind: SpecKind::Cell,
        root_tag: "cellSpecs",
        entry_tag: "cellSpec",
        fields: CELL_FIELDS,
        build: |bag| {
            Ok(SpecSizes::Cell(CellSizes {
                icon_size: bag.take(field::ICON_SIZE)?,
                icon_text_size: bag.take(field::ICON_TEXT_SIZE)?,
                icon_drawable_padding: bag.take(field::ICON_DRAWABLE_PADDING)?,
            }))
        },
    },
];

pub fn schema(kind: SpecKind) -> &'static KindSchema {
    // REGISTRY covers every SpecKind in declaration order
    &REGISTRY[kind as usize]
}

/// Named SizeSpecs collected from one entry, consumed by a BuildFn
struct FieldBag {
    kind: SpecKind,
    max_available_size: i32,
    fields: HashMap<&'static str, SizeSpec>,
}

impl FieldBag {
    fn take(&mut self, name: &'static str) -> std::result::Result<SizeSpec, ConfigError> {
        self.fields.remove(name).ok_or(ConfigError::MissingField {
            kind: self.kind,
            field: name,
            max_available_size: self.max_available_size,
        })
    }

    fn grid(&mut self) -> std::result::Result<GridSizes, ConfigError> {
        Ok(GridSizes {
            start_padding: self.take(field::START_PADDING)?,
            end_padding: self.take(field::END_PADDING)?,
            gutter: self.take(field::GUTTER)?,
            cell_size: self.take(field::CELL_SIZE)?,
        })
    }
}

// ============================================================================
// SECTION 3: Parse-time structures (discarded after table construction)
// ============================================================================

pub(crate) struct ParsedSpecs {
    pub(crate) kind: SpecKind,
    pub(crate) groups: Vec<ParsedGroup>,
}

pub(crate) struct ParsedGroup {
    pub(crate) max_aspect_ratio: f32,
    pub(crate) entries: Vec<ParsedEntry>,
}

pub(crate) struct ParsedEntry {
    pub(crate) max_available_size: i32,
    pub(crate) axis: Axis,
    pub(crate) fields: HashMap<&'static str, SizeSpec>,
}

// ============================================================================
// SECTION 4: XML parsing (builds parse-time structures)
// ============================================================================

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_string()
}

fn xml_error(reader: &Reader<&[u8]>, e: impl std::fmt::Display) -> ConfigError {
    ConfigError::Xml { position: reader.buffer_position(), message: e.to_string() }
}

/// (local name, unescaped value) pairs of an element
fn attributes(e: &BytesStart) -> std::result::Result<Vec<(String, String)>, ConfigError> {
    let element = local_name(e);
    let mut attrs = Vec::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| ConfigError::InvalidAttribute {
            element: element.clone(),
            attribute: String::new(),
            message: err.to_string(),
        })?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| ConfigError::InvalidAttribute {
                element: element.clone(),
                attribute: key.clone(),
                message: err.to_string(),
            })?
            .to_string();
        attrs.push((key, value));
    }

    Ok(attrs)
}

fn invalid(element: &str, attribute: &str, message: String) -> ConfigError {
    ConfigError::InvalidAttribute {
        element: element.to_string(),
        attribute: attribute.to_string(),
        message,
    }
}

impl ParsedSpecs {
    pub(crate) fn from_xml(kind: SpecKind, xml: &str, options: &LoadOptions) -> std::result::Result<Self, ConfigError> {
        let schema = schema(kind);
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut groups = Vec::new();
        let mut buf = Vec::new();
        let mut in_root = false;
        let mut seen_root = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = local_name(e);
                    if !in_root {
                        if name == schema.root_tag {
                            in_root = true;
                            seen_root = true;
                        }
                    } else if name == GROUP_TAG {
                        groups.push(Self::parse_group(&mut reader, e, schema, options)?);
                    } else {
                        return Err(ConfigError::UnrecognizedTag { tag: name, parent: schema.root_tag.to_string() });
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    let name = local_name(e);
                    if !in_root {
                        if name == schema.root_tag {
                            seen_root = true;
                        }
                    } else if name == GROUP_TAG {
                        // Group with no entries; rejected as incomplete at table construction
                        groups.push(ParsedGroup {
                            max_aspect_ratio: Self::parse_group_attrs(e)?,
                            entries: Vec::new(),
                        });
                    } else {
                        return Err(ConfigError::UnrecognizedTag { tag: name, parent: schema.root_tag.to_string() });
                    }
                }
                Ok(Event::End(ref e)) if in_root && e.local_name().as_ref() == schema.root_tag.as_bytes() => {
                    in_root = false;
                }
                Ok(Event::Eof) => {
                    if in_root {
                        return Err(ConfigError::UnexpectedEof { element: schema.root_tag.to_string() });
                    }
                    break;
                }
                Err(e) => return Err(xml_error(&reader, e)),
                _ => {}
            }
            buf.clear();
        }

        if !seen_root {
            return Err(ConfigError::MissingRoot { expected: schema.root_tag });
        }

        debug!(target: "parse", "{}: parsed {} groups, {} entries",
            schema.root_tag,
            groups.len(),
            groups.iter().map(|g| g.entries.len()).sum::<usize>());

        Ok(ParsedSpecs { kind, groups })
    }

    fn parse_group_attrs(e: &BytesStart) -> std::result::Result<f32, ConfigError> {
        let mut max_aspect_ratio = None;

        for (key, value) in attributes(e)? {
            if key == "maxAspectRatio" {
                max_aspect_ratio = Some(parse_float(&value).map_err(|m| invalid(GROUP_TAG, &key, m))?);
            }
        }

        max_aspect_ratio.ok_or(ConfigError::MissingAttribute {
            element: GROUP_TAG.to_string(),
            attribute: "maxAspectRatio",
        })
    }

    fn parse_group(
        reader: &mut Reader<&[u8]>,
        start: &BytesStart,
        schema: &'static KindSchema,
        options: &LoadOptions,
    ) -> std::result::Result<ParsedGroup, ConfigError> {
        let max_aspect_ratio = Self::parse_group_attrs(start)?;
        let mut entries = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if local_name(e) == schema.entry_tag => {
                    entries.push(Self::parse_entry(reader, e, schema, options, true)?);
                }
                Ok(Event::Empty(ref e)) if local_name(e) == schema.entry_tag => {
                    entries.push(Self::parse_entry(reader, e, schema, options, false)?);
                }
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    return Err(ConfigError::UnrecognizedTag { tag: local_name(e), parent: GROUP_TAG.to_string() });
                }
                Ok(Event::End(ref e)) if e.local_name().as_ref() == GROUP_TAG.as_bytes() => break,
                Ok(Event::Eof) => return Err(ConfigError::UnexpectedEof { element: GROUP_TAG.to_string() }),
                Err(e) => return Err(xml_error(reader, e)),
                _ => {}
            }
            buf.clear();
        }

        debug!(target: "parse", "{}: group maxAspectRatio={} with {} entries",
            schema.root_tag, max_aspect_ratio, entries.len());

        Ok(ParsedGroup { max_aspect_ratio, entries })
    }

    fn parse_entry(
        reader: &mut Reader<&[u8]>,
        start: &BytesStart,
        schema: &'static KindSchema,
        options: &LoadOptions,
        has_children: bool,
    ) -> std::result::Result<ParsedEntry, ConfigError> {
        let mut max_available_size = None;
        let mut axis = Axis::Height; // default

        for (key, value) in attributes(start)? {
            match key.as_str() {
                "maxAvailableSize" => {
                    let px = parse_dimension(&value, options.density)
                        .map_err(|m| invalid(schema.entry_tag, &key, m))?;
                    max_available_size = Some(round_px(px));
                }
                "dimensionType" => {
                    axis = Axis::parse(&value)
                        .ok_or_else(|| invalid(schema.entry_tag, &key, format!("invalid dimensionType: {}", value)))?;
                }
                _ => {}
            }
        }

        let max_available_size = max_available_size.ok_or(ConfigError::MissingAttribute {
            element: schema.entry_tag.to_string(),
            attribute: "maxAvailableSize",
        })?;

        let mut fields = HashMap::new();
        if has_children {
            let mut buf = Vec::new();
            loop {
                match reader.read_event_into(&mut buf) {
                    Ok(Event::Start(ref e)) => {
                        let (name, size) = Self::parse_field(e, schema, options)?;
                        fields.insert(name, size);
                        // Field elements carry no content; skip whatever is inside
                        let tag = e.name().as_ref().to_vec();
                        let mut skip = Vec::new();
                        reader.read_to_end_into(QName(&tag), &mut skip).map_err(|err| xml_error(reader, err))?;
                    }
                    Ok(Event::Empty(ref e)) => {
                        let (name, size) = Self::parse_field(e, schema, options)?;
                        fields.insert(name, size);
                    }
                    Ok(Event::End(ref e)) if e.local_name().as_ref() == schema.entry_tag.as_bytes() => break,
                    Ok(Event::Eof) => return Err(ConfigError::UnexpectedEof { element: schema.entry_tag.to_string() }),
                    Err(e) => return Err(xml_error(reader, e)),
                    _ => {}
                }
                buf.clear();
            }
        }

        Ok(ParsedEntry { max_available_size, axis, fields })
    }

    fn parse_field(
        e: &BytesStart,
        schema: &'static KindSchema,
        options: &LoadOptions,
    ) -> std::result::Result<(&'static str, SizeSpec), ConfigError> {
        let tag = local_name(e);
        let name = schema
            .fields
            .iter()
            .copied()
            .find(|f| *f == tag)
            .ok_or_else(|| ConfigError::UnrecognizedTag { tag: tag.clone(), parent: schema.entry_tag.to_string() })?;

        let mut fixed_size = 0.0;
        let mut of_available_space = 0.0;
        let mut of_remainder_space = 0.0;
        let mut match_workspace = false;
        let mut max_size = None;

        for (key, value) in attributes(e)? {
            match key.as_str() {
                "fixedSize" => {
                    fixed_size = parse_dimension(&value, options.density).map_err(|m| invalid(&tag, &key, m))?;
                }
                "ofAvailableSpace" => {
                    of_available_space = parse_float(&value).map_err(|m| invalid(&tag, &key, m))?;
                }
                "ofRemainderSpace" => {
                    of_remainder_space = parse_float(&value).map_err(|m| invalid(&tag, &key, m))?;
                }
                "matchWorkspace" => {
                    match_workspace = parse_flag(&value).map_err(|m| invalid(&tag, &key, m))?;
                }
                "maxSize" => {
                    max_size = Some(parse_dimension(&value, options.density).map_err(|m| invalid(&tag, &key, m))?);
                }
                _ => {}
            }
        }

        Ok((
            name,
            SizeSpec::from_parts(fixed_size, of_available_space, of_remainder_space, match_workspace, max_size),
        ))
    }

    // ========================================================================
    // Runtime construction (parse-time -> SpecTable)
    // ========================================================================

    pub(crate) fn into_table(self) -> Result<SpecTable> {
        let schema = schema(self.kind);
        let mut groups = Vec::with_capacity(self.groups.len());

        for group in self.groups {
            let mut breakpoints = Vec::with_capacity(group.entries.len());
            for entry in group.entries {
                let mut bag = FieldBag {
                    kind: self.kind,
                    max_available_size: entry.max_available_size,
                    fields: entry.fields,
                };
                let sizes = (schema.build)(&mut bag)?;
                breakpoints.push(Breakpoint::new(entry.max_available_size, entry.axis, sizes)?);
            }
            groups.push(AspectRatioGroup::new(self.kind, group.max_aspect_ratio, breakpoints)?);
        }

        SpecTable::new(self.kind, groups)
    }
}

/// Parse and validate a spec document of `kind` into a SpecTable
pub fn parse_table(kind: SpecKind, xml: &str, options: &LoadOptions) -> Result<SpecTable> {
    ParsedSpecs::from_xml(kind, xml, options)?.into_table()
}
