//! Map document and connection file decoding end to end.

mod common;

use arcdoc::doc::{ConnectionFile, DocOptions, MapDocument};
use arcdoc::graph::AttrValue;
use arcdoc::objects::layers::feature::FEATURE_LAYER;
use arcdoc::objects::map::MAP_FRAME;
use arcdoc::objects::page_layout::PAGE_LAYOUT;
use arcdoc::objects::property_set::PROPERTY_SET;
use arcdoc::registry::ObjectRegistry;
use arcdoc::util::{ClassId, Error};
use common::{build_container, feature_layer_payload, inline_slot, push_string};

fn registry() -> ObjectRegistry {
    ObjectRegistry::with_known_types()
}

/// Map frame payload at version 1: name, units, reference scale, layers,
/// no extensions.
fn map_payload(name: &str, layers: &[&str]) -> Vec<u8> {
    let mut p = Vec::new();
    push_string(&mut p, name);
    p.extend_from_slice(&2i32.to_le_bytes());
    p.extend_from_slice(&24000.0f64.to_le_bytes());
    p.extend_from_slice(&(layers.len() as u32).to_le_bytes());
    for layer in layers {
        inline_slot(&mut p, &FEATURE_LAYER, 3, &feature_layer_payload(layer));
    }
    p.extend_from_slice(&0u32.to_le_bytes());
    p
}

/// "Maps" stream: u32 count, then length-prefixed map records.
fn maps_stream(records: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(records.len() as u32).to_le_bytes());
    for record in records {
        out.extend_from_slice(&(record.len() as u32).to_le_bytes());
        out.extend_from_slice(record);
    }
    out
}

fn map_record(name: &str, layers: &[&str]) -> Vec<u8> {
    let mut record = Vec::new();
    inline_slot(&mut record, &MAP_FRAME, 1, &map_payload(name, layers));
    record
}

#[test]
fn test_map_document_all_streams() {
    let maps = maps_stream(&[map_record("Main Map", &["Roads", "Rivers"])]);

    let mut metadata = Vec::new();
    let mut props = Vec::new();
    props.extend_from_slice(&1u32.to_le_bytes());
    push_string(&mut props, "author");
    props.push(3); // string variant
    push_string(&mut props, "gis-team");
    inline_slot(&mut metadata, &PROPERTY_SET, 1, &props);

    let mut templates = Vec::new();
    templates.extend_from_slice(&2u32.to_le_bytes());
    push_string(&mut templates, "C:\\Templates\\letter.mxt");
    push_string(&mut templates, "C:\\Templates\\a4.mxt");

    let mut layout = Vec::new();
    let mut layout_payload = Vec::new();
    layout_payload.extend_from_slice(&8.5f64.to_le_bytes());
    layout_payload.extend_from_slice(&11.0f64.to_le_bytes());
    layout_payload.extend_from_slice(&1i32.to_le_bytes());
    layout_payload.extend_from_slice(&0u32.to_le_bytes()); // no elements
    inline_slot(&mut layout, &PAGE_LAYOUT, 1, &layout_payload);

    let data = build_container(&[
        ("Version", &[8, 0, 3, 0]),
        ("Maps", &maps),
        ("Metadata", &metadata),
        ("Templates", &templates),
        ("PageLayout", &layout),
    ]);
    let doc = MapDocument::parse(&data, &registry(), DocOptions::default()).unwrap();

    assert_eq!(doc.format_version, Some((8, 3)));
    assert_eq!(doc.maps.len(), 1);
    assert_eq!(doc.skipped_maps, 0);
    assert_eq!(doc.templates.len(), 2);

    let maps_json = doc.project_maps();
    assert_eq!(maps_json[0]["name"], "Main Map");
    assert_eq!(maps_json[0]["children"][1]["name"], "Rivers");

    let metadata = doc.metadata.as_ref().unwrap().project();
    assert_eq!(metadata["properties"][0][1], "gis-team");

    let layout = doc.page_layout.as_ref().unwrap().project();
    assert_eq!(layout["width"], 8.5);
}

#[test]
fn test_undecodable_map_record_is_skipped() {
    // Second record carries a class this build does not know; its length
    // prefix lets the reader skip it and still decode the third map.
    let unknown = ClassId::from_fields(0xCCCC0001, 0x5555, 0x6666, [7; 8]);
    let mut bogus = vec![0x01]; // inline marker
    bogus.extend_from_slice(unknown.as_bytes());
    bogus.extend_from_slice(&[0u8; 20]);

    let maps = maps_stream(&[
        map_record("First", &[]),
        bogus,
        map_record("Third", &[]),
    ]);
    let data = build_container(&[("Maps", &maps)]);
    let doc = MapDocument::parse(&data, &registry(), DocOptions::default()).unwrap();

    assert_eq!(doc.maps.len(), 2);
    assert_eq!(doc.skipped_maps, 1);
    let maps_json = doc.project_maps();
    assert_eq!(maps_json[1]["name"], "Third");
}

#[test]
fn test_missing_maps_stream() {
    let data = build_container(&[("Version", &[8, 0, 0, 0])]);
    let err = MapDocument::parse(&data, &registry(), DocOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MissingStream("Maps")));
}

#[test]
fn test_connection_file_properties() {
    let mut props = Vec::new();
    props.extend_from_slice(&3u32.to_le_bytes());
    push_string(&mut props, "SERVER");
    props.push(3);
    push_string(&mut props, "gisprod01");
    push_string(&mut props, "INSTANCE");
    props.push(1); // i32 variant
    props.extend_from_slice(&5151i32.to_le_bytes());
    push_string(&mut props, "VERSION");
    props.push(3);
    push_string(&mut props, "SDE.DEFAULT");

    let mut stream = Vec::new();
    inline_slot(&mut stream, &PROPERTY_SET, 1, &props);

    let data = build_container(&[("SDEConnProperties", &stream)]);
    let conn = ConnectionFile::parse(&data, &registry(), DocOptions::default()).unwrap();

    assert!(matches!(
        conn.property("SERVER"),
        Some(AttrValue::Str(s)) if s == "gisprod01"
    ));
    assert!(matches!(conn.property("INSTANCE"), Some(AttrValue::Int(5151))));
    assert!(conn.property("PASSWORD").is_none());
}

#[test]
fn test_connection_file_requires_properties_stream() {
    let data = build_container(&[("Layer", b"not a connection file")]);
    let err = ConnectionFile::parse(&data, &registry(), DocOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MissingStream("SDEConnProperties")));
}
