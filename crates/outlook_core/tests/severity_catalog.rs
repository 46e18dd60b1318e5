use outlook_core::{CatalogError, SeverityCatalog, UNRANKED};

const ALTERNATE_SCHEME: &str = r#"{
    "levels": [
        { "label": "Level 2", "rank": 1, "fill_color": "red" },
        { "label": "Level 1", "rank": 2, "fill_color": "yellow" }
    ],
    "hazards": ["Hail"]
}"#;

#[test]
fn alternate_scheme_loads_from_json() {
    let catalog = SeverityCatalog::from_json_str(ALTERNATE_SCHEME).unwrap();
    assert_eq!(catalog.rank("Level 2"), 1);
    assert_eq!(catalog.rank("Level 1"), 2);
    assert_eq!(catalog.rank("High risk"), UNRANKED);
    assert!(catalog.is_ancillary("Hail"));
    assert_eq!(catalog.levels()[0].label, "Level 2");
}

#[test]
fn missing_colors_fall_back_to_defaults() {
    let catalog = SeverityCatalog::from_json_str(ALTERNATE_SCHEME).unwrap();
    let hazard = catalog.style_for("Hail");
    assert!(hazard.outline_only);
    assert_eq!(hazard.stroke_color, "black");
    assert_eq!(catalog.style_for("Unknown").fill_color, "gray");
}

#[test]
fn malformed_json_is_reported() {
    let err = SeverityCatalog::from_json_str("{ levels: ").unwrap_err();
    assert!(matches!(err, CatalogError::Malformed(_)));
}

#[test]
fn reserved_rank_is_rejected() {
    let err = SeverityCatalog::from_json_str(
        r#"{ "levels": [{ "label": "Zero", "rank": 0, "fill_color": "red" }] }"#,
    )
    .unwrap_err();
    assert_eq!(err, CatalogError::ReservedRank("Zero".to_string()));
}

#[test]
fn empty_scheme_is_rejected() {
    let err = SeverityCatalog::from_json_str(r#"{ "levels": [] }"#).unwrap_err();
    assert_eq!(err, CatalogError::NoLevels);
}

#[test]
fn default_styles_match_published_map() {
    let catalog = SeverityCatalog::default();
    assert_eq!(catalog.style_for("Low risk").fill_color, "#5aac91");
    assert_eq!(catalog.style_for("High risk").fill_color, "purple");
    assert_eq!(catalog.style_for("Slight risk").fill_opacity, 0.3);
    let hazard = catalog.style_for("Risk of large hail, flooding and tornado");
    assert_eq!(hazard.weight, 2);
    assert_eq!(hazard.fill_opacity, 0.0);
}
