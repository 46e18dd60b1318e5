use geo::{polygon, Area, BooleanOps, MultiPolygon, Polygon, Rect, Validation};
use outlook_core::{resolve_regions, Region, SeverityCatalog, AREA_EPSILON};

fn square(min_x: f64, min_y: f64, size: f64) -> Polygon<f64> {
    Rect::new((min_x, min_y), (min_x + size, min_y + size)).to_polygon()
}

fn outlook_regions() -> Vec<Region> {
    vec![
        Region::new("Low risk", square(-8.0, 50.0, 8.0)),
        Region::new("Risk of flooding", square(-4.0, 52.0, 3.0)),
        Region::new("Slight risk", square(-6.0, 51.0, 5.0)),
        Region::new("Enhanced risk", square(-5.0, 52.0, 2.0)),
        Region::new("Risk of large hail, flooding and tornado", square(-3.0, 53.0, 1.0)),
        Region::new("Moderate risk", square(-4.0, 53.0, 2.0)),
    ]
}

fn assert_severity_regions_disjoint(regions: &[Region], catalog: &SeverityCatalog) {
    let severity = regions
        .iter()
        .filter(|region| !catalog.is_ancillary(region.label.as_str()))
        .collect::<Vec<_>>();
    for (index, left) in severity.iter().enumerate() {
        for right in &severity[index + 1..] {
            let overlap = left.geometry.intersection(&right.geometry).unsigned_area();
            assert!(
                overlap <= AREA_EPSILON,
                "`{}` and `{}` overlap by {overlap}",
                left.label,
                right.label
            );
        }
    }
}

#[test]
fn partition_severity_regions_never_overlap() {
    let catalog = SeverityCatalog::default();
    let outcome = resolve_regions(
        "Convective Outlook 01082024 0000 - 01082024 2359",
        &outlook_regions(),
        &catalog,
    );
    assert_severity_regions_disjoint(outcome.partition.regions(), &catalog);
}

#[test]
fn severity_regions_are_ordered_most_severe_first() {
    let catalog = SeverityCatalog::default();
    let outcome = resolve_regions("t", &outlook_regions(), &catalog);
    assert_eq!(
        outcome.partition.labels(),
        vec![
            "Moderate risk",
            "Enhanced risk",
            "Slight risk",
            "Low risk",
            "Risk of flooding",
            "Risk of large hail, flooding and tornado",
        ]
    );
}

#[test]
fn ancillary_hazards_keep_their_geometry() {
    let catalog = SeverityCatalog::default();
    let input = outlook_regions();
    let outcome = resolve_regions("t", &input, &catalog);
    for hazard in input
        .iter()
        .filter(|region| catalog.is_ancillary(region.label.as_str()))
    {
        assert!(
            outcome.partition.regions().contains(hazard),
            "hazard `{}` missing or altered",
            hazard.label
        );
    }
}

#[test]
fn region_inside_higher_priority_region_is_absent() {
    let catalog = SeverityCatalog::default();
    let regions = vec![
        Region::new("High risk", square(0.0, 0.0, 10.0)),
        Region::new("Slight risk", square(2.0, 2.0, 3.0)),
        Region::new("Low risk", square(8.0, 8.0, 4.0)),
    ];
    let outcome = resolve_regions("t", &regions, &catalog);
    assert_eq!(outcome.partition.labels(), vec!["High risk", "Low risk"]);
    let low = &outcome.partition.regions()[1];
    assert!((low.geometry.unsigned_area() - 12.0).abs() < 1e-9);
}

#[test]
fn resolving_a_partition_again_is_idempotent() {
    let catalog = SeverityCatalog::default();
    let regions = vec![
        Region::new("Slight risk", square(1.0, 0.0, 2.0)),
        Region::new("High risk", square(0.0, 0.0, 2.0)),
        Region::new("Risk of tornado", square(0.0, 0.0, 3.0)),
    ];
    let first = resolve_regions("t", &regions, &catalog);
    let second = resolve_regions("t", first.partition.regions(), &catalog);
    assert_eq!(second.partition, first.partition);
    assert!(second.dropped.is_empty());
}

#[test]
fn multi_part_regions_are_clipped_per_part() {
    let catalog = SeverityCatalog::default();
    let two_parts = MultiPolygon::new(vec![square(0.0, 0.0, 2.0), square(5.0, 0.0, 2.0)]);
    let regions = vec![
        Region::new("Enhanced risk", two_parts),
        Region::new("Moderate risk", square(5.0, 0.0, 2.0)),
    ];
    let outcome = resolve_regions("t", &regions, &catalog);
    let enhanced = &outcome.partition.regions()[1];
    assert_eq!(enhanced.label, "Enhanced risk");
    assert!((enhanced.geometry.unsigned_area() - 4.0).abs() < 1e-9);
}

#[test]
fn styled_partition_keeps_draw_order() {
    let catalog = SeverityCatalog::default();
    let outcome = resolve_regions("t", &outlook_regions(), &catalog);
    let styled = outcome.partition.styled(&catalog);
    assert_eq!(styled.len(), outcome.partition.len());
    let first_outline = styled
        .iter()
        .position(|layer| layer.style.outline_only)
        .expect("hazard layer present");
    assert!(styled[first_outline..]
        .iter()
        .all(|layer| layer.style.outline_only));
}

#[test]
fn self_intersecting_region_is_repaired_and_kept() {
    let catalog = SeverityCatalog::default();
    let bow_tie: Polygon<f64> =
        polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 2.0), (x: 2.0, y: 0.0), (x: 0.0, y: 2.0)];
    let regions = vec![
        Region::new("Low risk", bow_tie),
        Region::new("High risk", square(1.5, 0.5, 1.0)),
    ];
    let outcome = resolve_regions("t", &regions, &catalog);

    assert!(outcome.dropped.is_empty());
    assert_eq!(outcome.partition.labels(), vec!["High risk", "Low risk"]);
    let low = &outcome.partition.regions()[1];
    assert!(low.geometry.is_valid());
    assert!((low.geometry.unsigned_area() - 1.5).abs() < 1e-9);
    assert_severity_regions_disjoint(outcome.partition.regions(), &catalog);
}

#[test]
fn overlapping_unranked_labels_are_resolved_in_input_order() {
    let catalog = SeverityCatalog::default();
    let regions = vec![
        Region::new("General thunder", square(0.0, 0.0, 2.0)),
        Region::new("Marginal", square(1.0, 0.0, 2.0)),
        Region::new("General thunder", square(0.0, 1.0, 2.0)),
    ];
    let outcome = resolve_regions("t", &regions, &catalog);
    let partition = outcome.partition.regions();

    assert_eq!(partition.len(), 3);
    assert_eq!(partition[0], regions[0]);
    assert_eq!(partition[1].label, "Marginal");
    assert!((partition[1].geometry.unsigned_area() - 2.0).abs() < 1e-9);
    assert_eq!(partition[2].label, "General thunder");
    let marginal_overlap = partition[1]
        .geometry
        .intersection(&partition[2].geometry)
        .unsigned_area();
    assert!(marginal_overlap <= AREA_EPSILON);
}
