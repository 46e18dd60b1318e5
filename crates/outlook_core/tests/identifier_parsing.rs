use chrono::NaiveDate;
use outlook_core::{parse_identifier, IdentifierParseError};

#[test]
fn no_update_marker_is_version_one() {
    let validity = parse_identifier("Outlook 01082024 0000 - 01082024 2359.kml").unwrap();
    assert_eq!(validity.version, 1);
}

#[test]
fn bare_update_marker_is_version_two() {
    let validity = parse_identifier("Outlook UPDATE 01082024 0000 - 01082024 2359.kml").unwrap();
    assert_eq!(validity.version, 2);
}

#[test]
fn numbered_update_marker_is_revision_plus_one() {
    let validity = parse_identifier("Outlook UPDATED3 01082024 0000 - 01082024 2359.kml").unwrap();
    assert_eq!(validity.version, 4);
}

#[test]
fn window_is_parsed_day_month_year() {
    let validity =
        parse_identifier("Convective Outlook UPDATED2 01082024 0600 - 02082024 0559.kml").unwrap();
    let first = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
    let second = NaiveDate::from_ymd_opt(2024, 8, 2).unwrap();
    assert_eq!(validity.start, first.and_hms_opt(6, 0, 0).unwrap());
    assert_eq!(validity.end, second.and_hms_opt(5, 59, 0).unwrap());
    assert_eq!(validity.version, 3);
}

#[test]
fn missing_date_pattern_is_parse_failure() {
    let err = parse_identifier("Convective Outlook UPDATED2.kml").unwrap_err();
    assert!(matches!(err, IdentifierParseError::NoMatch(_)));
}

#[test]
fn unrelated_file_name_is_parse_failure() {
    let err = parse_identifier("2024 convective outlook FINALISED 2.png").unwrap_err();
    assert!(matches!(err, IdentifierParseError::NoMatch(_)));
    assert!(err.to_string().contains("does not match"));
}
