use super::*;

#[test]
fn parses_search_with_negative_longitude() {
    let cli = Cli::try_parse_from(["medfind-cli", "search", "--lat", "40.0", "--lon", "-75.0"])
        .expect("expected valid cli args");

    match cli.command {
        Commands::Search {
            lat,
            lon,
            radius,
            kind,
            source,
            dataset,
        } => {
            assert!((lat - 40.0).abs() < f64::EPSILON);
            assert!((lon + 75.0).abs() < f64::EPSILON);
            assert!(radius.is_none());
            assert_eq!(kind, AmenityKind::Pharmacy);
            assert!(source.is_none());
            assert!(dataset.is_none());
        }
        other @ Commands::Geocode { .. } => panic!("expected search, got {other:?}"),
    }
}

#[test]
fn parses_search_overrides() {
    let cli = Cli::try_parse_from([
        "medfind-cli",
        "search",
        "--lat",
        "12.97",
        "--lon",
        "77.59",
        "--radius",
        "5",
        "--kind",
        "Hospital",
        "--source",
        "overpass",
        "--dataset",
        "other.csv",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Search {
            radius: Some(r),
            kind: AmenityKind::Hospital,
            source: Some(SourceArg::Overpass),
            dataset: Some(_),
            ..
        } if (r - 5.0).abs() < f64::EPSILON
    ));
}

#[test]
fn rejects_unknown_kind() {
    let result = Cli::try_parse_from([
        "medfind-cli",
        "search",
        "--lat",
        "1",
        "--lon",
        "1",
        "--kind",
        "dentist",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_geocode_place() {
    let cli = Cli::try_parse_from(["medfind-cli", "geocode", "Connaught Place"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Geocode { ref place } if place == "Connaught Place"
    ));
}

#[test]
fn search_requires_coordinates() {
    assert!(Cli::try_parse_from(["medfind-cli", "search", "--lat", "1"]).is_err());
}

#[test]
fn source_arg_maps_to_source_kind() {
    assert_eq!(SourceKind::from(SourceArg::Table), SourceKind::Table);
    assert_eq!(SourceKind::from(SourceArg::Overpass), SourceKind::Overpass);
}

#[test]
fn help_is_handled_by_the_parser() {
    let err = Cli::try_parse_from(["medfind-cli", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}
