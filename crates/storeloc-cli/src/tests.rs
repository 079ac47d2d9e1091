use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["storeloc"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn explicit_places_path_is_used() {
    let cli = Cli::try_parse_from(["storeloc", "--places", "dc.geojson", "themes"])
        .expect("expected valid cli args");
    assert_eq!(cli.places, PathBuf::from("dc.geojson"));
}

#[test]
fn parses_themes_command_with_file() {
    let cli = Cli::try_parse_from(["storeloc", "themes", "--themes", "t.yaml"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Themes)));
    assert_eq!(cli.themes, Some(PathBuf::from("t.yaml")));
}

#[test]
fn parses_cards_with_negative_longitude() {
    let cli = Cli::try_parse_from(["storeloc", "cards", "--origin", "-77.034,38.9"])
        .expect("expected valid cli args");
    match cli.command {
        Some(Commands::Cards {
            origin,
            theme,
            select,
            ..
        }) => {
            assert_eq!(origin, Coordinate::new(-77.034, 38.9));
            assert_eq!(theme, "blue");
            assert_eq!(select, 0);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn rejects_out_of_range_origin() {
    assert!(Cli::try_parse_from(["storeloc", "cards", "--origin", "200,10"]).is_err());
}

#[test]
fn parses_route_with_id_and_profile() {
    let cli = Cli::try_parse_from([
        "storeloc",
        "route",
        "--origin",
        "-77.03,38.9",
        "--id",
        "store-7",
        "--profile",
        "mapbox/walking",
        "--fit",
        "always",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Route {
            id: Some(ref id),
            select: None,
            profile: Some(TravelProfile::Walking),
            fit: FitArg::Always,
            ..
        }) if id.as_str() == "store-7"
    ));
}

#[test]
fn route_select_and_id_conflict() {
    let result = Cli::try_parse_from([
        "storeloc", "route", "--origin", "0,0", "--select", "1", "--id", "a",
    ]);
    assert!(result.is_err());
}

#[test]
fn fit_arg_maps_to_policy() {
    assert_eq!(FitPolicy::from(FitArg::SkipTaps), FitPolicy::SkipDirectTaps);
    assert_eq!(FitPolicy::from(FitArg::Never), FitPolicy::Never);
}

#[test]
fn resolves_preset_theme_case_insensitively() {
    let theme = themes::resolve_theme("Purple", None).expect("preset");
    assert_eq!(theme.primary_color.as_deref(), Some("#A35BCD"));
    assert!(themes::resolve_theme("mauve", None).is_err());
}
