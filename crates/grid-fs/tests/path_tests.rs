use grid_fs::NormalizedPath;
use rstest::rstest;

#[rstest]
#[case("grid/originals", "grid/originals")]
#[case(r"grid\originals", "grid/originals")]
#[case(r"C:\Steam/userdata\1", "C:/Steam/userdata/1")]
fn normalizes_separators(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).as_str(), expected);
}

#[test]
fn windows_steam_path_joins_destination_filename() {
    let path = NormalizedPath::new(r"C:\Program Files (x86)\Steam\userdata\12345678\config\grid");
    assert_eq!(
        path.join("1466640p.png").as_str(),
        "C:/Program Files (x86)/Steam/userdata/12345678/config/grid/1466640p.png"
    );
}

#[test]
fn join_does_not_double_trailing_slash() {
    let base = NormalizedPath::new("grid/");
    assert_eq!(base.join("1659040.jpg").as_str(), "grid/1659040.jpg");
}

#[test]
fn parent_and_file_name() {
    let path = NormalizedPath::new("grid/originals/1659040_hero.jpg");
    assert_eq!(path.parent().unwrap().as_str(), "grid/originals");
    assert_eq!(path.file_name(), Some("1659040_hero.jpg"));
}

#[test]
fn stem_and_extension_preserve_case() {
    let path = NormalizedPath::new("grid/Hitman 3_hero_1659040.JPG");
    assert_eq!(path.stem(), Some("Hitman 3_hero_1659040"));
    assert_eq!(path.extension(), Some("JPG"));
}

#[test]
fn file_without_extension() {
    let path = NormalizedPath::new("grid/1659040");
    assert_eq!(path.stem(), Some("1659040"));
    assert_eq!(path.extension(), None);
}

#[test]
fn unc_share_is_network_path() {
    assert!(NormalizedPath::new(r"\\nas\steam\userdata").is_network_path());
    assert!(!NormalizedPath::new("/home/user/.steam/userdata").is_network_path());
}
