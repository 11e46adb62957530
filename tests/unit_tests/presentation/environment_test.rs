use smart_mindmap::presentation::config::Environment;

#[test]
fn given_known_names_when_parsing_environment_then_maps_aliases() {
    assert_eq!(Environment::try_from("local"), Ok(Environment::Local));
    assert_eq!(Environment::try_from("Development"), Ok(Environment::Local));
    assert_eq!(Environment::try_from(" test "), Ok(Environment::Test));
    assert_eq!(Environment::try_from("PRODUCTION"), Ok(Environment::Prod));
}

#[test]
fn given_unknown_name_when_parsing_environment_then_fails() {
    let error = Environment::try_from("staging").unwrap_err();

    assert!(error.contains("staging"));
}

#[test]
fn given_environment_when_displayed_then_matches_settings_file_suffix() {
    assert_eq!(Environment::Prod.to_string(), "Prod");
    assert_eq!(Environment::default(), Environment::Local);
}
