mod common;

use common::{load, load_from, sample_fixtures, schema, write_fixtures};
use docseed::instance::ID_FIELD;
use docseed::{DocumentStore, MemoryStore};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_load_states() {
    let fixtures = sample_fixtures();
    let schema = schema();
    let mut store = MemoryStore::new();

    let states = load(&fixtures, &schema, &mut store, "State").unwrap();
    assert_eq!(states.keys().collect::<Vec<_>>(), vec!["new_york", "louisiana"]);
    assert_eq!(states["new_york"].str_value("name"), Some("New York"));
    assert_eq!(store.count("State"), 2);
    assert_eq!(store.count("GeoUriScheme"), 4);
}

#[test]
fn test_load_cities_with_relations() {
    let fixtures = sample_fixtures();
    let schema = schema();
    let mut store = MemoryStore::new();

    let cities = load(&fixtures, &schema, &mut store, "City").unwrap();
    let new_york_city = &cities["new_york_city"];

    let state = new_york_city.reference("state").unwrap();
    assert_eq!(state.class(), "State");
    assert_eq!(state.str_value("name"), Some("New York"));

    let scheme = new_york_city.reference("geo_uri_scheme").unwrap();
    assert_eq!(scheme.class(), "GeoUriScheme");
    assert_eq!(scheme.value("x"), Some(&json!(-74.0059)));

    let population = new_york_city.embedded("population").unwrap();
    assert_eq!(population.class(), "Population");
    assert_eq!(population.value("total"), Some(&json!(9_000_000)));
    assert_eq!(population.value("rank"), Some(&json!(1)));
    assert_eq!(population.str_value("density"), Some("10,756.0/km2"));
    assert_eq!(population.value("msa"), Some(&json!(20_092_883)));
    assert_eq!(population.value("csa"), Some(&json!(23_632_722)));
    assert_eq!(population.str_value("source"), Some("U.S. Census (2014)"));

    let people = new_york_city.embedded_list("people");
    assert_eq!(people.len(), 1);
    let christopher = &people[0];
    assert_eq!(christopher.str_value("first_name"), Some("Christopher"));
    assert_eq!(christopher.str_value("middle_name"), Some("George"));
    assert_eq!(christopher.str_value("born"), Some("1972-05-21"));
    assert_eq!(
        christopher.value("nick_names"),
        Some(&json!([
            "The Notorious B.I.G.",
            "B.I.G.",
            "Biggie Smalls",
            "Big Poppa",
            "Frank White",
            "King of New York"
        ]))
    );

    let terrytown = &cities["terrytown"];
    assert_eq!(
        terrytown.reference("state").and_then(|s| s.str_value("name")),
        Some("Louisiana")
    );
    assert!(terrytown.reference("geo_uri_scheme").is_some());
}

#[test]
fn test_embedded_documents_link_to_owner() {
    let fixtures = sample_fixtures();
    let schema = schema();
    let mut store = MemoryStore::new();

    let cities = load(&fixtures, &schema, &mut store, "City").unwrap();
    let city = &cities["new_york_city"];

    for owner in [
        city.embedded("population").and_then(|p| p.owner()),
        city.embedded_list("people")[0].owner(),
    ] {
        let owner = owner.unwrap();
        assert_eq!(owner.field, "geopolitical_division");
        assert_eq!(owner.class, "City");
        assert_eq!(owner.id, city.id());
    }
}

#[test]
fn test_persisted_document_shape() {
    let fixtures = sample_fixtures();
    let schema = schema();
    let mut store = MemoryStore::new();

    let cities = load(&fixtures, &schema, &mut store, "City").unwrap();
    let city = &cities["new_york_city"];
    let state = city.reference("state").unwrap();

    let document = store.document("City", &city.id().unwrap()).unwrap();
    assert_eq!(document[ID_FIELD], city.id().unwrap().to_value());
    assert_eq!(document["state_id"], state.id().unwrap().to_value());
    assert_eq!(
        document["population"][ID_FIELD],
        city.embedded("population").unwrap().id().unwrap().to_value()
    );
    assert_eq!(
        document["people"][0][ID_FIELD],
        city.embedded_list("people")[0].id().unwrap().to_value()
    );
    assert_eq!(document["custom_attributes"], json!(["The Big Apple", "Gotham"]));
}

#[test]
fn test_reference_matches_independent_load() {
    let fixtures = sample_fixtures();
    let schema = schema();
    let mut store = MemoryStore::new();

    let cities = load(&fixtures, &schema, &mut store, "City").unwrap();
    let states = load(&fixtures, &schema, &mut store, "State").unwrap();

    for (city_key, state_key) in [("new_york_city", "new_york"), ("terrytown", "louisiana")] {
        let referenced = cities[city_key].reference("state").unwrap();
        assert_eq!(referenced.id(), states[state_key].id());
        assert_eq!(
            referenced.str_value("name"),
            states[state_key].str_value("name")
        );
    }
}

#[test]
fn test_geo_uri_scheme_coordinates() {
    let fixtures = sample_fixtures();
    let schema = schema();
    let mut store = MemoryStore::new();

    let schemes = load(&fixtures, &schema, &mut store, "GeoUriScheme").unwrap();
    let terrytown = &schemes["terrytown"];
    assert!(terrytown.id().is_some());
    assert_eq!(terrytown.value("x"), Some(&json!(-90.029444)));
    assert_eq!(terrytown.value("y"), Some(&json!(29.902222)));
    assert_eq!(terrytown.value("z"), Some(&json!(3.9624)));
}

#[test]
fn test_write_transform_applies() {
    let fixtures = sample_fixtures();
    let schema = schema();
    let mut store = MemoryStore::new();

    let users = load(&fixtures, &schema, &mut store, "User").unwrap();
    let user = &users["example_user"];
    assert_eq!(user.str_value("user_name"), Some("example"));

    let password = user.str_value("password").unwrap();
    assert_ne!(password, "test_password");
    assert_eq!(password.len(), 64);
}

#[test]
fn test_embedded_person_with_null_field() {
    let dir = write_fixtures(&[(
        "cities.yml",
        r#"
springfield:
  name: Springfield
  people:
    - first_name: Abraham
      suffix: ~
"#,
    )]);
    let (result, store) = load_from(dir.path(), &schema(), "City");
    let cities = result.unwrap();

    let people = cities["springfield"].embedded_list("people");
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].str_value("first_name"), Some("Abraham"));
    assert_eq!(people[0].value("suffix"), Some(&serde_json::Value::Null));
    assert_eq!(store.count("City"), 1);
}

#[test]
fn test_null_on_plain_top_level_field_still_rejected() {
    let dir = write_fixtures(&[("cities.yml", "springfield:\n  nickname: ~\n")]);
    let (result, _) = load_from(dir.path(), &schema(), "City");
    assert!(matches!(
        result,
        Err(docseed::Error::Resolve(
            docseed::error::ResolveError::InvalidReferenceRelation { .. }
        ))
    ));
}
