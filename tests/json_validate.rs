use variato::{
    BoundaryPolicy, Engine, EngineOpts, MemoryDocument, Resolution, Size, VariationSet,
};

fn fixture() -> VariationSet {
    let s = include_str!("data/variations.json");
    serde_json::from_str(s).unwrap()
}

#[test]
fn json_fixture_validates() {
    fixture().validate().unwrap();
}

#[test]
fn json_fixture_round_trips_authored_keys() {
    let set = fixture();
    let s = serde_json::to_string(&set).unwrap();
    assert!(s.contains("\">480\""));
    assert!(s.contains("\">960\""));
    let de: VariationSet = serde_json::from_str(&s).unwrap();
    assert_eq!(de, set);
}

#[test]
fn json_fixture_drives_a_full_cycle() {
    let doc = MemoryDocument::new(Size::new(1024.0, 512.0).unwrap())
        .with_element("headline")
        .with_element("badge");
    let mut engine = Engine::new(doc, fixture(), EngineOpts::default()).unwrap();

    // Narrow: baseline only.
    engine.doc_mut().set_rendered_size(Size::new(320.0, 160.0).unwrap());
    let outcome = engine.init().unwrap();
    assert_eq!(outcome.resolution, Resolution::DefaultOnly);

    let headline = engine.doc().element("headline").unwrap();
    assert_eq!(headline.style("display"), Some("inline"));
    assert_eq!(headline.style("fill"), Some("#1a1a1a"));
    assert_eq!(headline.attribute("transform"), Some("translate(0,0)"));
    assert_eq!(
        engine.doc().element("badge").unwrap().style("display"),
        Some("none")
    );

    // Mid range: the >480 variation layers over the baseline.
    engine.doc_mut().set_rendered_size(Size::new(600.0, 300.0).unwrap());
    let outcome = engine.resolve_now().unwrap();
    assert_eq!(outcome.resolution, Resolution::Matched(1));

    let headline = engine.doc().element("headline").unwrap();
    assert_eq!(headline.style("fill"), Some("#0055aa"));
    assert_eq!(
        headline.attribute("transform"),
        Some("rotate(12) translate(24,12)")
    );
    assert_eq!(
        engine.doc().element("badge").unwrap().style("display"),
        Some("inline")
    );
}

#[test]
fn json_fixture_boundary_is_policy_dependent() {
    let set = fixture();
    assert_eq!(
        variato::resolve(&set, 480.0, BoundaryPolicy::Exclusive).unwrap(),
        Resolution::Unchanged
    );
    assert_eq!(
        variato::resolve(&set, 480.0, BoundaryPolicy::HalfOpen).unwrap(),
        Resolution::Matched(1)
    );
}
