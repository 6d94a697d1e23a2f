// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Round-trip behavior of the plain and sealed serialization paths.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use typeseal_core::{contains_envelope_marker, Error, TextCodec, TypeRegistry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Waypoint {
    name: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Route {
    label: String,
    stops: Vec<Waypoint>,
}

fn sample_waypoint() -> Waypoint {
    Waypoint {
        name: "Cham".into(),
        lat: 47.18,
        lon: 8.46,
    }
}

fn registry() -> Arc<TypeRegistry> {
    let mut registry = TypeRegistry::new();
    registry.register::<Waypoint>("waypoint").unwrap();
    registry.register::<Route>("route").unwrap();
    registry.register::<Vec<String>>("string-list").unwrap();
    Arc::new(registry)
}

#[test]
fn json_concrete_roundtrip() {
    let codec = TextCodec::json(registry());
    let wp = sample_waypoint();

    let text = codec.serialize(&wp).unwrap();
    let back: Waypoint = codec.deserialize(&text).unwrap();

    assert_eq!(back, wp);
}

#[test]
fn xml_concrete_roundtrip() {
    let codec = TextCodec::xml(registry());
    let wp = sample_waypoint();

    let text = codec.serialize(&wp).unwrap();
    assert!(text.starts_with("<?xml"));
    let back: Waypoint = codec.deserialize(&text).unwrap();

    assert_eq!(back, wp);
}

#[test]
fn sealed_document_deserializes_to_a_concrete_target_in_one_pass() {
    for codec in [TextCodec::json(registry()), TextCodec::xml(registry())] {
        let wp = sample_waypoint();
        let sealed = codec.serialize_sealed(&wp, None).unwrap();

        // Concrete target: no registry resolution needed
        let back: Waypoint = codec.deserialize(&sealed).unwrap();
        assert_eq!(back, wp);
    }
}

#[test]
fn marker_is_exclusive_to_sealed_documents() {
    let codec = TextCodec::json(registry());
    let wp = sample_waypoint();
    let route = Route {
        label: "north".into(),
        stops: vec![sample_waypoint()],
    };
    let list: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
    let empty: Vec<String> = Vec::new();

    // Plain outputs never carry the marker, including lists and nesting
    assert!(!contains_envelope_marker(&codec.serialize(&wp).unwrap()));
    assert!(!contains_envelope_marker(&codec.serialize(&route).unwrap()));
    assert!(!contains_envelope_marker(&codec.serialize(&list).unwrap()));
    assert!(!contains_envelope_marker(&codec.serialize(&empty).unwrap()));

    // Sealed outputs always do
    assert!(contains_envelope_marker(
        &codec.serialize_sealed(&wp, None).unwrap()
    ));
    assert!(contains_envelope_marker(
        &codec.serialize_sealed(&route, None).unwrap()
    ));
    assert!(contains_envelope_marker(
        &codec.serialize_sealed(&list, None).unwrap()
    ));
}

#[test]
fn absent_value_degenerates_to_null() {
    for codec in [TextCodec::json(registry()), TextCodec::xml(registry())] {
        // Sealing is requested but there is no runtime type to record
        let text = codec.serialize_opt::<Waypoint>(None, true, None).unwrap();

        assert!(!contains_envelope_marker(&text));
        let back: Option<Waypoint> = codec.deserialize_opt(&text, None).unwrap();
        assert_eq!(back, None);
    }
}

#[test]
fn present_optional_value_roundtrips() {
    let codec = TextCodec::json(registry());
    let wp = sample_waypoint();

    let text = codec.serialize_opt(Some(&wp), true, None).unwrap();
    assert!(contains_envelope_marker(&text));
    let back: Option<Waypoint> = codec.deserialize_opt(&text, None).unwrap();

    assert_eq!(back, Some(wp));
}

#[test]
fn empty_input_is_rejected() {
    let codec = TextCodec::json(registry());

    assert!(matches!(
        codec.deserialize::<Waypoint>("").unwrap_err(),
        Error::EmptyInput
    ));
    assert!(matches!(
        codec.deserialize_opt::<Waypoint>("", None).unwrap_err(),
        Error::EmptyInput
    ));
    assert!(matches!(
        codec.deserialize_sealed("", None).unwrap_err(),
        Error::EmptyInput
    ));
}

#[test]
fn sealing_an_unregistered_type_fails_loudly() {
    #[derive(Serialize, Deserialize)]
    struct Stray {
        x: u8,
    }

    let codec = TextCodec::json(registry());
    let err = codec.serialize_sealed(&Stray { x: 1 }, None).unwrap_err();

    assert!(matches!(err, Error::UnregisteredType(_)));
}

#[test]
fn parse_errors_propagate_from_the_underlying_serializer() {
    let codec = TextCodec::json(registry());
    let err = codec.deserialize::<Waypoint>("{\"name\": ").unwrap_err();
    assert!(matches!(err, Error::Json(_)));

    let codec = TextCodec::xml(registry());
    let err = codec.deserialize::<Waypoint>("<Waypoint><name>").unwrap_err();
    assert!(matches!(err, Error::XmlRead(_)));
}

#[test]
fn pretty_output_roundtrips() {
    let codec = TextCodec::xml(registry());
    let route = Route {
        label: "north".into(),
        stops: vec![sample_waypoint()],
    };

    let text = codec.serialize_pretty(&route, None).unwrap();
    assert!(text.contains('\n'));
    let back: Route = codec.deserialize(&text).unwrap();

    assert_eq!(back, route);
}

#[test]
fn large_list_deserializes_within_latency_bound() {
    let codec = TextCodec::json(registry());
    let stops: Vec<Waypoint> = (0..4891)
        .map(|i| Waypoint {
            name: format!("wp-{i}"),
            lat: 47.0 + (i as f64) * 1e-4,
            lon: 8.0 + (i as f64) * 1e-4,
        })
        .collect();
    let text = codec.serialize(&stops).unwrap();

    let started = Instant::now();
    let back: Vec<Waypoint> = codec.deserialize(&text).unwrap();
    let elapsed = started.elapsed();

    assert_eq!(back.len(), 4891);
    // Regression signal, not a hard contract
    assert!(
        elapsed.as_millis() <= 1500,
        "deserializing 4891 elements took {elapsed:?}"
    );
}
