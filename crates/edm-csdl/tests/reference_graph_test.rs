use edm_csdl::CsdlParser;
use serde_json::json;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Resolver over an in-memory document set that counts how many times
/// each URI is fetched.
fn counting_resolver(
    documents: HashMap<String, serde_json::Value>,
) -> (
    impl Fn(&str) -> Option<serde_json::Value> + 'static,
    Rc<RefCell<HashMap<String, usize>>>,
) {
    let counts = Rc::new(RefCell::new(HashMap::new()));
    let counts_handle = Rc::clone(&counts);
    let resolver = move |uri: &str| {
        *counts_handle
            .borrow_mut()
            .entry(uri.to_string())
            .or_insert(0) += 1;
        documents.get(uri).cloned()
    };
    (resolver, counts)
}

fn reference(uri: &str, namespace: &str) -> serde_json::Value {
    json!({uri: {"$Include": [{"$Namespace": namespace}]}})
}

#[test]
fn test_diamond_graph_loads_shared_document_once() {
    let d_uri = "https://example.org/d.json";
    let mut documents = HashMap::new();
    documents.insert(
        "https://example.org/b.json".to_string(),
        json!({
            "$Version": "4.0",
            "$Reference": reference(d_uri, "Diamond.D"),
            "Diamond.B": {
                "FromB": {
                    "$Kind": "ComplexType",
                    "Shared": {"$Type": "Diamond.D.Shared"}
                }
            }
        }),
    );
    documents.insert(
        "https://example.org/c.json".to_string(),
        json!({
            "$Version": "4.0",
            "$Reference": reference(d_uri, "Diamond.D"),
            "Diamond.C": {
                "FromC": {
                    "$Kind": "ComplexType",
                    "Shared": {"$Type": "Diamond.D.Shared"}
                }
            }
        }),
    );
    documents.insert(
        d_uri.to_string(),
        json!({
            "$Version": "4.0",
            "Diamond.D": {
                "Shared": {"$Kind": "ComplexType", "Label": {}}
            }
        }),
    );

    let (resolver, counts) = counting_resolver(documents);
    let main = json!({
        "$Version": "4.0",
        "$Reference": {
            "https://example.org/b.json": {"$Include": [{"$Namespace": "Diamond.B"}]},
            "https://example.org/c.json": {"$Include": [{"$Namespace": "Diamond.C"}]}
        },
        "Diamond.A": {
            "Root": {
                "$Kind": "ComplexType",
                "Left": {"$Type": "Diamond.B.FromB"},
                "Right": {"$Type": "Diamond.C.FromC"}
            }
        }
    });

    let outcome = CsdlParser::new()
        .with_resolver(resolver)
        .parse_json(&main)
        .unwrap();

    let counts = counts.borrow();
    assert_eq!(counts.get("https://example.org/b.json"), Some(&1));
    assert_eq!(counts.get("https://example.org/c.json"), Some(&1));
    assert_eq!(counts.get(d_uri), Some(&1), "shared document fetched once");

    // Every document's elements are reachable from the root model.
    let model = &outcome.model;
    assert!(model.complex_type("Diamond.A.Root").is_some());
    assert!(model.complex_type("Diamond.B.FromB").is_some());
    assert!(model.complex_type("Diamond.C.FromC").is_some());
    assert!(model.complex_type("Diamond.D.Shared").is_some());

    // B loaded first and owns the sub-model for D; C's copy was
    // deduplicated away, leaving it with no sub-models of its own.
    assert_eq!(model.referenced_models().len(), 2);
    let b = model
        .referenced_models()
        .iter()
        .find(|m| m.uri() == Some("https://example.org/b.json"))
        .unwrap();
    let c = model
        .referenced_models()
        .iter()
        .find(|m| m.uri() == Some("https://example.org/c.json"))
        .unwrap();
    assert_eq!(b.referenced_models().len(), 1);
    assert!(c.referenced_models().is_empty());
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_cyclic_graph_terminates_and_resolves_names() {
    // b -> c -> d -> b again: the second request for b must be skipped,
    // and d still resolves a type declared in b through the shared pool.
    let mut documents = HashMap::new();
    documents.insert(
        "https://example.org/b.json".to_string(),
        json!({
            "$Version": "4.0",
            "$Reference": reference("https://example.org/c.json", "Cycle.C"),
            "Cycle.B": {
                "Anchor": {"$Kind": "ComplexType", "Note": {}}
            }
        }),
    );
    documents.insert(
        "https://example.org/c.json".to_string(),
        json!({
            "$Version": "4.0",
            "$Reference": reference("https://example.org/d.json", "Cycle.D"),
            "Cycle.C": {
                "Middle": {"$Kind": "ComplexType"}
            }
        }),
    );
    documents.insert(
        "https://example.org/d.json".to_string(),
        json!({
            "$Version": "4.0",
            "$Reference": reference("https://example.org/b.json", "Cycle.B"),
            "Cycle.D": {
                "BackRef": {
                    "$Kind": "ComplexType",
                    "Target": {"$Type": "Cycle.B.Anchor"}
                }
            }
        }),
    );

    let (resolver, counts) = counting_resolver(documents);
    let main = json!({
        "$Version": "4.0",
        "$Reference": {
            "https://example.org/b.json": {"$Include": [{"$Namespace": "Cycle.B"}]}
        },
        "Cycle.A": {
            "Entry": {"$Kind": "ComplexType", "Start": {"$Type": "Cycle.B.Anchor"}}
        }
    });

    let outcome = CsdlParser::new()
        .with_resolver(resolver)
        .parse_json(&main)
        .unwrap();

    let counts = counts.borrow();
    assert_eq!(counts.get("https://example.org/b.json"), Some(&1));
    assert_eq!(counts.get("https://example.org/c.json"), Some(&1));
    assert_eq!(counts.get("https://example.org/d.json"), Some(&1));

    let model = &outcome.model;
    assert!(model.complex_type("Cycle.A.Entry").is_some());
    assert!(model.complex_type("Cycle.B.Anchor").is_some());
    assert!(model.complex_type("Cycle.C.Middle").is_some());
    assert!(model.complex_type("Cycle.D.BackRef").is_some());
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_self_reference_is_loaded_once() {
    let uri = "https://example.org/self.json";
    let mut documents = HashMap::new();
    documents.insert(
        uri.to_string(),
        json!({
            "$Version": "4.0",
            "$Reference": reference(uri, "Loop.Vocab"),
            "Loop.Vocab": {
                "Tag": {"$Kind": "Term"}
            }
        }),
    );

    let (resolver, counts) = counting_resolver(documents);
    let main = json!({
        "$Version": "4.0",
        "$Reference": {uri: {"$Include": [{"$Namespace": "Loop.Vocab"}]}},
        "Loop.Main": {}
    });

    let outcome = CsdlParser::new()
        .with_resolver(resolver)
        .parse_json(&main)
        .unwrap();

    assert_eq!(counts.borrow().get(uri), Some(&1));
    assert!(outcome.model.find_element("Loop.Vocab.Tag").is_some());
}

#[test]
fn test_malformed_referenced_document_aborts_parse() {
    let mut documents = HashMap::new();
    documents.insert(
        "https://example.org/broken.json".to_string(),
        json!({"Broken.Ns": {}}),
    );

    let (resolver, _counts) = counting_resolver(documents);
    let main = json!({
        "$Version": "4.0",
        "$Reference": {
            "https://example.org/broken.json": {"$Include": [{"$Namespace": "Broken.Ns"}]}
        },
        "Main.Ns": {}
    });

    let err = CsdlParser::new()
        .with_resolver(resolver)
        .parse_json(&main)
        .unwrap_err();
    assert!(matches!(err, edm_csdl::Error::MalformedSchema { .. }));
}
