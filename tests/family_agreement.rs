//! Cross-family agreement properties
//!
//! Builds random descriptors, lowers each one to the TypeBox-like family and
//! checks that both families accept, reject and normalize generated values
//! the same way.

use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Union};
use serde_json::{json, Map, Value};

use blueprint_schemas::typebox::lower;
use blueprint_schemas::{EquivalenceReport, FieldType, ZodSchema};

fn assert_families_agree(ty: &FieldType, value: &Value) -> Result<(), TestCaseError> {
    let zod = ZodSchema::new(ty.clone());
    let typebox = lower(ty)
        .compile()
        .map_err(|e| TestCaseError::fail(format!("{} does not compile: {}", ty, e)))?;
    let report = EquivalenceReport::compare(&zod, &typebox, value);
    prop_assert!(
        report.is_equivalent(),
        "{} on {}\n  zod: {}\n  typebox: {}",
        ty,
        value,
        report.left,
        report.right
    );
    Ok(())
}

// =============================================================================
// Value strategies
// =============================================================================

fn arb_leaf() -> BoxedStrategy<Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        any::<i32>().prop_map(|n| json!(f64::from(n))),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        any::<String>().prop_map(Value::String),
    ]
    .boxed()
}

/// Strings near the uuid, email, uri and date-time formats, plus arbitrary unicode
fn arb_format_string() -> BoxedStrategy<Value> {
    prop_oneof![
        any::<String>(),
        "[a-z]{1,6}@[a-z]{1,6}\\.[a-z]{2,3}",
        "[a-z]{1,6}://[a-z.]{1,8}(:[0-9]{1,6})?(/[a-z%\\[\\]]{0,6})?",
        "http://\\[::1",
        "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
        "20[0-9]{2}-[01][0-9]-[0-3][0-9]T[0-2][0-9]:[0-5][0-9]:[0-5][0-9](\\.[0-9]{1,3})?(Z|[+-][01][0-9]:[0-5][0-9])",
        "\\PC{0,3}".prop_map(|s| format!("a{}\u{FEFF}b@example.com", s)),
        "\\PC{0,3}".prop_map(|s| format!("a{}\u{2028}b@example.com", s)),
    ]
    .prop_map(Value::String)
    .boxed()
}

/// An integer literal in its integer, float and fractional forms
fn number_forms(value: &Value) -> BoxedStrategy<Value> {
    match value.as_i64() {
        Some(n) => prop_oneof![
            Just(json!(n)),
            Just(json!(n as f64)),
            Just(json!(n as f64 + 0.5)),
        ]
        .boxed(),
        None => Just(value.clone()).boxed(),
    }
}

/// Mostly values shaped like `ty`, with some arbitrary noise
fn arb_value_for(ty: &FieldType) -> BoxedStrategy<Value> {
    let shaped: BoxedStrategy<Value> = match ty {
        FieldType::String => any::<String>().prop_map(Value::String).boxed(),
        FieldType::Number => prop_oneof![
            any::<i32>().prop_map(|n| json!(n)),
            (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        ]
        .boxed(),
        FieldType::BigInt => prop_oneof![
            any::<i32>().prop_map(|n| json!(n)),
            any::<i32>().prop_map(|n| json!(f64::from(n))),
            (-1.0e3f64..1.0e3).prop_map(|f| json!(f)),
        ]
        .boxed(),
        FieldType::Boolean => any::<bool>().prop_map(Value::Bool).boxed(),
        FieldType::Uuid | FieldType::Email | FieldType::Uri | FieldType::Date => arb_format_string(),
        FieldType::Nullish => Just(Value::Null).boxed(),
        FieldType::Literal { value } => number_forms(value),
        FieldType::Enum { values } => {
            let members: Vec<Value> = values.values().cloned().collect();
            proptest::sample::select(members)
                .prop_flat_map(|member| number_forms(&member))
                .boxed()
        }
        FieldType::Optional { inner } => arb_value_for(inner),
        FieldType::Array { items } => proptest::collection::vec(arb_value_for(items), 0..3)
            .prop_map(Value::Array)
            .boxed(),
        FieldType::Union { variants } => {
            Union::new(variants.iter().map(arb_value_for).collect::<Vec<_>>()).boxed()
        }
        FieldType::Object { shape } => {
            let fields: Vec<BoxedStrategy<Option<(String, Value)>>> = shape
                .fields()
                .iter()
                .map(|field| {
                    let name = field.name.clone();
                    proptest::option::weighted(0.85, arb_value_for(&field.schema))
                        .prop_map(move |v| v.map(|v| (name.clone(), v)))
                        .boxed()
                })
                .collect();
            (fields, proptest::option::of(arb_leaf()))
                .prop_map(|(present, extra)| {
                    let mut map: Map<String, Value> = present.into_iter().flatten().collect();
                    if let Some(extra) = extra {
                        map.insert("zz_undeclared".to_string(), extra);
                    }
                    Value::Object(map)
                })
                .boxed()
        }
        FieldType::Record { value, .. } => {
            proptest::collection::vec((any::<String>(), arb_value_for(value)), 0..3)
                .prop_map(|entries| Value::Object(entries.into_iter().collect()))
                .boxed()
        }
        FieldType::Unknown | FieldType::Any | FieldType::Symbol | FieldType::Never => arb_leaf(),
    };
    prop_oneof![9 => shaped, 1 => arb_leaf()].boxed()
}

// =============================================================================
// Descriptor strategies
// =============================================================================

fn arb_leaf_type() -> BoxedStrategy<FieldType> {
    prop_oneof![
        Just(FieldType::String),
        Just(FieldType::Number),
        Just(FieldType::Boolean),
        Just(FieldType::BigInt),
        Just(FieldType::Uuid),
        Just(FieldType::Email),
        Just(FieldType::Uri),
        Just(FieldType::Date),
        Just(FieldType::Nullish),
        Just(FieldType::Unknown),
        Just(FieldType::Never),
        any::<i16>().prop_map(|n| FieldType::literal(n)),
        "[a-c]{1,2}".prop_map(|s| FieldType::literal(s)),
        proptest::collection::btree_map("[A-C]", any::<i8>(), 1..3).prop_map(|members| {
            FieldType::enumeration(members.into_iter().map(|(k, v)| (k, json!(v))).collect())
        }),
    ]
    .boxed()
}

fn arb_field_type() -> BoxedStrategy<FieldType> {
    arb_leaf_type()
        .prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                inner.clone().prop_map(FieldType::optional),
                inner.clone().prop_map(FieldType::array),
                proptest::collection::vec(inner.clone(), 1..3).prop_map(|v| FieldType::union(v)),
                proptest::collection::vec(("[a-d]{1,2}", inner.clone()), 0..4)
                    .prop_map(|fields| FieldType::object(fields.into_iter().collect())),
                inner.prop_map(|v| FieldType::record(FieldType::String, v)),
            ]
        })
        .boxed()
}

fn arb_case() -> impl Strategy<Value = (FieldType, Value)> {
    arb_field_type().prop_flat_map(|ty| {
        let values = arb_value_for(&ty);
        (Just(ty), values)
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_formats_agree(value in arb_format_string()) {
        for ty in [FieldType::Uuid, FieldType::Email, FieldType::Uri, FieldType::Date] {
            assert_families_agree(&ty, &value)?;
        }
    }

    #[test]
    fn prop_numeric_literals_and_enums_agree(n in any::<i32>(), pick in 0usize..3) {
        let value = [json!(n), json!(f64::from(n)), json!(f64::from(n) + 0.5)][pick].clone();
        assert_families_agree(&FieldType::literal(n), &value)?;

        let mut members = Map::new();
        members.insert("Low".to_string(), json!(n));
        members.insert("High".to_string(), json!(n.wrapping_add(1)));
        assert_families_agree(&FieldType::enumeration(members), &value)?;
    }

    #[test]
    fn prop_generated_descriptors_agree((ty, value) in arb_case()) {
        assert_families_agree(&ty, &value)?;
    }
}

#[test]
fn test_uri_edge_strings_agree() {
    for value in ["redis://localhost:99999", "http://[::1", "http://exa%mple.com"] {
        let value = json!(value);
        assert_families_agree(&FieldType::Uri, &value).unwrap();
        assert!(ZodSchema::new(FieldType::Uri).safe_parse(&value));
    }
}

#[test]
fn test_email_whitespace_edge_strings_agree() {
    for value in ["a\u{FEFF}b@example.com", "a\u{2028}b@example.com"] {
        assert_families_agree(&FieldType::Email, &json!(value)).unwrap();
    }
}

#[test]
fn test_integral_float_matches_literal_and_enum() {
    let mut members = Map::new();
    members.insert("Low".to_string(), json!(1));
    for ty in [FieldType::literal(1), FieldType::enumeration(members)] {
        assert_families_agree(&ty, &json!(1.0)).unwrap();
        assert!(ZodSchema::new(ty).safe_parse(&json!(1.0)));
    }
}
