//! End-to-end tests of the property-table read path: descriptor dispatch,
//! the value pipeline, conversions, and the fallback behavior that keeps
//! every getter total.

use proptest::prelude::*;
use structural_metadata::prelude::*;
use structural_metadata::util::{DMat4, DVec2, DVec3, DVec4, IVec2, IVec3, U8Vec2};
use structural_metadata::value::MetadataValue;

const ALL_TYPES: &[MetadataType] = &[
    MetadataType::Invalid,
    MetadataType::Scalar,
    MetadataType::Vec2,
    MetadataType::Vec3,
    MetadataType::Vec4,
    MetadataType::Mat2,
    MetadataType::Mat3,
    MetadataType::Mat4,
    MetadataType::Boolean,
    MetadataType::String,
    MetadataType::Enum,
];

fn any_value_type() -> impl Strategy<Value = ValueType> {
    (
        prop::sample::select(ALL_TYPES),
        0u8..=10,
        any::<bool>(),
    )
        .prop_map(|(ty, component, is_array)| {
            ValueType::new(ty, ComponentType::from_u8(component), is_array)
        })
}

proptest! {
    // Every descriptor combination resolves to some view; reads never
    // panic and always yield the default or a converted value.
    #[test]
    fn dispatch_is_total(value_type in any_value_type(), normalized in any::<bool>(), index in -3i64..10) {
        let prop = PropertyTableProperty::from_parts(
            OpaqueView::new(PropertyView::new(vec![1u32, 2, 3])),
            value_type,
            normalized,
        );
        let _ = prop.status();
        let _ = prop.size();
        let _ = prop.array_size();
        let _ = prop.get_value(index);
        let _ = prop.get_raw_value(index);
        let _ = prop.get_array(index);
        prop_assert_eq!(prop.get_integer(index, -99), if value_type == ValueType::scalar(ComponentType::Uint32) && !normalized && (0..3).contains(&index) {
            index as i32 + 1
        } else {
            -99
        });
    }

    // A mismatched descriptor is indistinguishable from an empty
    // property: size 0 and pure fallback, deterministically.
    #[test]
    fn mismatch_falls_back(index in -3i64..10, default in any::<i32>()) {
        let prop = PropertyTableProperty::from_parts(
            OpaqueView::new(PropertyView::new(vec![1i64, 2])),
            ValueType::scalar(ComponentType::Int32),
            false,
        );
        prop_assert_eq!(prop.size(), 0);
        prop_assert_eq!(prop.get_integer(index, default), default);
        prop_assert_eq!(prop.get_value(index), MetadataValue::Empty);
    }

    // Scalar columns of every integer width round-trip through the
    // untyped facade.
    #[test]
    fn scalar_roundtrip(values in prop::collection::vec(any::<i32>(), 1..20)) {
        let prop = PropertyTableProperty::new(PropertyView::new(values.clone()));
        prop_assert_eq!(prop.size(), values.len() as i64);
        for (i, v) in values.iter().enumerate() {
            prop_assert_eq!(prop.get_integer(i as i64, 0), *v);
            prop_assert_eq!(prop.get_integer64(i as i64, 0), *v as i64);
        }
    }

    // Normalization maps the full unsigned range onto [0, 1] before the
    // offset/scale transform runs.
    #[test]
    fn normalized_range(raw in any::<u8>()) {
        let prop = PropertyTableProperty::new(
            PropertyView::new(vec![raw]).with_normalized(true),
        );
        let v = prop.get_float64(0, f64::NAN);
        prop_assert!((0.0..=1.0).contains(&v));
        prop_assert_eq!(v, raw as f64 / 255.0);
    }
}

#[test]
fn unknown_component_yields_invalid_view() {
    // SCALAR with no component type names no concrete column.
    let prop = PropertyTableProperty::from_parts(
        OpaqueView::new(PropertyView::new(vec![5u8])),
        ValueType::new(MetadataType::Scalar, ComponentType::None, false),
        false,
    );
    assert_eq!(prop.status(), ViewStatus::ErrorInvalidProperty);
    assert_eq!(prop.size(), 0);
    assert_eq!(prop.get_integer(0, 42), 42);
}

#[test]
fn float_normalized_flag_is_ignored() {
    let stored = PropertyView::new(vec![0.25f32]).with_normalized(true);
    assert!(!stored.is_normalized());
    // The descriptor may still carry the flag; dispatch masks it.
    let prop = PropertyTableProperty::from_parts(
        OpaqueView::new(stored),
        ValueType::scalar(ComponentType::Float32),
        true,
    );
    assert_eq!(prop.status(), ViewStatus::Valid);
    assert_eq!(prop.get_float(0, 0.0), 0.25);
}

#[test]
fn vector_widening_and_narrowing() {
    let prop = PropertyTableProperty::new(PropertyView::new(vec![U8Vec2::new(10, 20)]));
    // More requested components zero-fill.
    assert_eq!(prop.get_vector(0, DVec3::ZERO), DVec3::new(10.0, 20.0, 0.0));
    assert_eq!(
        prop.get_vector4(0, DVec4::ZERO),
        DVec4::new(10.0, 20.0, 0.0, 0.0)
    );

    // Fewer requested components drop the tail.
    let prop = PropertyTableProperty::new(PropertyView::new(vec![DVec4::new(
        1.0, 2.0, 3.0, 4.0,
    )]));
    assert_eq!(prop.get_vector2(0, DVec2::ZERO), DVec2::new(1.0, 2.0));
    assert_eq!(prop.get_int_point(0, IVec2::ZERO), IVec2::new(1, 2));
}

#[test]
fn scalar_splats_to_vectors() {
    let prop = PropertyTableProperty::new(PropertyView::new(vec![7u8]));
    assert_eq!(prop.get_int_vector(0, IVec3::ZERO), IVec3::splat(7));
    assert_eq!(prop.get_vector4(0, DVec4::ZERO), DVec4::splat(7.0));
}

#[test]
fn string_and_boolean_coercions() {
    let prop = PropertyTableProperty::new(PropertyView::new(vec![
        "42".to_string(),
        "yes".to_string(),
        "not a number".to_string(),
    ]));
    assert_eq!(prop.get_integer(0, 0), 42);
    assert!(prop.get_boolean(1, false));
    assert_eq!(prop.get_integer(2, -1), -1);
    assert_eq!(prop.get_string(2, ""), "not a number");

    let prop = PropertyTableProperty::new(PropertyView::new(vec![true, false]));
    assert_eq!(prop.get_integer(0, 0), 1);
    assert_eq!(prop.get_string(1, ""), "false");
}

#[test]
fn no_data_reads_as_default() {
    let prop = PropertyTableProperty::new(
        PropertyView::new(vec![1i32, -999, 3])
            .with_no_data(-999)
            .with_default(MetadataValue::Int64(0)),
    );
    assert_eq!(prop.get_integer(1, 7), 0);
    assert_eq!(prop.get_raw_value(1), MetadataValue::Int64(-999));
    assert_eq!(prop.no_data_value(), MetadataValue::Int64(-999));
}

#[test]
fn normalized_with_offset_and_scale() {
    let prop = PropertyTableProperty::new(
        PropertyView::new(vec![0u8, 255])
            .with_normalized(true)
            .with_scale(MetadataValue::Float64(100.0))
            .with_offset(MetadataValue::Float64(-50.0)),
    );
    assert_eq!(prop.get_float64(0, f64::NAN), -50.0);
    assert_eq!(prop.get_float64(1, f64::NAN), 50.0);
    // Raw reads skip the whole pipeline.
    assert_eq!(prop.get_raw_value(1), MetadataValue::Uint64(255));
}

#[test]
fn signed_normalization_clamps_to_minus_one() {
    let prop = PropertyTableProperty::new(
        PropertyView::new(vec![i8::MIN, -127, 127]).with_normalized(true),
    );
    assert_eq!(prop.get_float64(0, f64::NAN), -1.0);
    assert_eq!(prop.get_float64(1, f64::NAN), -1.0);
    assert_eq!(prop.get_float64(2, f64::NAN), 1.0);
}

#[test]
fn empty_property_with_default_diverges_raw() {
    let prop = PropertyTableProperty::new(PropertyView::<f64>::empty_with_default(
        5,
        MetadataValue::Float64(2.5),
    ));
    assert_eq!(prop.status(), ViewStatus::EmptyPropertyWithDefault);
    assert_eq!(prop.size(), 5);
    for i in 0..5 {
        assert_eq!(prop.get_value(i), MetadataValue::Float64(2.5));
        assert_eq!(prop.get_raw_value(i), MetadataValue::Empty);
    }
    assert_eq!(prop.get_value(5), MetadataValue::Empty);
}

#[test]
fn fixed_size_array_property() {
    let view = PropertyView::fixed_size_arrays(vec![1i16, 2, 3, 4, 5, 6], 3).unwrap();
    let prop = PropertyTableProperty::new(view);
    assert_eq!(prop.size(), 2);
    assert_eq!(prop.array_size(), 3);
    assert!(prop.value_type().is_array);
    assert_eq!(
        prop.array_element_type(),
        ValueType::scalar(ComponentType::Int16)
    );
    let a = prop.get_array(1);
    assert_eq!(a.size(), 3);
    assert_eq!(a.get(0), MetadataValue::Int64(4));
    assert_eq!(a.get(3), MetadataValue::Empty);
}

#[test]
fn variable_size_array_property() {
    let view = PropertyView::variable_size_arrays(
        vec!["a".to_string(), "b".to_string(), "c".to_string()],
        &[0, 1, 1, 3],
    )
    .unwrap();
    let prop = PropertyTableProperty::new(view);
    assert_eq!(prop.size(), 3);
    assert_eq!(prop.array_size(), 0);
    assert!(prop.get_array(1).is_empty());
    let a = prop.get_array(2);
    assert_eq!(a.size(), 2);
    assert_eq!(a.get(1), MetadataValue::String("c".to_string()));
}

#[test]
fn normalized_array_property() {
    let view = PropertyView::fixed_size_arrays(vec![0u8, 255], 2)
        .unwrap()
        .with_normalized(true);
    let prop = PropertyTableProperty::new(view);
    let a = prop.get_array(0);
    assert_eq!(a.get(0), MetadataValue::Float64(0.0));
    assert_eq!(a.get(1), MetadataValue::Float64(1.0));
}

#[test]
fn from_bytes_column() {
    let bytes: Vec<u8> = [1.0f32, 2.5, -3.0]
        .iter()
        .flat_map(|f| f.to_le_bytes())
        .collect();
    let view = PropertyView::<f32>::from_bytes(&bytes).unwrap();
    let prop = PropertyTableProperty::new(view);
    assert_eq!(prop.size(), 3);
    assert_eq!(prop.get_float(1, 0.0), 2.5);
    assert_eq!(prop.get_float64(2, 0.0), -3.0);
}

#[test]
fn matrix_embeds_into_identity() {
    let m = MatN::<u16, 3>::from_cols_slice(&[5, 0, 0, 0, 5, 0, 0, 0, 5]).unwrap();
    let prop = PropertyTableProperty::new(PropertyView::new(vec![m]));
    let out = prop.get_matrix(0, DMat4::ZERO);
    assert_eq!(out.col(0).x, 5.0);
    assert_eq!(out.col(2).z, 5.0);
    assert_eq!(out.col(3).w, 1.0);
}

#[test]
fn clone_shares_the_column() {
    let prop = PropertyTableProperty::new(PropertyView::new(vec![9u64; 1000]));
    let copy = prop.clone();
    assert_eq!(copy.size(), prop.size());
    assert_eq!(copy.get_integer64(999, 0), 9);
}
