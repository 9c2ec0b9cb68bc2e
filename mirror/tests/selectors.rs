//! Tuple structs, and the column selector pattern mirror exists for.

use mirror::{Mirror, Reflect, ReflectError, StructKind};
use mirror_testhelpers::{IPanic, test};

#[derive(Reflect, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Reflect, Default)]
pub struct Pixel {
    pub x: u16,
    pub y: u16,
    pub color: Rgb,
}

#[derive(Reflect, Default)]
pub struct Row {
    pub id: i64,
    pub name: String,
    pub score: f64,
}

/// Column names for the fields `pick` reads from a template, in pick order.
fn columns<T: Reflect + Default>(
    mirror: &mut Mirror,
    pick: impl FnOnce(&Mirror, &T) -> Result<Vec<String>, ReflectError>,
) -> Result<Vec<String>, ReflectError> {
    let template: T = mirror.template()?;
    let paths = pick(mirror, &template)?;
    Ok(paths
        .into_iter()
        .map(|path| path.trim_start_matches('.').replace('.', "_"))
        .collect())
}

#[test]
fn tuple_fields_are_named_by_index() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let pixel: Pixel = mirror.template()?;

    assert_eq!(mirror.path(&pixel.color.0)?, ".color.0");
    assert_eq!(mirror.path(&pixel.color.2)?, ".color.2");
    assert_eq!(mirror.path(&pixel.color)?, ".color");
    assert_eq!(mirror.field(&pixel.y)?.name(), "y");

    let kind = Rgb::SHAPE.struct_type().map(|st| st.kind);
    assert_eq!(kind, Some(StructKind::TupleStruct));
    Ok(())
}

#[test]
fn selector_reads_become_column_names() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();

    let cols = columns::<Row>(&mut mirror, |m, row| {
        Ok(vec![m.path(&row.score)?, m.path(&row.name)?])
    })?;
    assert_eq!(cols, ["score", "name"]);

    let cols = columns::<Pixel>(&mut mirror, |m, pixel| {
        Ok(vec![m.path(&pixel.x)?, m.path(&pixel.color.1)?])
    })?;
    assert_eq!(cols, ["x", "color_1"]);
    Ok(())
}

#[test]
fn selector_with_a_foreign_value_fails() {
    let mut mirror = Mirror::new();
    let outside = Row {
        id: 99,
        ..Default::default()
    };
    let result = columns::<Row>(&mut mirror, |m, _| Ok(vec![m.path(&outside.id)?]));
    assert!(matches!(result, Err(ReflectError::UnknownField { .. })));
}

#[test]
fn rows_share_one_static_shape() {
    assert_eq!(Row::SHAPE.type_identifier, "Row");
    assert_eq!(Row::SHAPE.to_string(), "Row");
    let st = Row::SHAPE.struct_type().unwrap();
    assert_eq!(st.kind, StructKind::Struct);
    let names: Vec<_> = st.fields.iter().map(|f| f.name).collect();
    assert_eq!(names, ["id", "name", "score"]);
}
