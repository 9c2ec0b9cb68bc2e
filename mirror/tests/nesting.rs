use mirror::{Mirror, Reflect};
use mirror_testhelpers::{IPanic, test};

#[derive(Reflect, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

#[derive(Reflect, Default)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub label: String,
}

#[derive(Reflect, Default)]
pub struct Drawing {
    pub id: u32,
    pub outline: Segment,
    pub guide: Segment,
}

#[derive(Reflect, Default)]
pub struct Outer {
    pub a: i32,
    pub b: Inner,
}

#[derive(Reflect, Default)]
pub struct Inner {
    pub c: i32,
}

#[test]
fn paths_are_rooted_at_the_reflected_struct() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let outer: Outer = mirror.template()?;

    assert_eq!(mirror.path(&outer.a)?, ".a");
    assert_eq!(mirror.path(&outer.b)?, ".b");
    assert_eq!(mirror.path(&outer.b.c)?, ".b.c");
    Ok(())
}

#[test]
fn nested_field_knows_its_parent() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let outer: Outer = mirror.template()?;

    let c = mirror.field(&outer.b.c)?;
    let b = mirror.field(&outer.b)?;
    assert_eq!(c.name(), "c");
    assert_eq!(c.parent, Some(b.index));
    assert_eq!(mirror.parent(c), Some(b));
    assert!(mirror.parent(b).is_none());
    assert_eq!(b.type_name(), "Inner");
    assert!(b.shape().is_struct());
    Ok(())
}

#[test]
fn aggregates_of_the_same_type_are_told_apart() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let drawing: Drawing = mirror.template()?;

    assert_eq!(mirror.path(&drawing.outline)?, ".outline");
    assert_eq!(mirror.path(&drawing.guide)?, ".guide");
    assert_eq!(mirror.path(&drawing.outline.from)?, ".outline.from");
    assert_eq!(mirror.path(&drawing.outline.to)?, ".outline.to");
    assert_eq!(mirror.path(&drawing.guide.from)?, ".guide.from");
    assert_eq!(mirror.path(&drawing.guide.to)?, ".guide.to");
    assert_eq!(mirror.path(&drawing.guide.to.y)?, ".guide.to.y");
    assert_eq!(mirror.path(&drawing.outline.label)?, ".outline.label");
    assert_eq!(mirror.path(&drawing.guide.label)?, ".guide.label");
    Ok(())
}

#[test]
fn ancestry_walks_up_to_the_top_level() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let drawing: Drawing = mirror.template()?;

    let y = mirror.field(&drawing.guide.to.y)?;
    let chain: Vec<_> = mirror.ancestry(y).map(|info| info.name()).collect();
    assert_eq!(chain, ["y", "to", "guide"]);
    Ok(())
}

#[test]
fn table_is_in_pre_order() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let _: Outer = mirror.template()?;

    let paths: Vec<_> = mirror
        .fields()
        .iter()
        .map(|info| mirror.path_of(info))
        .collect();
    assert_eq!(paths, [".a", ".b", ".b.c"]);
    assert_eq!(mirror.field_at_path(".b.c").map(|info| info.name()), Some("c"));
    assert!(mirror.field_at_path(".b.d").is_none());
    Ok(())
}

#[test]
fn every_read_resolves_to_its_own_field() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let drawing: Drawing = mirror.template()?;

    let reads = [
        mirror.field(&drawing.id)?.index,
        mirror.field(&drawing.outline)?.index,
        mirror.field(&drawing.outline.from)?.index,
        mirror.field(&drawing.outline.from.x)?.index,
        mirror.field(&drawing.outline.from.y)?.index,
        mirror.field(&drawing.outline.to)?.index,
        mirror.field(&drawing.outline.to.x)?.index,
        mirror.field(&drawing.outline.to.y)?.index,
        mirror.field(&drawing.outline.label)?.index,
        mirror.field(&drawing.guide)?.index,
        mirror.field(&drawing.guide.from)?.index,
        mirror.field(&drawing.guide.from.x)?.index,
        mirror.field(&drawing.guide.from.y)?.index,
        mirror.field(&drawing.guide.to)?.index,
        mirror.field(&drawing.guide.to.x)?.index,
        mirror.field(&drawing.guide.to.y)?.index,
        mirror.field(&drawing.guide.label)?.index,
    ];
    let expected: Vec<usize> = (0..mirror.len()).collect();
    assert_eq!(reads.as_slice(), expected.as_slice());
    Ok(())
}

#[derive(Reflect, Default)]
pub struct Credentials {
    pub user: i32,
    #[mirror(ignore)]
    pub cache: Vec<u8>,
    token: i32,
    pub realm: i32,
}

#[derive(Reflect, Default)]
pub struct Login {
    pub primary: Credentials,
    pub fallback: Credentials,
}

#[test]
fn aggregates_skip_unreflected_children_when_decoding() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let mut login = Login::default();
    login.primary.token = 77;
    login.fallback.cache = vec![1, 2, 3];
    mirror.reflect(&mut login)?;

    assert_eq!(login.primary.token, 77);
    assert_eq!(login.fallback.cache, [1, 2, 3]);

    assert_eq!(mirror.path(&login.primary)?, ".primary");
    assert_eq!(mirror.path(&login.fallback)?, ".fallback");
    assert_eq!(mirror.path(&login.primary.realm)?, ".primary.realm");
    assert_eq!(mirror.path(&login.fallback.user)?, ".fallback.user");
    assert_eq!(mirror.path(&login.fallback.realm)?, ".fallback.realm");

    let names: Vec<_> = mirror.fields().iter().map(|info| mirror.path_of(info)).collect();
    assert_eq!(
        names,
        [
            ".primary",
            ".primary.user",
            ".primary.realm",
            ".fallback",
            ".fallback.user",
            ".fallback.realm",
        ]
    );
    Ok(())
}
