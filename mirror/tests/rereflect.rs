use mirror::{Mirror, Reflect};
use mirror_testhelpers::{IPanic, test};

#[derive(Reflect, Default)]
pub struct First {
    pub alpha: i32,
    pub beta: i32,
    pub gamma: bool,
}

#[derive(Reflect, Default)]
pub struct Second {
    pub delta: i32,
    pub epsilon: bool,
    pub zeta: bool,
}

#[test]
fn second_reflect_replaces_the_table() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let _: First = mirror.template()?;
    let second: Second = mirror.template()?;

    assert_eq!(mirror.len(), 3);
    assert_eq!(mirror.root(), Some(Second::SHAPE));
    assert_eq!(mirror.field(&second.delta)?.name(), "delta");
    assert_eq!(mirror.path(&second.epsilon)?, ".epsilon");
    // counters restart: two bools still fit after First used one
    assert_eq!(mirror.field(&second.zeta)?.name(), "zeta");
    assert!(mirror.fields().iter().all(|info| info.is_top_level()));
    Ok(())
}

#[test]
fn same_struct_twice_gives_the_same_answers() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let a: First = mirror.template()?;
    let a_beta = *mirror.field(&a.beta)?;

    let b: First = mirror.template()?;
    assert_eq!(mirror.field(&b.beta)?.index, a_beta.index);
    assert_eq!(mirror.field(&b.beta)?.name(), a_beta.name());
    Ok(())
}

#[test]
fn separate_mirrors_are_independent() -> Result<(), IPanic> {
    let mut left = Mirror::new();
    let mut right = Mirror::new();
    let first: First = left.template()?;
    let second: Second = right.template()?;

    assert_eq!(left.field(&first.beta)?.name(), "beta");
    assert_eq!(right.field(&second.delta)?.name(), "delta");
    Ok(())
}
