use mirror::{Mirror, Reflect};
use mirror_testhelpers::{IPanic, test};

#[derive(Reflect, Default)]
pub struct StreetAddress {
    pub number: i32,
    pub street: String,
    pub postcode: i32,
}

#[test]
fn fields_resolve_by_value() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let mut address = StreetAddress::default();
    mirror.reflect(&mut address)?;

    assert_eq!(mirror.field(&address.number)?.name(), "number");
    assert_eq!(mirror.field(&address.postcode)?.name(), "postcode");
    assert_eq!(mirror.field(&address.street)?.name(), "street");
    Ok(())
}

#[test]
fn same_type_fields_get_offsets_in_declaration_order() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let address: StreetAddress = mirror.template()?;

    assert_eq!(address.number, 0);
    assert_eq!(address.postcode, 1);
    // first string field, independent of the i32 counter
    assert_eq!(address.street, "0");
    Ok(())
}

#[test]
fn descriptors_carry_declared_types() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let address: StreetAddress = mirror.template()?;

    let street = mirror.field(&address.street)?;
    assert_eq!(street.type_name(), "String");
    assert!(street.shape().is_type::<String>());
    assert!(street.is_top_level());
    assert_eq!(street.index, 1);
    assert_eq!(mirror.path(&address.street)?, ".street");
    Ok(())
}

#[test]
fn table_lists_fields_in_order() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    assert!(mirror.is_empty());
    assert!(mirror.root().is_none());

    let _: StreetAddress = mirror.template()?;

    let names: Vec<_> = mirror.fields().iter().map(|info| info.name()).collect();
    assert_eq!(names, ["number", "street", "postcode"]);
    assert_eq!(mirror.len(), 3);
    assert_eq!(mirror.root(), Some(StreetAddress::SHAPE));
    Ok(())
}

#[test]
fn descriptors_are_pairwise_distinct() -> Result<(), IPanic> {
    let mut mirror = Mirror::new();
    let address: StreetAddress = mirror.template()?;

    let found = [
        *mirror.field(&address.number)?,
        *mirror.field(&address.street)?,
        *mirror.field(&address.postcode)?,
    ];
    for (i, a) in found.iter().enumerate() {
        for b in &found[i + 1..] {
            assert_ne!(a, b);
        }
    }
    Ok(())
}
