use std::marker::PhantomData;

use zeropii::{Aggregate, Protectable, Role};

struct Tenant;

#[derive(Aggregate)]
struct Tagged<T> {
    #[pii]
    value: String,
    _marker: PhantomData<T>,
}

fn main() {
    let tagged: Tagged<Tenant> = Tagged {
        value: "secret".into(),
        _marker: PhantomData,
    };
    let masked = tagged.mask_pii(Role::Viewer).unwrap();
    assert_eq!(masked.value, "REDACTED");

    let described = Tagged::<Tenant>::describe();
    assert_eq!(described.fields.len(), 2);
    assert!(matches!(described.fields[1].shape, zeropii::FieldShape::Opaque));
}
