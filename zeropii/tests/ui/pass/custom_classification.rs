use zeropii::{Aggregate, Classification, Protectable, Role, SensitivityKind};

struct TaxId;

impl Classification for TaxId {
    const KIND: SensitivityKind = SensitivityKind::DocumentNumber;
}

#[derive(Clone, Aggregate)]
struct Filing {
    #[pii(TaxId)]
    r#tax_id: String,
    #[pii]
    notes: Option<Box<String>>,
    year: u16,
}

fn main() {
    let filing = Filing {
        r#tax_id: "ABCDE1234F".into(),
        notes: Some(Box::new("late".into())),
        year: 2024,
    };
    let schema = Filing::describe();
    assert_eq!(schema.fields[0].name, "tax_id");

    let masked = filing.mask_pii(Role::Manager).unwrap();
    assert_eq!(masked.r#tax_id, "***-**-234F");
    assert_eq!(masked.notes.as_deref().map(|notes| notes.as_str()), Some("REDACTED"));
    assert_eq!(masked.year, 2024);
}
