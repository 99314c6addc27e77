use zeropii::{Aggregate, Email, Protectable, Role};

#[derive(Clone, Aggregate)]
struct Contact(String, #[pii(Email)] String);

#[derive(Clone, Aggregate)]
struct Marker;

fn main() {
    let contact = Contact("Jane".into(), "jane.doe@example.com".into());
    let masked = contact.mask_pii(Role::Viewer).unwrap();
    assert_eq!(masked.0, "Jane");
    assert_eq!(masked.1, "j*******@example.com");

    let _ = Marker.mask_pii(Role::Admin).unwrap();
}
