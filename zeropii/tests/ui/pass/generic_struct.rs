use std::marker::PhantomData;

use zeropii::{Aggregate, DocumentNumber, Protectable, Role};

#[derive(Clone, Aggregate)]
struct Doc {
    #[pii(DocumentNumber)]
    number: String,
}

#[derive(Clone, Aggregate)]
struct Page<T, M> {
    items: Vec<T>,
    first: Option<T>,
    #[pii(skip)]
    marker: PhantomData<M>,
}

struct NotAField;

fn main() {
    let page: Page<Doc, NotAField> = Page {
        items: vec![Doc {
            number: "A1234567".into(),
        }],
        first: None,
        marker: PhantomData,
    };
    let masked = page.mask_pii(Role::Viewer).unwrap();
    assert_eq!(masked.items[0].number, "***-**-4567");
}
