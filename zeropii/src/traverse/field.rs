//! The two traversal traits and their std/chrono implementations.
//!
//! - [`Aggregate`]: a struct with a schema, produced by `#[derive(Aggregate)]`
//! - [`Field`]: anything that can appear as a field of an aggregate
//!
//! ## Container Implementations
//!
//! `Option<T>` and `Box<T>` take the shape of `T`. `Vec<T>` is a sequence when
//! `T` is an aggregate and opaque otherwise. Strings are `Text`; numbers,
//! booleans and timestamps are `Opaque` and never walked. `PhantomData<T>` is
//! opaque for every `T`, so marker fields need no annotation.
//!
//! ## Foreign Types
//!
//! Unannotated fields must implement [`Field`], so a foreign type needs either
//! a local `Field` impl or `#[pii(skip)]` on the field.

use super::visitor::{FieldVisitor, PathSegment};
use crate::schema::{FieldShape, Schema};

/// A type-safe view of a field's string payload.
pub enum TextSlot<'a> {
    /// The field holds a string that can be rewritten in place.
    Present(&'a mut String),
    /// The field is a string field with no value (`None`).
    Absent,
    /// The field is not a string field.
    NotText,
}

/// A struct whose fields are described by a static schema and walked by a
/// visitor.
///
/// Implemented by `#[derive(Aggregate)]`; implementing it by hand is possible
/// but the schema and the walk must then be kept in sync manually.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Aggregate`",
    label = "this type has no PII schema",
    note = "use `#[derive(Aggregate)]` on the type definition"
)]
pub trait Aggregate: Sized {
    /// The ordered field descriptors of this type.
    fn describe() -> Schema;

    /// Walks the fields in declaration order, handing every sensitive string
    /// to `visitor` and recursing into nested aggregates and sequences.
    fn walk<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<(), V::Error>;
}

/// A value that may appear as a field of an [`Aggregate`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as an aggregate field",
    label = "this type does not implement `Field`",
    note = "derive `Aggregate` on the type, or annotate the field with `#[pii(skip)]`"
)]
pub trait Field {
    /// The shape recorded in the owning aggregate's schema.
    fn shape() -> FieldShape;

    /// Recurses into nested aggregates. Leaves do nothing.
    fn walk_field<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<(), V::Error> {
        let _ = visitor;
        Ok(())
    }

    /// Exposes the string payload of text fields.
    fn text_mut(&mut self) -> TextSlot<'_> {
        TextSlot::NotText
    }
}

impl Field for String {
    fn shape() -> FieldShape {
        FieldShape::Text
    }

    fn text_mut(&mut self) -> TextSlot<'_> {
        TextSlot::Present(self)
    }
}

macro_rules! impl_field_opaque {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Field for $ty {
                fn shape() -> FieldShape {
                    FieldShape::Opaque
                }
            }
        )*
    };
}

impl_field_opaque!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, (),
);
impl_field_opaque!(chrono::NaiveDate, chrono::NaiveDateTime, serde_json::Value);

impl<Tz: chrono::TimeZone> Field for chrono::DateTime<Tz> {
    fn shape() -> FieldShape {
        FieldShape::Opaque
    }
}

impl<T: ?Sized> Field for std::marker::PhantomData<T> {
    fn shape() -> FieldShape {
        FieldShape::Opaque
    }
}

impl<T: Field> Field for Option<T> {
    fn shape() -> FieldShape {
        T::shape()
    }

    fn walk_field<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<(), V::Error> {
        match self {
            Some(value) => value.walk_field(visitor),
            None => Ok(()),
        }
    }

    fn text_mut(&mut self) -> TextSlot<'_> {
        match self {
            Some(value) => value.text_mut(),
            None => TextSlot::Absent,
        }
    }
}

impl<T: Field> Field for Box<T> {
    fn shape() -> FieldShape {
        T::shape()
    }

    fn walk_field<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<(), V::Error> {
        (**self).walk_field(visitor)
    }

    fn text_mut(&mut self) -> TextSlot<'_> {
        (**self).text_mut()
    }
}

impl<T: Field> Field for Vec<T> {
    fn shape() -> FieldShape {
        match T::shape() {
            FieldShape::Nested(schema) | FieldShape::Sequence(schema) => {
                FieldShape::Sequence(schema)
            }
            FieldShape::Text | FieldShape::Opaque => FieldShape::Opaque,
        }
    }

    fn walk_field<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<(), V::Error> {
        for (index, element) in self.iter_mut().enumerate() {
            visitor.enter(PathSegment::Index(index));
            let result = element.walk_field(visitor);
            visitor.leave();
            result?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::SensitivityKind;
    use crate::error::SchemaError;

    /// Records every segment and every visited value.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl FieldVisitor for Recorder {
        type Error = SchemaError;

        fn enter(&mut self, segment: PathSegment) {
            self.events.push(format!("enter {segment}"));
        }

        fn leave(&mut self) {
            self.events.push("leave".to_string());
        }

        fn visit_text(&mut self, kind: SensitivityKind, value: &mut String) -> Result<(), SchemaError> {
            self.events.push(format!("visit {kind} {value}"));
            value.make_ascii_uppercase();
            Ok(())
        }
    }

    #[derive(Clone, crate::Aggregate)]
    struct Item {
        #[pii]
        code: String,
    }

    #[test]
    fn phantom_marker_is_opaque_for_any_parameter() {
        struct NotAField;

        #[derive(crate::Aggregate)]
        struct Tagged<M> {
            #[pii]
            value: String,
            _marker: std::marker::PhantomData<M>,
        }

        assert!(matches!(
            <std::marker::PhantomData<NotAField>>::shape(),
            FieldShape::Opaque
        ));
        crate::schema::validate::<Tagged<NotAField>>().unwrap();

        let mut tagged = Tagged::<NotAField> {
            value: "abc".to_string(),
            _marker: std::marker::PhantomData,
        };
        let mut recorder = Recorder::default();
        tagged.walk(&mut recorder).unwrap();
        assert_eq!(tagged.value, "ABC");
        assert_eq!(
            recorder.events,
            ["enter value", "visit generic-pii abc", "leave", "enter _marker", "leave"]
        );
    }

    #[test]
    fn string_is_text() {
        assert!(matches!(String::shape(), FieldShape::Text));
        let mut value = "abc".to_string();
        assert!(matches!(value.text_mut(), TextSlot::Present(_)));
    }

    #[test]
    fn scalars_and_timestamps_are_opaque() {
        assert!(matches!(bool::shape(), FieldShape::Opaque));
        assert!(matches!(u64::shape(), FieldShape::Opaque));
        assert!(matches!(
            <chrono::DateTime<chrono::Utc>>::shape(),
            FieldShape::Opaque
        ));
        assert!(matches!(true.text_mut(), TextSlot::NotText));
    }

    #[test]
    fn option_takes_inner_shape() {
        assert!(matches!(<Option<String>>::shape(), FieldShape::Text));
        assert!(matches!(<Option<Item>>::shape(), FieldShape::Nested(_)));
        let mut none: Option<String> = None;
        assert!(matches!(none.text_mut(), TextSlot::Absent));
    }

    #[test]
    fn vec_of_strings_is_opaque() {
        assert!(matches!(<Vec<String>>::shape(), FieldShape::Opaque));
        assert!(matches!(<Vec<Item>>::shape(), FieldShape::Sequence(_)));
        assert!(matches!(<Vec<Option<Item>>>::shape(), FieldShape::Sequence(_)));
    }

    #[test]
    fn vec_walks_elements_in_order_with_indices() {
        let mut items = vec![
            Item {
                code: "a".to_string(),
            },
            Item {
                code: "b".to_string(),
            },
        ];
        let mut recorder = Recorder::default();
        items.walk_field(&mut recorder).unwrap();

        assert_eq!(
            recorder.events,
            [
                "enter [0]",
                "enter code",
                "visit generic-pii a",
                "leave",
                "leave",
                "enter [1]",
                "enter code",
                "visit generic-pii b",
                "leave",
                "leave",
            ]
        );
        assert_eq!(items[0].code, "A");
        assert_eq!(items[1].code, "B");
    }

    #[test]
    fn boxed_aggregate_is_walked() {
        let mut boxed = Box::new(Item {
            code: "x".to_string(),
        });
        boxed.walk_field(&mut Recorder::default()).unwrap();
        assert_eq!(boxed.code, "X");
    }
}
