//! Struct binding: populating a record's fields from named parameters.
//!
//! # How a record describes itself
//!
//! There is no runtime reflection. A bindable record implements [`Bind`],
//! which hands out one [`Field`] per settable field, in declaration order:
//!
//! ```text
//! struct Signup { name: String, age: u8, address: Address }
//!        ↓ bindable!(Signup { name = "Name", age = "Age", #[record] address })
//! fields() → [ Field("Name", Slot::Str(&mut name)),
//!              Field("Age",  Slot::U8(&mut age)),
//!              Field("address", Slot::Record(&mut address)) ]
//! ```
//!
//! Fields left out of the list are private to the record and never touched.
//! The slot borrows the field mutably, so the binder writes straight into
//! the record without copying it.
//!
//! # Failure policy
//!
//! | Situation | Outcome |
//! |---|---|
//! | no parameter with the field's name | field untouched |
//! | parameter present, value does not parse | field untouched, binding continues |
//! | parameter present, field type unsupported | [`Error::UnknownType`], binding stops |
//! | nested record fails | that error, binding stops |

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use crate::codec::DecodeProtobuf;
use crate::error::Error;
use crate::param::{CoerceError, Param};

// ── Bind ──────────────────────────────────────────────────────────────────────

/// A record the binder can populate.
///
/// Usually implemented with [`bindable!`](crate::bindable).
pub trait Bind {
    /// The settable fields of `self`, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;

    /// Exposes the record as a protobuf message, if it is one.
    fn protobuf(&mut self) -> Option<&mut dyn DecodeProtobuf> {
        None
    }
}

/// One settable field: the parameter name it answers to and a mutable
/// view of its storage.
pub struct Field<'a> {
    name: &'static str,
    slot: Slot<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, slot: Slot<'a>) -> Self {
        Self { name, slot }
    }

    pub fn name(&self) -> &'static str { self.name }
}

/// Mutable storage of a field, tagged by how the binder coerces into it.
pub enum Slot<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Str(&'a mut String),
    /// A nested record, bound against the same parameter list.
    Record(&'a mut dyn Bind),
    /// A field the binder cannot set. Carries the Rust type name.
    Unsupported(&'static str),
}

// ── IntoSlot ──────────────────────────────────────────────────────────────────

/// Maps a field's Rust type to its [`Slot`].
///
/// Nested records are not covered here; they are declared with `#[record]`
/// in [`bindable!`](crate::bindable) and become [`Slot::Record`].
pub trait IntoSlot {
    fn into_slot(&mut self) -> Slot<'_>;
}

macro_rules! scalar_slots {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntoSlot for $ty {
                fn into_slot(&mut self) -> Slot<'_> { Slot::$variant(self) }
            }
        )*
    };
}

scalar_slots! {
    bool   => Bool,
    i8     => I8,
    i16    => I16,
    i32    => I32,
    i64    => I64,
    isize  => Isize,
    u8     => U8,
    u16    => U16,
    u32    => U32,
    u64    => U64,
    usize  => Usize,
    f32    => F32,
    f64    => F64,
    String => Str,
}

fn unsupported<'a, T: ?Sized>() -> Slot<'a> {
    Slot::Unsupported(std::any::type_name::<T>())
}

impl IntoSlot for char {
    fn into_slot(&mut self) -> Slot<'_> { unsupported::<Self>() }
}

impl<T> IntoSlot for Vec<T> {
    fn into_slot(&mut self) -> Slot<'_> { unsupported::<Self>() }
}

impl<T> IntoSlot for Option<T> {
    fn into_slot(&mut self) -> Slot<'_> { unsupported::<Self>() }
}

impl<T: ?Sized> IntoSlot for Box<T> {
    fn into_slot(&mut self) -> Slot<'_> { unsupported::<Self>() }
}

impl<K, V, S> IntoSlot for HashMap<K, V, S> {
    fn into_slot(&mut self) -> Slot<'_> { unsupported::<Self>() }
}

impl<K, V> IntoSlot for BTreeMap<K, V> {
    fn into_slot(&mut self) -> Slot<'_> { unsupported::<Self>() }
}

// ── bindable! ─────────────────────────────────────────────────────────────────

/// Implements [`Bind`] for a record by listing its settable fields.
///
/// - `field` binds from the parameter named `"field"`.
/// - `field = "Name"` binds from the parameter named `"Name"`.
/// - `#[record] field` recurses into a nested record.
/// - A leading `#[protobuf]` exposes the record as a protobuf message.
///
/// ```rust
/// use tsu_bind::{bindable, bind_params, Param};
///
/// #[derive(Default)]
/// struct Address { city: String }
///
/// #[derive(Default)]
/// struct Signup { name: String, age: u8, address: Address }
///
/// bindable!(Address { city });
/// bindable!(Signup { name = "Name", age = "Age", #[record] address });
///
/// let params = [Param::new("Name", "Alice"), Param::new("Age", "30"), Param::new("city", "Oslo")];
/// let mut signup = Signup::default();
/// bind_params(&mut signup, &params).unwrap();
/// assert_eq!((signup.name.as_str(), signup.age, signup.address.city.as_str()), ("Alice", 30, "Oslo"));
/// ```
#[macro_export]
macro_rules! bindable {
    (@name $field:ident) => { ::std::stringify!($field) };
    (@name $field:ident $name:literal) => { $name };

    (@slot [] $place:expr) => { $crate::IntoSlot::into_slot($place) };
    (@slot [record] $place:expr) => { $crate::Slot::Record($place) };

    (@cap []) => {};
    (@cap [protobuf]) => {
        fn protobuf(&mut self) -> ::std::option::Option<&mut dyn $crate::DecodeProtobuf> {
            ::std::option::Option::Some(self)
        }
    };

    (
        $(#[$cap:ident])?
        $ty:ty {
            $( $(#[$kind:ident])? $field:ident $(= $name:literal)? ),* $(,)?
        }
    ) => {
        impl $crate::Bind for $ty {
            fn fields(&mut self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![
                    $(
                        $crate::Field::new(
                            $crate::bindable!(@name $field $($name)?),
                            $crate::bindable!(@slot [$($kind)?] (&mut self.$field)),
                        )
                    ),*
                ]
            }

            $crate::bindable!(@cap [$($cap)?]);
        }
    };
}

// ── bind_params ───────────────────────────────────────────────────────────────

/// Binds `params` into `target`'s fields by exact, case-sensitive name.
///
/// The first parameter with a matching name wins. Nested records see the
/// whole parameter list, unprefixed. See the [module docs](self) for the
/// failure policy.
pub fn bind_params(target: &mut dyn Bind, params: &[Param]) -> Result<(), Error> {
    for Field { name, slot } in target.fields() {
        bind_field(name, slot, params)?;
    }
    Ok(())
}

fn bind_field(name: &'static str, slot: Slot<'_>, params: &[Param]) -> Result<(), Error> {
    let value = params.iter().find(|p| p.name() == name).map(Param::value);

    // Narrowing casts truncate to the width of the field.
    match (slot, value) {
        (Slot::Record(inner), _) => return bind_params(inner, params),
        (_, None)                => {}
        (Slot::Bool(f),  Some(v)) => store(name, f, v.as_bool()),
        (Slot::I8(f),    Some(v)) => store(name, f, v.as_i64().map(|n| n as i8)),
        (Slot::I16(f),   Some(v)) => store(name, f, v.as_i64().map(|n| n as i16)),
        (Slot::I32(f),   Some(v)) => store(name, f, v.as_i64().map(|n| n as i32)),
        (Slot::I64(f),   Some(v)) => store(name, f, v.as_i64()),
        (Slot::Isize(f), Some(v)) => store(name, f, v.as_i64().map(|n| n as isize)),
        (Slot::U8(f),    Some(v)) => store(name, f, v.as_u64().map(|n| n as u8)),
        (Slot::U16(f),   Some(v)) => store(name, f, v.as_u64().map(|n| n as u16)),
        (Slot::U32(f),   Some(v)) => store(name, f, v.as_u64().map(|n| n as u32)),
        (Slot::U64(f),   Some(v)) => store(name, f, v.as_u64()),
        (Slot::Usize(f), Some(v)) => store(name, f, v.as_u64().map(|n| n as usize)),
        (Slot::F32(f),   Some(v)) => store(name, f, v.as_f64().map(|n| n as f32)),
        (Slot::F64(f),   Some(v)) => store(name, f, v.as_f64()),
        (Slot::Str(f),   Some(v)) => *f = v.as_str().to_owned(),
        (Slot::Unsupported(ty), Some(_)) => return Err(Error::UnknownType { field: name, ty }),
    }
    Ok(())
}

fn store<T>(name: &'static str, field: &mut T, parsed: Result<T, CoerceError>) {
    match parsed {
        Ok(v) => *field = v,
        Err(e) => trace!(field = name, error = %e, "skipping field with malformed value"),
    }
}
