//! Helper macros shared by the data structures and configuration types.
//!
//! - [`getter_fn!`] generates a borrowing getter for a private field.
//! - [`with_field_fn!`] generates a builder-style `with_*` setter.

#[macro_export]
macro_rules! getter_fn {
    ($field_name:ident, mut $field_type:ty) => {
        paste::paste! {
            pub fn [<$field_name _mut>](&mut self) -> &mut $field_type {
                &mut self.$field_name
            }
        }
    };
    ($field_name: ident, $field_type: ty) => {
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
                self.$field_name = value;
                self
            }
        }
    };
}
