pub mod derive;
pub mod live;
pub mod types;

pub use derive::field_type_for;
pub use live::quote_ident;
pub use types::{Column, FieldType, Schema};
