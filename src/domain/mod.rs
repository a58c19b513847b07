pub mod defaults;
pub mod filters;
pub mod ids;
pub mod property;

pub use defaults::default_properties;
pub use filters::{FilterOptions, FilterSelection};
pub use property::{Property, PropertyPatch};
