mod observers;
mod property_store;

pub use observers::{ChangeOrigin, Subscription};
pub use property_store::{Durability, PropertyStore, DEFAULT_STORAGE_KEY};
