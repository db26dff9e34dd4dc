//! Storage adapters - implementations of the profile store port.

mod firestore_store;
mod in_memory_store;

pub use firestore_store::FirestoreProfileStore;
pub use in_memory_store::InMemoryProfileStore;
