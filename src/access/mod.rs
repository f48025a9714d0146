//! Random-access stores and the adapters the codec drives them through.
//!
//! - [`ReadAt`] / [`WriteAt`] - positional read and write
//! - [`MemStore`] - growable in-memory store
//! - [`StoreSection`] - bounded sequential reader over a store
//! - [`OffsetWriter`] - sequential writer over a store

mod adapter;
mod store;

pub use adapter::{OffsetWriter, StoreSection};
pub(crate) use adapter::BoundedStore;
pub use store::{MemStore, ReadAt, WriteAt};
