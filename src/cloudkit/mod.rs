/// Entity payload wrapper and decode entry point.
pub mod codec;
/// Typed SalonGo entities and their per-kind schema bindings.
pub mod entity;
/// Error taxonomy for client and store operations.
pub mod error;
/// Entity kinds and the per-kind descriptor table.
pub mod kind;
pub(crate) mod parse;
/// Generic records exchanged with the remote store.
pub mod record;
/// Remote client and the store capability trait.
pub mod remoteclient;
/// CloudKit Web Services store adapter.
pub mod webstore;
