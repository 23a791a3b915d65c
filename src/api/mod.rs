//! HTTP surface for the viewer frontend.
//!
//! The frontend is a thin display layer; everything it fetches — patient
//! ids, snapshot timestamps, the summary plus ordered notes — comes from
//! these endpoints. Match failures never reach this layer: only
//! data-loading problems become HTTP errors.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;
