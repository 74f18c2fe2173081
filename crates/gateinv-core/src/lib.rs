//! gateinv core: extract, resolve and inventory index-addressed bootstrap payloads.
//!
//! A captured page embeds a JSON array in a `enqueue("...")` call. Slots in
//! that array refer to each other by integer index; [`resolver`] turns one
//! slot into a self-contained [`resolver::ResolvedValue`] and [`inventory`]
//! aggregates the named entries across a corpus scanned by [`scan`].

pub mod config;
pub mod logging;

pub mod har;
pub mod inventory;
pub mod payload;
pub mod resolver;
pub mod scan;
