//! Netlist consolidation: from freeform terminals, wires and junctions to
//! canonical node names.
//!
//! Every consumer (export, solver payload, probe, render overlay) calls the
//! same [`resolve`] entry point; there is deliberately no second mapping
//! implementation anywhere in the crate.

pub mod dsu;
pub mod ident;
pub mod nodes;

pub use dsu::DisjointSet;
pub use ident::{endpoint_key, terminal_key, NodeKey};
pub use nodes::{resolve, Resolution, GROUND_NODE};
