pub use herald_core::prelude::*;

// vim: ts=4
