pub use crate::app::{App, AppState};

pub use herald_types::prelude::*;

// vim: ts=4
