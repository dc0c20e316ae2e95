// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod filter;
pub mod i18n;
pub mod link;
pub mod model;
pub mod normalize;
pub mod pagination;
pub mod state;
pub mod store;

pub use filter::*;
pub use link::*;
pub use model::*;
pub use pagination::*;
pub use state::*;
pub use store::*;
