// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod backend;
pub mod catalog;
pub mod conflict;
pub mod error;
pub mod filter;
pub mod forms;
pub mod ids;
pub mod model;
pub mod paging;
pub mod quote;
pub mod session;
pub mod state;
pub mod validation;

pub use backend::{Backend, BackendError, BackendResult};
pub use catalog::Catalog;
pub use error::{SaveError, SaveResult};
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use session::{InactivityTimer, Session};
pub use state::*;
