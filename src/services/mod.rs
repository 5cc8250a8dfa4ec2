// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod account;
pub mod groups;
pub mod matches;
pub mod profile;

pub use account::AccountService;
pub use groups::GroupService;
pub use matches::MatchService;
pub use profile::{ProfileContext, ProfileService, ProfileSnapshot};
