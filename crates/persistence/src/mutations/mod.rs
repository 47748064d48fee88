// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `fees`: fee creation, transactional payment updates and deletion
//! - `roster`: roster inserts used for seeding
//!
//! Backend-specific helpers (e.g., `get_last_insert_rowid()`) come from
//! the `backend` module. Everything else is Diesel DSL.

pub mod fees;
pub mod roster;
