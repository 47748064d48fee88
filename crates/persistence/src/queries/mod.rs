// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `fees`: scoped fee listings, full filtered sets for statistics, single reads
//! - `roster`: students, batches, users and teaching assignments

pub mod fees;
pub mod roster;
