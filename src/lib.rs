// `env::set_var`/`remove_var` are `unsafe fn` as of the 2024 edition; a
// handful of config/path tests below need them to pin `HOME` for the
// duration of one assertion. `deny` (rather than `forbid`) lets those test
// functions carry a local `#[allow(unsafe_code)]`; production code carries
// none.
#![deny(unsafe_code)]

//! meshfs — concurrent filesystem scanner and LAN peer discovery/fan-out.
//!
//! Two subsystems:
//! 1. **Scanner** (`scanner`) — a bounded worker-pool breadth-first
//!    directory walk producing a nested result tree, with per-directory
//!    error isolation and three scan modes (shallow/deep/search).
//! 2. **Net** (`net`) — private-subnet peer discovery with a hard per-probe
//!    deadline, and a fan-out dispatcher that broadcasts search requests
//!    across the discovered peer set with partial-failure tolerance.

pub mod core;
pub mod net;
pub mod scanner;

pub mod prelude;
