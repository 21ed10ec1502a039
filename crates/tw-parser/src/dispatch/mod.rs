//! Line handlers, one submodule per concern, matching the teacher
//! workspace's `core-actions::dispatcher` split into `motion`/`mode`/
//! `command`/`edit`/`undo` behind a single public entry point
//! ([`crate::Dispatcher::handle_line`]).

pub mod cim;
pub mod density;
pub mod fig_scan;
pub mod messages;
pub mod mines;
pub mod planet;
pub mod port;
pub mod prompt;
pub mod sector;
pub mod ship;
pub mod stats;
pub mod trader;
pub mod version;
pub mod warp;
