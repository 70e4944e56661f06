pub mod launch;
pub mod router;

pub use launch::{get_merge_ids, list_launches, merge_launches, LaunchFilter};
pub use router::dispatch;
