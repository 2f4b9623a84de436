//! ID type wrappers for type safety.

mod id_macro;

pub mod goal_id;
pub mod user_id;

pub use goal_id::GoalId;
pub use user_id::UserId;
