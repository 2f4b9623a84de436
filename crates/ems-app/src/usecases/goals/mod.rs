pub mod create_goal;

pub use create_goal::{CreateGoal, CreateGoalError};
