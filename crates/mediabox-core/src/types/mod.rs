//! Core type definitions used across the Mediabox workspace.

pub mod category;
pub mod condition;

pub use category::CategoryRef;
pub use condition::{Condition, ConditionOp, ConditionValue};
