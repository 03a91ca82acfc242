//! GroupForge Core - Domain types for multi-session group assignment
//!
//! This crate provides the fundamental data model shared by every GroupForge crate:
//! - People, groups and the problem definition
//! - Assignments of people to groups per session
//! - The closed set of constraint kinds a problem can declare

pub mod assignment;
pub mod constraint;
pub mod error;
pub mod model;


pub use assignment::{dedupe_assignments, reassign, Assignment};
pub use constraint::{
    AttributeBalance, BalanceMode, Constraint, ConstraintKind, ImmovablePeople, ImmovablePerson,
    PenaltyFunction, RepeatEncounter, Severity, ShouldNotBeTogether, StayTogether,
};
pub use error::{GroupForgeError, Result};
pub use model::{Group, Person, Problem};
