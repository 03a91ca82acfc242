//! Problem builder.
//!
//! # Example
//!
//! ```
//! use groupforge_test::ProblemBuilder;
//!
//! let problem = ProblemBuilder::new(2)
//!     .people(&["a", "b"])
//!     .person_with("c", &[("name", "Cleo"), ("team", "red")])
//!     .group("g1", 3)
//!     .build();
//!
//! assert_eq!(problem.people.len(), 3);
//! assert_eq!(problem.display_name("c"), "Cleo");
//! ```

use groupforge_core::{Constraint, Group, Person, Problem};

/// Fluent builder for [`Problem`] fixtures.
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    problem: Problem,
}

impl ProblemBuilder {
    /// Starts a problem with `num_sessions` sessions and nothing else.
    pub fn new(num_sessions: usize) -> Self {
        Self {
            problem: Problem::new(Vec::new(), Vec::new(), num_sessions),
        }
    }

    /// Adds people without attributes.
    pub fn people(mut self, ids: &[&str]) -> Self {
        self.problem
            .people
            .extend(ids.iter().map(|id| Person::new(*id)));
        self
    }

    /// Adds a person with attributes.
    pub fn person_with(mut self, id: &str, attributes: &[(&str, &str)]) -> Self {
        let person = attributes
            .iter()
            .fold(Person::new(id), |p, (k, v)| p.with_attribute(*k, *v));
        self.problem.people.push(person);
        self
    }

    /// Adds a fully built person.
    pub fn add_person(mut self, person: Person) -> Self {
        self.problem.people.push(person);
        self
    }

    /// Adds a group.
    pub fn group(mut self, id: &str, size: usize) -> Self {
        self.problem.groups.push(Group::new(id, size));
        self
    }

    /// Appends a constraint.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.problem.constraints.push(constraint);
        self
    }

    pub fn build(self) -> Problem {
        self.problem
    }
}
