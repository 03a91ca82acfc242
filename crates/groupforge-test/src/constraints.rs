//! Shorthand constraint constructors.

use std::collections::BTreeMap;

use groupforge_core::{
    AttributeBalance, BalanceMode, Constraint, ImmovablePeople, ImmovablePerson, PenaltyFunction,
    RepeatEncounter, ShouldNotBeTogether, StayTogether,
};

use crate::schedule::ids;

fn sessions(sessions: &[usize]) -> Option<Vec<usize>> {
    (!sessions.is_empty()).then(|| sessions.to_vec())
}

/// `RepeatEncounter` with a linear penalty of weight 1.
pub fn repeat_encounter(max: usize) -> Constraint {
    Constraint::RepeatEncounter(RepeatEncounter {
        max_allowed_encounters: Some(max),
        penalty_function: PenaltyFunction::Linear,
        penalty_weight: None,
    })
}

/// `AttributeBalance` over the listed sessions (empty = all sessions).
pub fn attribute_balance(
    group: &str,
    key: &str,
    desired: &[(&str, usize)],
    mode: BalanceMode,
    in_sessions: &[usize],
) -> Constraint {
    let desired_values: BTreeMap<String, usize> = desired
        .iter()
        .map(|(value, count)| ((*value).to_string(), *count))
        .collect();
    Constraint::AttributeBalance(AttributeBalance {
        group_id: Some(group.to_string()),
        attribute_key: Some(key.to_string()),
        desired_values,
        mode,
        penalty_weight: None,
        sessions: sessions(in_sessions),
    })
}

pub fn immovable_person(person: &str, group: &str, in_sessions: &[usize]) -> Constraint {
    Constraint::ImmovablePerson(ImmovablePerson {
        person_id: Some(person.to_string()),
        group_id: Some(group.to_string()),
        sessions: sessions(in_sessions),
    })
}

pub fn immovable_people(people: &[&str], group: &str, in_sessions: &[usize]) -> Constraint {
    Constraint::ImmovablePeople(ImmovablePeople {
        people: ids(people),
        group_id: Some(group.to_string()),
        sessions: sessions(in_sessions),
    })
}

pub fn must_stay_together(people: &[&str], in_sessions: &[usize]) -> Constraint {
    Constraint::MustStayTogether(StayTogether {
        people: ids(people),
        sessions: sessions(in_sessions),
        penalty_weight: None,
    })
}

pub fn should_stay_together(people: &[&str], in_sessions: &[usize]) -> Constraint {
    Constraint::ShouldStayTogether(StayTogether {
        people: ids(people),
        sessions: sessions(in_sessions),
        penalty_weight: None,
    })
}

pub fn should_not_be_together(people: &[&str], in_sessions: &[usize]) -> Constraint {
    Constraint::ShouldNotBeTogether(ShouldNotBeTogether {
        people: ids(people),
        sessions: sessions(in_sessions),
        penalty_weight: None,
    })
}
