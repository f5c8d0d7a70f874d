//! Pure, stateless transforms from a flat assignment collection into the
//! view-models the renderer consumes.
//!
//! Every function here accepts a borrowed slice and returns owned data;
//! empty input always produces an empty or all-zero result, never an error.

use std::collections::HashSet;

use chrono::NaiveDate;
use planboard_core::MonthKey;
use serde::Serialize;

use crate::ResourceAssignment;

/// Headline statistics for one month-filtered assignment set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Number of distinct member names.
    pub total_members: usize,
    /// Number of distinct project keys.
    pub total_projects: usize,
    /// Number of distinct product keys.
    pub total_products: usize,
    /// Sum of monthly hours.
    pub total_hours: u64,
    /// Sum of derived monthly costs.
    pub total_cost: u64,
    /// `total_cost / total_hours`, or `0.0` when no hours are booked.
    pub avg_hourly_rate: f64,
}

/// Cost/hours/member rollup for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRollup {
    /// Project grouping key.
    pub project: String,
    /// Sum of derived monthly costs.
    pub cost: u64,
    /// Sum of monthly hours.
    pub hours: u64,
    /// Number of assignment records in the project.
    pub members: usize,
}

/// Cost/hours/member rollup for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRollup {
    /// Team grouping key.
    pub team: String,
    /// Sum of derived monthly costs.
    pub cost: u64,
    /// Sum of monthly hours.
    pub hours: u64,
    /// Number of assignment records in the team.
    pub members: usize,
}

/// One project leaf of the product drill-down tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectGroup {
    /// Project grouping key.
    pub project: String,
    /// Member records in first-seen order.
    pub assignments: Vec<ResourceAssignment>,
}

impl ProjectGroup {
    /// Summed monthly hours over the project's records.
    #[must_use]
    pub fn hours(&self) -> u64 {
        self.assignments
            .iter()
            .map(|assignment| u64::from(assignment.hours_per_month()))
            .sum()
    }

    /// Summed monthly cost over the project's records.
    #[must_use]
    pub fn cost(&self) -> u64 {
        self.assignments
            .iter()
            .map(ResourceAssignment::monthly_cost)
            .sum()
    }

    /// Number of member records in the project.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.assignments.len()
    }
}

/// One product node of the drill-down tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductGroup {
    /// Product grouping key.
    pub product: String,
    /// Nested projects in first-seen order.
    pub projects: Vec<ProjectGroup>,
}

impl ProductGroup {
    /// Summed monthly hours over all nested projects.
    #[must_use]
    pub fn hours(&self) -> u64 {
        self.projects.iter().map(ProjectGroup::hours).sum()
    }

    /// Summed monthly cost over all nested projects.
    #[must_use]
    pub fn cost(&self) -> u64 {
        self.projects.iter().map(ProjectGroup::cost).sum()
    }

    /// Number of member records under the product.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.projects.iter().map(ProjectGroup::member_count).sum()
    }

    /// Number of nested projects.
    #[must_use]
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }
}

/// Assignments scheduled on one calendar day, with weekly-hour badges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDayBucket {
    /// The calendar day.
    pub date: NaiveDate,
    /// Records whose calendar-day key equals `date`.
    pub assignments: Vec<ResourceAssignment>,
    /// Sum of weekly hours over the day's records.
    pub total_hours: u64,
    /// Sum of derived weekly costs over the day's records.
    pub total_cost: u64,
}

/// Returns the records whose month bucket equals `month`.
#[must_use]
pub fn filter_by_month(
    assignments: &[ResourceAssignment],
    month: MonthKey,
) -> Vec<ResourceAssignment> {
    assignments
        .iter()
        .filter(|assignment| assignment.month() == month)
        .cloned()
        .collect()
}

/// Computes headline statistics over an assignment set.
#[must_use]
pub fn summary_stats(assignments: &[ResourceAssignment]) -> SummaryStats {
    let mut members = HashSet::new();
    let mut projects = HashSet::new();
    let mut products = HashSet::new();
    let mut total_hours = 0_u64;
    let mut total_cost = 0_u64;

    for assignment in assignments {
        members.insert(assignment.name().as_str());
        projects.insert(assignment.project().as_str());
        products.insert(assignment.product().as_str());
        total_hours += u64::from(assignment.hours_per_month());
        total_cost += assignment.monthly_cost();
    }

    let avg_hourly_rate = if total_hours > 0 {
        total_cost as f64 / total_hours as f64
    } else {
        0.0
    };

    SummaryStats {
        total_members: members.len(),
        total_projects: projects.len(),
        total_products: products.len(),
        total_hours,
        total_cost,
        avg_hourly_rate,
    }
}

/// Groups records into the product → project drill-down tree.
///
/// Products and projects keep the order in which they were first seen, so
/// the rendered tree is stable across recomputations of the same input.
#[must_use]
pub fn group_hierarchy(assignments: &[ResourceAssignment]) -> Vec<ProductGroup> {
    let mut products: Vec<ProductGroup> = Vec::new();

    for assignment in assignments {
        let product_index = match products
            .iter()
            .position(|group| group.product == assignment.product().as_str())
        {
            Some(index) => index,
            None => {
                products.push(ProductGroup {
                    product: assignment.product().as_str().to_owned(),
                    projects: Vec::new(),
                });
                products.len() - 1
            }
        };

        let projects = &mut products[product_index].projects;
        let project_index = match projects
            .iter()
            .position(|group| group.project == assignment.project().as_str())
        {
            Some(index) => index,
            None => {
                projects.push(ProjectGroup {
                    project: assignment.project().as_str().to_owned(),
                    assignments: Vec::new(),
                });
                projects.len() - 1
            }
        };

        projects[project_index].assignments.push(assignment.clone());
    }

    products
}

/// Ranks projects by descending cost and returns the top `limit`.
///
/// The sort is stable, so two projects with equal cost keep the order in
/// which they first appeared in the input.
#[must_use]
pub fn rank_projects(assignments: &[ResourceAssignment], limit: usize) -> Vec<ProjectRollup> {
    let mut rollups: Vec<ProjectRollup> = Vec::new();

    for assignment in assignments {
        let index = match rollups
            .iter()
            .position(|rollup| rollup.project == assignment.project().as_str())
        {
            Some(index) => index,
            None => {
                rollups.push(ProjectRollup {
                    project: assignment.project().as_str().to_owned(),
                    cost: 0,
                    hours: 0,
                    members: 0,
                });
                rollups.len() - 1
            }
        };

        let rollup = &mut rollups[index];
        rollup.cost += assignment.monthly_cost();
        rollup.hours += u64::from(assignment.hours_per_month());
        rollup.members += 1;
    }

    rollups.sort_by(|left, right| right.cost.cmp(&left.cost));
    rollups.truncate(limit);
    rollups
}

/// Rolls records up by team, sorted by descending cost.
#[must_use]
pub fn group_by_team(assignments: &[ResourceAssignment]) -> Vec<TeamRollup> {
    let mut rollups: Vec<TeamRollup> = Vec::new();

    for assignment in assignments {
        let index = match rollups
            .iter()
            .position(|rollup| rollup.team == assignment.team().as_str())
        {
            Some(index) => index,
            None => {
                rollups.push(TeamRollup {
                    team: assignment.team().as_str().to_owned(),
                    cost: 0,
                    hours: 0,
                    members: 0,
                });
                rollups.len() - 1
            }
        };

        let rollup = &mut rollups[index];
        rollup.cost += assignment.monthly_cost();
        rollup.hours += u64::from(assignment.hours_per_month());
        rollup.members += 1;
    }

    rollups.sort_by(|left, right| right.cost.cmp(&left.cost));
    rollups
}

/// Collects the records scheduled on one calendar day.
///
/// Matching compares calendar-day keys only; hours and cost badges come from
/// weekly hours since day-level records are planning records.
#[must_use]
pub fn calendar_bucket(assignments: &[ResourceAssignment], date: NaiveDate) -> CalendarDayBucket {
    let matched: Vec<ResourceAssignment> = assignments
        .iter()
        .filter(|assignment| assignment.date() == Some(date))
        .cloned()
        .collect();

    let total_hours = matched
        .iter()
        .map(|assignment| u64::from(assignment.hours_per_week()))
        .sum();
    let total_cost = matched.iter().map(ResourceAssignment::weekly_cost).sum();

    CalendarDayBucket {
        date,
        assignments: matched,
        total_hours,
        total_cost,
    }
}
