use chrono::{Datelike, NaiveDate};
use planboard_core::{AppError, AppResult, AssignmentId, MonthKey, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Lifecycle state of one resource assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Booked for a concrete month with monthly hours.
    Active,
    /// Planned over a future date range with weekly hours.
    Planned,
}

/// One record linking a person to a product/project with hours and rate.
///
/// Monthly records carry `hours_per_month`; planned records carry
/// `hours_per_week` plus a date range. The unused hours field stays zero.
/// Monthly cost is always derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAssignment {
    id: AssignmentId,
    name: NonEmptyString,
    team: NonEmptyString,
    product: NonEmptyString,
    project: NonEmptyString,
    status: AssignmentStatus,
    month: MonthKey,
    hours_per_month: u32,
    hours_per_week: u32,
    hourly_rate: u32,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    date: Option<NaiveDate>,
}

impl ResourceAssignment {
    /// Creates a validated active assignment booked against one month.
    #[allow(clippy::too_many_arguments)]
    pub fn monthly(
        id: AssignmentId,
        name: impl Into<String>,
        team: impl Into<String>,
        product: impl Into<String>,
        project: impl Into<String>,
        month: MonthKey,
        hours_per_month: u32,
        hourly_rate: u32,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            team: NonEmptyString::new(team)?,
            product: NonEmptyString::new(product)?,
            project: NonEmptyString::new(project)?,
            status: AssignmentStatus::Active,
            month,
            hours_per_month,
            hours_per_week: 0,
            hourly_rate,
            start_date: None,
            end_date: None,
            date: None,
        })
    }

    /// Creates a validated planned assignment over a date range.
    ///
    /// The record is labelled `"{team} - {project}"` and grouped under the
    /// project as its own product. Its month bucket is derived from the start
    /// date, and the start date doubles as the calendar-day key.
    pub fn planned(
        id: AssignmentId,
        team: impl Into<String>,
        project: impl Into<String>,
        hours_per_week: u32,
        hourly_rate: u32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Self> {
        if end_date < start_date {
            return Err(AppError::Validation(format!(
                "planning end date {end_date} precedes start date {start_date}"
            )));
        }

        let team = NonEmptyString::new(team)?;
        let project = NonEmptyString::new(project)?;
        let name = NonEmptyString::new(format!("{team} - {project}"))?;
        let month = MonthKey::new(start_date.year(), start_date.month())
            .unwrap_or(MonthKey::FALLBACK);

        Ok(Self {
            id,
            name,
            team,
            product: project.clone(),
            project,
            status: AssignmentStatus::Planned,
            month,
            hours_per_month: 0,
            hours_per_week,
            hourly_rate,
            start_date: Some(start_date),
            end_date: Some(end_date),
            date: Some(start_date),
        })
    }

    /// Returns the stable assignment identifier.
    #[must_use]
    pub fn id(&self) -> AssignmentId {
        self.id
    }

    /// Returns the person or label string.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the team name.
    #[must_use]
    pub fn team(&self) -> &NonEmptyString {
        &self.team
    }

    /// Returns the product grouping key.
    #[must_use]
    pub fn product(&self) -> &NonEmptyString {
        &self.product
    }

    /// Returns the project grouping key.
    #[must_use]
    pub fn project(&self) -> &NonEmptyString {
        &self.project
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn status(&self) -> AssignmentStatus {
        self.status
    }

    /// Returns the canonical month bucket.
    #[must_use]
    pub fn month(&self) -> MonthKey {
        self.month
    }

    /// Returns booked hours for the month; zero on planned records.
    #[must_use]
    pub fn hours_per_month(&self) -> u32 {
        self.hours_per_month
    }

    /// Returns planned hours per week; zero on monthly records.
    #[must_use]
    pub fn hours_per_week(&self) -> u32 {
        self.hours_per_week
    }

    /// Returns the billing rate in whole currency units per hour.
    #[must_use]
    pub fn hourly_rate(&self) -> u32 {
        self.hourly_rate
    }

    /// Returns the planning range start, if planned.
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the planning range end, if planned.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the calendar-day key used by calendar buckets.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Derived monthly cost: `hours_per_month * hourly_rate`.
    #[must_use]
    pub fn monthly_cost(&self) -> u64 {
        u64::from(self.hours_per_month) * u64::from(self.hourly_rate)
    }

    /// Derived weekly cost: `hours_per_week * hourly_rate`.
    #[must_use]
    pub fn weekly_cost(&self) -> u64 {
        u64::from(self.hours_per_week) * u64::from(self.hourly_rate)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use planboard_core::{AssignmentId, MonthKey};

    use super::{AssignmentStatus, ResourceAssignment};

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| unreachable!())
    }

    #[test]
    fn monthly_assignment_derives_cost() {
        let assignment = ResourceAssignment::monthly(
            AssignmentId::new(),
            "A",
            "Delivery",
            "P1",
            "X",
            MonthKey::normalize("2025-03"),
            40,
            1000,
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(assignment.monthly_cost(), 40_000);
        assert_eq!(assignment.status(), AssignmentStatus::Active);
        assert_eq!(assignment.hours_per_week(), 0);
    }

    #[test]
    fn monthly_assignment_rejects_blank_grouping_keys() {
        let assignment = ResourceAssignment::monthly(
            AssignmentId::new(),
            "A",
            " ",
            "P1",
            "X",
            MonthKey::FALLBACK,
            40,
            1000,
        );
        assert!(assignment.is_err());
    }

    #[test]
    fn planned_assignment_derives_label_and_month() {
        let assignment = ResourceAssignment::planned(
            AssignmentId::new(),
            "Platform",
            "Gateway",
            20,
            1500,
            day(2025, 9, 1),
            day(2025, 10, 15),
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(assignment.name().as_str(), "Platform - Gateway");
        assert_eq!(assignment.month().to_string(), "2025-09");
        assert_eq!(assignment.date(), Some(day(2025, 9, 1)));
        assert_eq!(assignment.status(), AssignmentStatus::Planned);
    }

    #[test]
    fn planned_assignment_rejects_inverted_range() {
        let assignment = ResourceAssignment::planned(
            AssignmentId::new(),
            "Platform",
            "Gateway",
            20,
            1500,
            day(2025, 10, 15),
            day(2025, 9, 1),
        );
        assert!(assignment.is_err());
    }
}
