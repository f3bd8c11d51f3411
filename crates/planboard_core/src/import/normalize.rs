//! Row normalization for CSV bulk imports.
//!
//! # Responsibility
//! - Map loose key->string rows to commitment/task creation drafts.
//! - Apply the field defaulting policy: repair, never reject.
//!
//! # Invariants
//! - Every transform is a pure, total function of its inputs.
//! - Rows are transformed independently; no cross-row state.
//! - Numeric coercion silently defaults to zero; it does not validate.
//! - A titled commitment draft always passes model validation; field
//!   repair extends to inverted date ranges.
//! - Project-name matching trims and ignores ASCII case on both sides;
//!   the first match wins.

use crate::model::commitment::{CommitmentCategory, Flexibility};
use crate::model::project::ProjectId;
use chrono::NaiveDate;

use super::reader::RawRow;

/// Expected commitment CSV headers: `type, flexibility, title, startDate, endDate`.
const COMMITMENT_TYPE: &str = "type";
const COMMITMENT_FLEXIBILITY: &str = "flexibility";
const COMMITMENT_TITLE: &str = "title";
const COMMITMENT_START_DATE: &str = "startDate";
const COMMITMENT_END_DATE: &str = "endDate";

/// Expected task CSV headers: `Project, Title, Duration, Order, Assigned To`.
const TASK_PROJECT: &str = "Project";
const TASK_TITLE: &str = "Title";
const TASK_DURATION: &str = "Duration";
const TASK_ORDER: &str = "Order";
const TASK_ASSIGNED_TO: &str = "Assigned To";

/// Date formats accepted by the best-effort parse, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Lightweight `(id, name)` view of a known project, used for
/// name-based foreign-key resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: ProjectId,
    pub name: String,
}

/// Normalized commitment-creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentDraft {
    pub category: CommitmentCategory,
    pub flexibility: Flexibility,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Normalized task-creation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub project_id: Option<ProjectId>,
    pub title: String,
    pub duration_hours: f64,
    pub order_index: i64,
    pub assigned_to: Option<String>,
}

/// Maps one commitment row to a draft, repairing every malformed field.
///
/// Category defaults to `holidays`, flexibility to `firm`, the title to
/// an empty string (the batch filter drops it later), and unparseable
/// dates fall back to `fallback_date`. An end date earlier than the
/// start date is clamped to the start date, so every titled draft
/// satisfies commitment validation.
pub fn normalize_commitment_row(row: &RawRow, fallback_date: NaiveDate) -> CommitmentDraft {
    let start_date = parse_date_loose(row.get(COMMITMENT_START_DATE)).unwrap_or(fallback_date);
    let end_date = parse_date_loose(row.get(COMMITMENT_END_DATE))
        .unwrap_or(fallback_date)
        .max(start_date);

    CommitmentDraft {
        category: field(row, COMMITMENT_TYPE)
            .and_then(CommitmentCategory::parse)
            .unwrap_or(CommitmentCategory::Holidays),
        flexibility: field(row, COMMITMENT_FLEXIBILITY)
            .and_then(Flexibility::parse)
            .unwrap_or(Flexibility::Firm),
        title: row.get(COMMITMENT_TITLE).unwrap_or_default().to_string(),
        start_date,
        end_date,
    }
}

/// Maps one task row to a draft, repairing every malformed field.
///
/// Duration coerces to `0` on non-numeric input; order coerces to the
/// row index when blank and to `0` when non-numeric; an unknown project
/// name yields `None` rather than dropping the row.
pub fn normalize_task_row(row: &RawRow, row_index: usize, projects: &[ProjectRef]) -> TaskDraft {
    TaskDraft {
        project_id: resolve_project_id(row.get(TASK_PROJECT).unwrap_or_default(), projects),
        title: row.get(TASK_TITLE).unwrap_or_default().trim().to_string(),
        duration_hours: coerce_duration(row.get(TASK_DURATION)),
        order_index: coerce_order(row.get(TASK_ORDER), row_index),
        assigned_to: field(row, TASK_ASSIGNED_TO).map(str::to_string),
    }
}

/// Normalizes a commitment batch, keeping only rows with a non-empty
/// title, in original row order.
pub fn normalize_commitment_rows(
    rows: &[RawRow],
    fallback_date: NaiveDate,
) -> Vec<CommitmentDraft> {
    rows.iter()
        .map(|row| normalize_commitment_row(row, fallback_date))
        .filter(|draft| !draft.title.is_empty())
        .collect()
}

/// Normalizes a task batch, keeping only rows with a non-empty title,
/// in original row order. Row indices are assigned before filtering so
/// a surviving row keeps the position it had in the input file.
pub fn normalize_task_rows(rows: &[RawRow], projects: &[ProjectRef]) -> Vec<TaskDraft> {
    rows.iter()
        .enumerate()
        .map(|(row_index, row)| normalize_task_row(row, row_index, projects))
        .filter(|draft| !draft.title.is_empty())
        .collect()
}

/// Resolves a project name against the known-project list.
///
/// Both sides are trimmed and compared ignoring ASCII case; the first
/// match wins. Blank or unresolved names yield `None`.
pub fn resolve_project_id(name: &str, projects: &[ProjectRef]) -> Option<ProjectId> {
    let needle = name.trim();
    if needle.is_empty() {
        return None;
    }
    projects
        .iter()
        .find(|project| project.name.trim().eq_ignore_ascii_case(needle))
        .map(|project| project.id)
}

fn field<'row>(row: &'row RawRow, key: &str) -> Option<&'row str> {
    row.get(key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_date_loose(value: Option<&str>) -> Option<NaiveDate> {
    let text = value?.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

fn coerce_duration(value: Option<&str>) -> f64 {
    let parsed = value
        .unwrap_or_default()
        .trim()
        .parse::<f64>()
        .unwrap_or(0.0);
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

fn coerce_order(value: Option<&str>, row_index: usize) -> i64 {
    let text = value.unwrap_or_default().trim();
    if text.is_empty() {
        return row_index as i64;
    }
    text.parse::<i64>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_commitment_row, normalize_commitment_rows, normalize_task_row,
        normalize_task_rows, resolve_project_id, ProjectRef,
    };
    use crate::import::reader::RawRow;
    use crate::model::commitment::{CommitmentCategory, Flexibility};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn fallback() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn website_projects() -> Vec<ProjectRef> {
        vec![ProjectRef {
            id: Uuid::new_v4(),
            name: "Website".to_string(),
        }]
    }

    #[test]
    fn blank_category_and_flexibility_take_defaults() {
        let row = RawRow::from_pairs([
            ("type", ""),
            ("flexibility", ""),
            ("title", "Offsite"),
            ("startDate", "2024-03-01"),
            ("endDate", "2024-03-03"),
        ]);

        let draft = normalize_commitment_row(&row, fallback());
        assert_eq!(draft.category, CommitmentCategory::Holidays);
        assert_eq!(draft.flexibility, Flexibility::Firm);
        assert_eq!(draft.title, "Offsite");
        assert_eq!(draft.start_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(draft.end_date, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[test]
    fn explicit_category_and_flexibility_are_kept() {
        let row = RawRow::from_pairs([
            ("type", "meetings"),
            ("flexibility", "flexible"),
            ("title", "Standup"),
        ]);

        let draft = normalize_commitment_row(&row, fallback());
        assert_eq!(draft.category, CommitmentCategory::Meetings);
        assert_eq!(draft.flexibility, Flexibility::Flexible);
    }

    #[test]
    fn unparseable_category_falls_back_to_holidays() {
        let row = RawRow::from_pairs([("type", "vacationing"), ("title", "X")]);
        let draft = normalize_commitment_row(&row, fallback());
        assert_eq!(draft.category, CommitmentCategory::Holidays);
    }

    #[test]
    fn malformed_dates_fall_back_to_supplied_date() {
        let row = RawRow::from_pairs([
            ("title", "Offsite"),
            ("startDate", "not-a-date"),
            ("endDate", ""),
        ]);

        let draft = normalize_commitment_row(&row, fallback());
        assert_eq!(draft.start_date, fallback());
        assert_eq!(draft.end_date, fallback());
    }

    #[test]
    fn inverted_dates_clamp_end_to_start() {
        let row = RawRow::from_pairs([
            ("title", "Offsite"),
            ("startDate", "2024-07-10"),
            ("endDate", "2024-07-01"),
        ]);

        let draft = normalize_commitment_row(&row, fallback());
        assert_eq!(draft.start_date, NaiveDate::from_ymd_opt(2024, 7, 10).unwrap());
        assert_eq!(draft.end_date, draft.start_date);
    }

    #[test]
    fn missing_end_date_never_lands_before_a_parsed_start() {
        // Fallback (2024-06-15) precedes the parsed start, so the clamp
        // applies to the repaired value too.
        let row = RawRow::from_pairs([("title", "Offsite"), ("startDate", "2024-07-10")]);

        let draft = normalize_commitment_row(&row, fallback());
        assert_eq!(draft.end_date, NaiveDate::from_ymd_opt(2024, 7, 10).unwrap());
    }

    #[test]
    fn slash_date_formats_are_accepted() {
        let row = RawRow::from_pairs([("title", "X"), ("startDate", "03/01/2024")]);
        let draft = normalize_commitment_row(&row, fallback());
        assert_eq!(draft.start_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn commitment_batch_drops_blank_titles_in_order() {
        let rows = vec![
            RawRow::from_pairs([("title", "First")]),
            RawRow::from_pairs([("title", "")]),
            RawRow::from_pairs([("title", "Second")]),
        ];

        let drafts = normalize_commitment_rows(&rows, fallback());
        let titles: Vec<_> = drafts.iter().map(|draft| draft.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn task_row_defaults_mirror_the_worked_example() {
        // {Project:"", Title:"Write spec", Duration:"abc", Order:""} at
        // row index 2 -> {project_id:null, title:"Write spec",
        // duration:0, order_index:2}.
        let row = RawRow::from_pairs([
            ("Project", ""),
            ("Title", "Write spec"),
            ("Duration", "abc"),
            ("Order", ""),
        ]);

        let draft = normalize_task_row(&row, 2, &website_projects());
        assert_eq!(draft.project_id, None);
        assert_eq!(draft.title, "Write spec");
        assert_eq!(draft.duration_hours, 0.0);
        assert_eq!(draft.order_index, 2);
        assert_eq!(draft.assigned_to, None);
    }

    #[test]
    fn non_numeric_order_coerces_to_zero() {
        let row = RawRow::from_pairs([("Title", "X"), ("Order", "abc")]);
        let draft = normalize_task_row(&row, 7, &[]);
        assert_eq!(draft.order_index, 0);
    }

    #[test]
    fn numeric_fields_parse_when_well_formed() {
        let row = RawRow::from_pairs([("Title", "X"), ("Duration", "2.5"), ("Order", "4")]);
        let draft = normalize_task_row(&row, 0, &[]);
        assert_eq!(draft.duration_hours, 2.5);
        assert_eq!(draft.order_index, 4);
    }

    #[test]
    fn non_finite_duration_coerces_to_zero() {
        let row = RawRow::from_pairs([("Title", "X"), ("Duration", "inf")]);
        let draft = normalize_task_row(&row, 0, &[]);
        assert_eq!(draft.duration_hours, 0.0);
    }

    #[test]
    fn task_title_is_trimmed_and_assignee_blank_maps_to_none() {
        let row = RawRow::from_pairs([
            ("Title", "  Write spec  "),
            ("Assigned To", "   "),
        ]);
        let draft = normalize_task_row(&row, 0, &[]);
        assert_eq!(draft.title, "Write spec");
        assert_eq!(draft.assigned_to, None);
    }

    #[test]
    fn assignee_is_trimmed_to_some() {
        let row = RawRow::from_pairs([("Title", "X"), ("Assigned To", " bo@example.com ")]);
        let draft = normalize_task_row(&row, 0, &[]);
        assert_eq!(draft.assigned_to.as_deref(), Some("bo@example.com"));
    }

    #[test]
    fn project_resolution_ignores_case_and_surrounding_whitespace() {
        let projects = website_projects();
        let expected = Some(projects[0].id);

        assert_eq!(resolve_project_id("  Website  ", &projects), expected);
        assert_eq!(resolve_project_id("website", &projects), expected);
        assert_eq!(resolve_project_id("WEBSITE", &projects), expected);
    }

    #[test]
    fn unresolved_or_blank_project_yields_none() {
        let projects = website_projects();
        assert_eq!(resolve_project_id("Backend", &projects), None);
        assert_eq!(resolve_project_id("   ", &projects), None);
    }

    #[test]
    fn duplicate_project_names_resolve_to_first_match() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let projects = vec![
            ProjectRef {
                id: first,
                name: "Website".to_string(),
            },
            ProjectRef {
                id: second,
                name: "WEBSITE".to_string(),
            },
        ];

        assert_eq!(resolve_project_id("website", &projects), Some(first));
    }

    #[test]
    fn task_batch_keeps_pre_filter_row_indices() {
        let rows = vec![
            RawRow::from_pairs([("Title", ""), ("Order", "")]),
            RawRow::from_pairs([("Title", "Kept"), ("Order", "")]),
        ];

        let drafts = normalize_task_rows(&rows, &[]);
        assert_eq!(drafts.len(), 1);
        // Index 1 in the input file, even though the blank row above was
        // dropped.
        assert_eq!(drafts[0].order_index, 1);
    }
}
