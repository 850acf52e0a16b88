use crate::engine::duration::round2;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use utoipa::ToSchema;

/// Personal dashboard numbers for one employee's full history.
#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    #[schema(example = 18)]
    pub present_days: usize,
    #[schema(example = 2)]
    pub late_days: usize,
    #[schema(example = 161.25)]
    pub total_hours: f64,
}

/// One-day roster partition: On-Time / Late / inferred Absent.
#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    #[schema(value_type = String, format = "date", example = "2026-08-30")]
    pub date: NaiveDate,
    #[schema(example = 4)]
    pub total: usize,
    #[schema(example = 1)]
    pub present: usize,
    #[schema(example = 1)]
    pub late: usize,
    #[schema(example = 2)]
    pub absent: usize,
}

/// Per-department attendance for a fixed date.
#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct DepartmentAttendance {
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = 3)]
    pub present: usize,
    #[schema(example = 5)]
    pub total: usize,
}

/// Counts of Present/Late days and summed worked hours across `records`.
/// Open sessions contribute zero hours until checkout.
pub fn employee_summary(records: &[AttendanceRecord]) -> EmployeeSummary {
    EmployeeSummary {
        present_days: records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count(),
        late_days: records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Late)
            .count(),
        total_hours: round2(records.iter().map(|r| r.total_hours).sum()),
    }
}

/// Partitions the roster for `date` into On-Time (Present), Late and Absent.
///
/// Absence is never stored: an employee with no record for a past-or-current
/// date is Absent. `absent` is floored at 0 to tolerate malformed input
/// (more records than roster members), and future dates have no absentees.
pub fn roster_summary(
    employees: &[Employee],
    records: &[AttendanceRecord],
    date: NaiveDate,
    today: NaiveDate,
) -> RosterSummary {
    let ids: HashSet<u64> = employees.iter().map(|e| e.id).collect();
    let on_date: Vec<_> = records
        .iter()
        .filter(|r| r.date == date && ids.contains(&r.employee_id))
        .collect();

    let present = on_date
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();
    let late = on_date
        .iter()
        .filter(|r| r.status == AttendanceStatus::Late)
        .count();
    let absent = if date > today {
        0
    } else {
        employees.len().saturating_sub(present + late)
    };

    RosterSummary {
        date,
        total: employees.len(),
        present,
        late,
        absent,
    }
}

/// Groups the roster by department; an employee counts as present when a
/// Present-or-Late record exists for them on `date`.
pub fn department_breakdown(
    employees: &[Employee],
    records: &[AttendanceRecord],
    date: NaiveDate,
) -> Vec<DepartmentAttendance> {
    let attended: HashSet<u64> = records
        .iter()
        .filter(|r| {
            r.date == date
                && matches!(
                    r.status,
                    AttendanceStatus::Present | AttendanceStatus::Late
                )
        })
        .map(|r| r.employee_id)
        .collect();

    let mut departments: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for employee in employees {
        let entry = departments.entry(employee.department.as_str()).or_default();
        entry.1 += 1;
        if attended.contains(&employee.id) {
            entry.0 += 1;
        }
    }

    departments
        .into_iter()
        .map(|(department, (present, total))| DepartmentAttendance {
            department: department.to_string(),
            present,
            total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;
    use chrono::NaiveDateTime;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn employee(id: u64, department: &str) -> Employee {
        Employee {
            id,
            name: format!("Employee {id}"),
            email: format!("e{id}@company.com"),
            role: Role::Employee,
            employee_code: format!("EMP{id:03}"),
            department: department.to_string(),
            avatar: None,
        }
    }

    fn record(id: u64, employee_id: u64, day: &str, status: AttendanceStatus, hours: f64) -> AttendanceRecord {
        let check_in = NaiveDateTime::parse_from_str(
            &format!("{day} 09:00:00"),
            "%Y-%m-%d %H:%M:%S",
        )
        .unwrap();
        AttendanceRecord {
            id,
            employee_id,
            date: date(day),
            check_in_time: Some(check_in),
            check_out_time: None,
            status,
            total_hours: hours,
        }
    }

    #[test]
    fn employee_summary_counts_days_and_sums_hours() {
        let records = vec![
            record(1, 1, "2026-08-27", AttendanceStatus::Present, 8.5),
            record(2, 1, "2026-08-28", AttendanceStatus::Late, 7.25),
            record(3, 1, "2026-08-29", AttendanceStatus::Present, 8.0),
            // open session today: zero hours until checkout
            record(4, 1, "2026-08-30", AttendanceStatus::Present, 0.0),
        ];

        let summary = employee_summary(&records);
        assert_eq!(summary.present_days, 3);
        assert_eq!(summary.late_days, 1);
        assert_eq!(summary.total_hours, 23.75);
    }

    #[test]
    fn empty_history_summarizes_to_zero() {
        let summary = employee_summary(&[]);
        assert_eq!(
            summary,
            EmployeeSummary {
                present_days: 0,
                late_days: 0,
                total_hours: 0.0
            }
        );
    }

    #[test]
    fn roster_partition_adds_up_to_roster_size() {
        let employees = vec![
            employee(1, "Engineering"),
            employee(2, "Product"),
            employee(3, "Design"),
            employee(4, "Engineering"),
        ];
        let records = vec![
            record(1, 1, "2026-08-30", AttendanceStatus::Present, 0.0),
            record(2, 3, "2026-08-30", AttendanceStatus::Late, 0.0),
        ];

        let summary = roster_summary(&employees, &records, date("2026-08-30"), date("2026-08-30"));
        assert_eq!(summary.present, 1);
        assert_eq!(summary.late, 1);
        assert_eq!(summary.absent, 2);
        assert_eq!(summary.present + summary.late + summary.absent, summary.total);
    }

    #[test]
    fn records_outside_roster_or_date_are_ignored() {
        let employees = vec![employee(1, "Engineering")];
        let records = vec![
            record(1, 99, "2026-08-30", AttendanceStatus::Present, 0.0),
            record(2, 1, "2026-08-29", AttendanceStatus::Present, 8.0),
        ];

        let summary = roster_summary(&employees, &records, date("2026-08-30"), date("2026-08-30"));
        assert_eq!(summary.present, 0);
        assert_eq!(summary.absent, 1);
    }

    #[test]
    fn absent_count_floors_at_zero() {
        // malformed input: more same-day records than roster members
        let employees = vec![employee(1, "Engineering")];
        let records = vec![
            record(1, 1, "2026-08-30", AttendanceStatus::Present, 0.0),
            record(2, 1, "2026-08-30", AttendanceStatus::Late, 0.0),
        ];

        let summary = roster_summary(&employees, &records, date("2026-08-30"), date("2026-08-30"));
        assert_eq!(summary.absent, 0);
    }

    #[test]
    fn future_dates_have_no_absentees() {
        let employees = vec![employee(1, "Engineering"), employee(2, "Design")];
        let summary = roster_summary(&employees, &[], date("2026-09-01"), date("2026-08-30"));
        assert_eq!(summary.absent, 0);

        // a past date with no records is fully absent
        let summary = roster_summary(&employees, &[], date("2026-08-29"), date("2026-08-30"));
        assert_eq!(summary.absent, 2);
    }

    #[test]
    fn department_breakdown_counts_present_or_late() {
        let employees = vec![
            employee(1, "Engineering"),
            employee(2, "Engineering"),
            employee(3, "Design"),
        ];
        let records = vec![
            record(1, 1, "2026-08-30", AttendanceStatus::Present, 0.0),
            record(2, 2, "2026-08-30", AttendanceStatus::Late, 0.0),
        ];

        let breakdown = department_breakdown(&employees, &records, date("2026-08-30"));
        assert_eq!(
            breakdown,
            vec![
                DepartmentAttendance {
                    department: "Design".into(),
                    present: 0,
                    total: 1
                },
                DepartmentAttendance {
                    department: "Engineering".into(),
                    present: 2,
                    total: 2
                },
            ]
        );
    }
}
