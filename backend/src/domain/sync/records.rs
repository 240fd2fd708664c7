//! Read models returned in a sync snapshot.
//!
//! The sync endpoint never mutates these records; they are created by the
//! scheduling and visit-completion flows elsewhere in the platform.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::Shape;
use crate::domain::{
    ChemicalsUsedId, ClientId, IssueId, JobId, OrgId, PlanId, PoolId, ReadingId, StaffId, VisitId,
};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $error:ident ($label:literal) {
            $($(#[$variant_meta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            /// Storage and wire representation.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        #[doc = concat!("Error raised for an unrecognised ", $label, ".")]
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        #[error("invalid {}: {value}", $label)]
        pub struct $error {
            /// The rejected input.
            pub value: String,
        }

        impl FromStr for $name {
            type Err = $error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err($error { value: s.to_owned() }),
                }
            }
        }
    };
}

wire_enum! {
    /// Lifecycle state of a scheduled job.
    pub enum JobStatus: ParseJobStatusError("job status") {
        Scheduled => "scheduled",
        InProgress => "in_progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

wire_enum! {
    /// Severity of an issue reported during a visit.
    pub enum IssueSeverity: ParseIssueSeverityError("issue severity") {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

wire_enum! {
    /// Resolution state of a reported issue.
    pub enum IssueStatus: ParseIssueStatusError("issue status") {
        Open => "open",
        Resolved => "resolved",
    }
}

/// Scheduled unit of work for a day window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub org_id: OrgId,
    pub assigned_carer_id: Option<StaffId>,
    pub pool_id: Option<PoolId>,
    pub plan_id: Option<PlanId>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub status: JobStatus,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Physical pool being serviced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: PoolId,
    pub org_id: OrgId,
    pub client_id: ClientId,
    pub name: String,
    pub address: String,
    pub volume_l: Option<i32>,
    /// Target chemistry ranges keyed by measurement name.
    pub targets: Value,
    pub updated_at: DateTime<Utc>,
}

/// A technician's visit to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitEntry {
    pub id: VisitId,
    pub org_id: OrgId,
    pub job_id: JobId,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Water-chemistry measurements taken during a visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: ReadingId,
    pub org_id: OrgId,
    pub visit_id: VisitId,
    pub ph: Option<f64>,
    pub free_chlorine: Option<f64>,
    pub total_chlorine: Option<f64>,
    pub alkalinity: Option<f64>,
    pub calcium_hardness: Option<f64>,
    pub cyanuric_acid: Option<f64>,
    pub salt: Option<f64>,
    pub temperature_c: Option<f64>,
    pub measured_at: DateTime<Utc>,
}

/// Chemical consumption recorded against a visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalsUsed {
    pub id: ChemicalsUsedId,
    pub org_id: OrgId,
    pub visit_id: VisitId,
    pub chemical: String,
    pub quantity: f64,
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

/// Problem reported during a visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: IssueId,
    pub org_id: OrgId,
    pub visit_id: VisitId,
    pub kind: String,
    pub severity: IssueSeverity,
    pub status: IssueStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Stock carried in a technician's van.
///
/// Not yet computed; the shape is always returned empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VanStockItem {
    pub item_id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// Marker for a record deleted since the client's watermark.
///
/// Deletion propagation does not exist yet, so snapshots never contain one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tombstone {
    pub shape: Shape,
    pub id: Uuid,
    pub deleted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("scheduled", JobStatus::Scheduled)]
    #[case("in_progress", JobStatus::InProgress)]
    #[case("completed", JobStatus::Completed)]
    #[case("cancelled", JobStatus::Cancelled)]
    fn job_status_parses_storage_values(#[case] raw: &str, #[case] expected: JobStatus) {
        assert_eq!(raw.parse::<JobStatus>(), Ok(expected));
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    fn unknown_values_report_their_label() {
        let err = "urgent".parse::<IssueSeverity>().expect_err("unknown");
        assert_eq!(err.to_string(), "invalid issue severity: urgent");
        assert!("reopened".parse::<IssueStatus>().is_err());
    }

    #[rstest]
    fn job_serialises_with_camel_case_fields() {
        let now = Utc::now();
        let job = Job {
            id: JobId::random(),
            org_id: OrgId::random(),
            assigned_carer_id: None,
            pool_id: None,
            plan_id: None,
            window_start: now,
            window_end: now,
            status: JobStatus::InProgress,
            notes: None,
            updated_at: now,
        };
        let value = serde_json::to_value(&job).expect("serialise job");
        assert_eq!(value["status"], "in_progress");
        assert!(value.get("assignedCarerId").is_some());
        assert!(value.get("windowStart").is_some());
    }
}
