//! Internal Diesel row structs for the sync tables.
//!
//! These types are implementation details of the persistence layer and never
//! leave it. Conversions into domain records live here so status columns are
//! parsed in one place.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::sync::records::{
    ParseIssueSeverityError, ParseIssueStatusError, ParseJobStatusError,
};
use crate::domain::{
    ChemicalsUsed, ChemicalsUsedId, ClientId, Issue, IssueId, Job, JobId, OrgId, PlanId, Pool,
    PoolId, Reading, ReadingId, StaffId, VisitEntry, VisitId,
};

use super::schema::{chemicals_used, issues, jobs, pools, readings, visit_entries};

/// A stored status string that no domain variant matches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum RowConversionError {
    #[error(transparent)]
    JobStatus(#[from] ParseJobStatusError),
    #[error(transparent)]
    IssueSeverity(#[from] ParseIssueSeverityError),
    #[error(transparent)]
    IssueStatus(#[from] ParseIssueStatusError),
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub assigned_carer_id: Option<Uuid>,
    pub pool_id: Option<Uuid>,
    pub plan_id: Option<Uuid>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = RowConversionError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: JobId::from_uuid(row.id),
            org_id: OrgId::from_uuid(row.org_id),
            assigned_carer_id: row.assigned_carer_id.map(StaffId::from_uuid),
            pool_id: row.pool_id.map(PoolId::from_uuid),
            plan_id: row.plan_id.map(PlanId::from_uuid),
            window_start: row.window_start,
            window_end: row.window_end,
            status: row.status.parse()?,
            notes: row.notes,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pools)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PoolRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub address: String,
    pub volume_l: Option<i32>,
    pub targets: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl From<PoolRow> for Pool {
    fn from(row: PoolRow) -> Self {
        Self {
            id: PoolId::from_uuid(row.id),
            org_id: OrgId::from_uuid(row.org_id),
            client_id: ClientId::from_uuid(row.client_id),
            name: row.name,
            address: row.address,
            volume_l: row.volume_l,
            targets: row.targets,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = visit_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VisitEntryRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub job_id: Uuid,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<VisitEntryRow> for VisitEntry {
    fn from(row: VisitEntryRow) -> Self {
        Self {
            id: VisitId::from_uuid(row.id),
            org_id: OrgId::from_uuid(row.org_id),
            job_id: JobId::from_uuid(row.job_id),
            started_at: row.started_at,
            completed_at: row.completed_at,
            notes: row.notes,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = readings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReadingRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub visit_id: Uuid,
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

impl From<ReadingRow> for Reading {
    fn from(row: ReadingRow) -> Self {
        Self {
            id: ReadingId::from_uuid(row.id),
            org_id: OrgId::from_uuid(row.org_id),
            visit_id: VisitId::from_uuid(row.visit_id),
            ph: row.ph,
            free_chlorine: row.free_chlorine,
            total_chlorine: row.total_chlorine,
            alkalinity: row.alkalinity,
            calcium_hardness: row.calcium_hardness,
            cyanuric_acid: row.cyanuric_acid,
            salt: row.salt,
            temperature_c: row.temperature_c,
            measured_at: row.measured_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = chemicals_used)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ChemicalsUsedRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub visit_id: Uuid,
    pub chemical: String,
    pub quantity: f64,
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChemicalsUsedRow> for ChemicalsUsed {
    fn from(row: ChemicalsUsedRow) -> Self {
        Self {
            id: ChemicalsUsedId::from_uuid(row.id),
            org_id: OrgId::from_uuid(row.org_id),
            visit_id: VisitId::from_uuid(row.visit_id),
            chemical: row.chemical,
            quantity: row.quantity,
            unit: row.unit,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = issues)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IssueRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub visit_id: Uuid,
    pub kind: String,
    pub severity: String,
    pub status: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<IssueRow> for Issue {
    type Error = RowConversionError;

    fn try_from(row: IssueRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: IssueId::from_uuid(row.id),
            org_id: OrgId::from_uuid(row.org_id),
            visit_id: VisitId::from_uuid(row.visit_id),
            kind: row.kind,
            severity: row.severity.parse()?,
            status: row.status.parse()?,
            description: row.description,
            created_at: row.created_at,
        })
    }
}
