//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Every table carries an
//! `org_id` column and every query against it filters on that column.

diesel::table! {
    /// Staff members; `user_id` links a login account to a staff record.
    staff (id) {
        id -> Uuid,
        org_id -> Uuid,
        user_id -> Nullable<Uuid>,
        display_name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Client-owned pools.
    pools (id) {
        id -> Uuid,
        org_id -> Uuid,
        client_id -> Uuid,
        name -> Varchar,
        address -> Varchar,
        volume_l -> Nullable<Int4>,
        /// Target chemistry ranges.
        targets -> Jsonb,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Scheduled jobs. `status` is one of `scheduled`, `in_progress`,
    /// `completed`, `cancelled`.
    jobs (id) {
        id -> Uuid,
        org_id -> Uuid,
        assigned_carer_id -> Nullable<Uuid>,
        pool_id -> Nullable<Uuid>,
        plan_id -> Nullable<Uuid>,
        window_start -> Timestamptz,
        window_end -> Timestamptz,
        status -> Varchar,
        notes -> Nullable<Text>,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    visit_entries (id) {
        id -> Uuid,
        org_id -> Uuid,
        job_id -> Uuid,
        started_at -> Nullable<Timestamptz>,
        completed_at -> Nullable<Timestamptz>,
        notes -> Nullable<Text>,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Water-chemistry readings taken during a visit.
    readings (id) {
        id -> Uuid,
        org_id -> Uuid,
        visit_id -> Uuid,
        ph -> Nullable<Float8>,
        free_chlorine -> Nullable<Float8>,
        total_chlorine -> Nullable<Float8>,
        alkalinity -> Nullable<Float8>,
        calcium_hardness -> Nullable<Float8>,
        cyanuric_acid -> Nullable<Float8>,
        salt -> Nullable<Float8>,
        temperature_c -> Nullable<Float8>,
        measured_at -> Timestamptz,
    }
}

diesel::table! {
    chemicals_used (id) {
        id -> Uuid,
        org_id -> Uuid,
        visit_id -> Uuid,
        chemical -> Varchar,
        quantity -> Float8,
        unit -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Issues raised during a visit. `severity` is one of `low`, `medium`,
    /// `high`, `critical`; `status` is `open` or `resolved`.
    issues (id) {
        id -> Uuid,
        org_id -> Uuid,
        visit_id -> Uuid,
        kind -> Varchar,
        severity -> Varchar,
        status -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(jobs -> pools (pool_id));
diesel::joinable!(visit_entries -> jobs (job_id));
diesel::joinable!(readings -> visit_entries (visit_id));
diesel::joinable!(chemicals_used -> visit_entries (visit_id));
diesel::joinable!(issues -> visit_entries (visit_id));

diesel::allow_tables_to_appear_in_same_query!(
    staff,
    pools,
    jobs,
    visit_entries,
    readings,
    chemicals_used,
    issues,
);
