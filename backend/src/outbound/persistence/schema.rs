//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Service areas served by the business.
    service_areas (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Place name used for display and hostname matching.
        name -> Text,
        /// Marks the primary business address.
        is_main_address -> Bool,
        /// Optional postal address.
        address -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Explicit hostname redirect rules. `domain` carries a unique index.
    domain_mappings (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Bare hostname, compared case-sensitively.
        domain -> Text,
        /// Internal path beginning with `/`.
        redirect_to -> Text,
        /// Optional display link; set to NULL when the area is deleted.
        service_area_id -> Nullable<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(domain_mappings -> service_areas (service_area_id));
diesel::allow_tables_to_appear_in_same_query!(domain_mappings, service_areas);
