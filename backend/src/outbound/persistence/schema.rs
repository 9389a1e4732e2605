//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Credential accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login email, stored lowercased.
        email -> Varchar,
        /// Optional human-readable display name.
        display_name -> Nullable<Varchar>,
        /// Stored credential: `base64(salt).base64(key)`; null for accounts
        /// that have never set a password.
        password_hash -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Pairing/group contexts users share.
    relationships (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Product variant token: couples | friends | parent_teen.
        kind -> Varchar,
        /// Lifecycle status token: active | ended.
        status -> Varchar,
        /// Optional display name.
        name -> Nullable<Varchar>,
        /// Record creation timestamp; orders default relationship selection.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Join rows linking users to relationships.
    relationship_members (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// The member.
        user_id -> Uuid,
        /// The relationship the member belongs to.
        relationship_id -> Uuid,
        /// When the member joined.
        joined_at -> Timestamptz,
        /// When the member departed; null means the membership is active.
        left_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(relationship_members -> users (user_id));
diesel::joinable!(relationship_members -> relationships (relationship_id));

diesel::allow_tables_to_appear_in_same_query!(users, relationships, relationship_members);
