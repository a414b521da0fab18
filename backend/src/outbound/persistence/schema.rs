//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the embedded migrations exactly. When a
//! migration changes a table, update the matching block here.

diesel::table! {
    /// Registered students.
    ///
    /// Rows are soft-deleted. Partial unique indexes keep
    /// `document_identification` and `email_address` unique among rows with
    /// `deleted = false`.
    students (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        name -> Varchar,
        age -> Int4,
        /// National identity document (CPF).
        document_identification -> Varchar,
        email_address -> Varchar,
        /// Stored exactly as submitted.
        password -> Varchar,
        deleted -> Bool,
        deleted_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Student addresses; at most one active row per student.
    addresses (id) {
        id -> Uuid,
        street -> Varchar,
        address_number -> Varchar,
        /// Brazilian postal code, 8 characters.
        zip_code -> Varchar,
        complement -> Nullable<Varchar>,
        neighborhood -> Varchar,
        city -> Varchar,
        /// Federative unit code, 2 characters.
        uf -> Varchar,
        /// Owning student.
        student_id -> Uuid,
        deleted -> Bool,
        deleted_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(addresses -> students (student_id));
diesel::allow_tables_to_appear_in_same_query!(addresses, students);
