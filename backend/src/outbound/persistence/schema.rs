//! Diesel table definitions for tables queried through the query builder.
//!
//! The hospital schema (`kamar_inap`, `reg_periksa`, `dokter`, ...) is owned
//! by the hospital information system and only read through `sql_query`
//! projections, so it is not declared here. `fcm_tokens` is written with a
//! raw `ON DUPLICATE KEY UPDATE` statement for the same reason.

diesel::table! {
    /// Pending push notifications written by other systems.
    notification_queue (id) {
        id -> Bigint,
        /// Recipient doctor code.
        kd_dokter -> Varchar,
        title -> Varchar,
        body -> Text,
        /// Admission the notification concerns.
        no_rawat -> Varchar,
        /// `pending`, `sent` or `failed`.
        status -> Varchar,
        /// Delivery note on success or error text on failure.
        error_message -> Nullable<Text>,
        /// Local time of a successful delivery.
        sent_at -> Nullable<Datetime>,
        created_at -> Datetime,
    }
}
