//! MySQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by the
//! hospital information system database through `diesel-async` and `bb8`
//! connection pooling.
//!
//! Most reads run hand-written SQL through `sql_query`, because the hospital
//! schema is owned elsewhere and only the notification queue is described
//! with `diesel::table!`. Row structs (`models.rs`) and the schema stay
//! private to this module; every error is mapped onto the owning port's
//! error type before it leaves.
//!
//! # Example
//!
//! ```ignore
//! use ward_rounds::outbound::persistence::{DbPool, PoolConfig, DieselDoctorRepository};
//!
//! let config = PoolConfig::new("mysql://localhost/sik");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselDoctorRepository::new(pool);
//! ```

mod diesel_admission_repository;
mod diesel_basic_error_mapping;
mod diesel_credential_repository;
mod diesel_device_token_repository;
mod diesel_doctor_repository;
mod diesel_notification_queue_repository;
mod models;
mod pool;
mod schema;

pub use diesel_admission_repository::DieselAdmissionRepository;
pub use diesel_credential_repository::{CredentialKeys, DieselCredentialRepository};
pub use diesel_device_token_repository::DieselDeviceTokenRepository;
pub use diesel_doctor_repository::DieselDoctorRepository;
pub use diesel_notification_queue_repository::DieselNotificationQueueRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
