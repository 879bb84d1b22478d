//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `RosterQuery`, `DoctorProfileQuery`,
//! `DeviceTokenCommand`) are called by inbound adapters. Driven ports are
//! implemented by outbound adapters and raise typed errors declared with
//! `define_port_error!`.

mod macros;
pub(crate) use macros::define_port_error;

mod admission_repository;
mod credential_repository;
mod device_token_command;
mod device_token_repository;
mod doctor_profile_query;
mod doctor_repository;
mod login_service;
mod notification_queue_repository;
mod push_notification_sender;
mod roster_query;

#[cfg(test)]
pub use admission_repository::MockAdmissionRepository;
pub use admission_repository::{AdmissionRepository, AdmissionRepositoryError};
#[cfg(test)]
pub use credential_repository::MockCredentialRepository;
pub use credential_repository::{CredentialRepository, CredentialRepositoryError};
pub use device_token_command::DeviceTokenCommand;
#[cfg(test)]
pub use device_token_command::MockDeviceTokenCommand;
#[cfg(test)]
pub use device_token_repository::MockDeviceTokenRepository;
pub use device_token_repository::{DeviceTokenRepository, DeviceTokenRepositoryError};
pub use doctor_profile_query::DoctorProfileQuery;
#[cfg(test)]
pub use doctor_profile_query::MockDoctorProfileQuery;
#[cfg(test)]
pub use doctor_repository::MockDoctorRepository;
pub use doctor_repository::{DoctorRepository, DoctorRepositoryError};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use notification_queue_repository::MockNotificationQueueRepository;
pub use notification_queue_repository::{NotificationQueueError, NotificationQueueRepository};
#[cfg(test)]
pub use push_notification_sender::MockPushNotificationSender;
pub use push_notification_sender::{PushDeliveryError, PushNotificationSender};
#[cfg(test)]
pub use roster_query::MockRosterQuery;
pub use roster_query::RosterQuery;
