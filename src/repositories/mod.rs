//! # Repository Layer
//!
//! Repositories encapsulate the SeaORM operations for each HR record type.
//! Every mutation runs inside its own transaction and either commits as a
//! whole or leaves the database untouched.

pub mod department;
pub mod employee;
pub mod medical_leave;
pub mod membership;
pub mod team;
pub mod user;

pub use department::DepartmentRepository;
pub use employee::EmployeeRepository;
pub use medical_leave::{CreateMedicalLeaveRequest, MedicalLeaveRepository};
pub use membership::{CreateMembershipRequest, MembershipRepository};
pub use team::TeamRepository;
pub use user::UserRepository;
