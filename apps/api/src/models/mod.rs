pub mod application;
pub mod job;
pub mod user;

pub use application::{Application, ApplicationId, ApplicationStatus};
pub use job::Job;
pub use user::User;
