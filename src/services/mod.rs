pub mod assignments;
pub mod auth;
pub mod courses;
pub mod notifications;
pub mod parents;
pub mod submissions;
pub mod users;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use notifications::NotificationService;
pub use parents::ParentService;
pub use submissions::SubmissionService;
pub use users::UserService;
