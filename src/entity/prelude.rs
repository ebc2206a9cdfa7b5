pub use super::admins::Entity as Admins;
pub use super::assignments::Entity as Assignments;
pub use super::course_students::Entity as CourseStudents;
pub use super::courses::Entity as Courses;
pub use super::notifications::Entity as Notifications;
pub use super::parent_students::Entity as ParentStudents;
pub use super::parents::Entity as Parents;
pub use super::students::Entity as Students;
pub use super::submissions::Entity as Submissions;
pub use super::teachers::Entity as Teachers;
