//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept an executor (`&PgPool`, or `&mut *tx` inside a transaction) as the
//! first argument.

pub mod answer_repo;
pub mod attendance_repo;
pub mod level_plan_repo;
pub mod question_repo;
pub mod user_repo;

pub use answer_repo::AnswerRepo;
pub use attendance_repo::AttendanceRepo;
pub use level_plan_repo::LevelPlanRepo;
pub use question_repo::QuestionRepo;
pub use user_repo::UserRepo;
