pub mod habit;
pub mod habit_list;
pub mod user;
pub mod validation;

pub use habit::{CreateHabitRequest, Habit};
pub use habit_list::{HabitList, HabitListInput, UpsertHabitListRequest};
pub use user::{Credentials, CredentialsRequest, User, UserRecord};
pub use validation::FieldError;
