pub mod meal;
pub mod user;

pub use meal::{Meal, MealType, NewMeal};
pub use user::{User, UserProfile};
