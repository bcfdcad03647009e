//! Value Objects - Immutable, identity-less domain primitives

mod city_name;
mod user_id;

pub use city_name::CityName;
pub use user_id::UserId;
