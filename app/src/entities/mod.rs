pub mod prelude;

pub mod drivers;
pub mod sessions;
pub mod users;
