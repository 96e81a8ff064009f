pub mod account;
pub mod appointment;
pub mod enums;
pub mod health_record;

pub use account::*;
pub use appointment::*;
pub use enums::*;
pub use health_record::*;
