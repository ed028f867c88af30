pub mod user_record;
pub mod vesting_state;

pub use user_record::*;
pub use vesting_state::*;
