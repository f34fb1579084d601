pub mod count;
pub mod frontend;
pub mod wx;
