pub mod brag_sheet;
pub mod letter;
pub mod student;
