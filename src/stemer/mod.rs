pub mod lovins;
pub mod rules;

pub use lovins::lovins_stem as stem;
