pub mod labels;
pub mod note;
pub mod prompt;
pub mod report;
pub mod risk;
pub mod vitals;
