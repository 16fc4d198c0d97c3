pub mod func_match;
pub mod model;
pub mod profile;
pub mod ranges;
pub mod report;
pub mod tabbed;
