pub mod chart;
pub mod hit;
pub mod judgment;
pub mod note;
pub mod parsing;
pub mod scoring;
pub mod session;
pub mod spawn;
pub mod summary;
