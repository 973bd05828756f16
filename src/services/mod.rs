pub mod export;
pub mod images;
pub mod project;
