pub mod panels;
pub mod viewer;
