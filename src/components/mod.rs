pub mod dimension_form;
pub mod matrix;
pub mod summary;
