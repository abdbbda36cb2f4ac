pub mod catch_button;
pub mod lifecycle;
