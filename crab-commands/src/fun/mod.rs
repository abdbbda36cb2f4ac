pub mod avatar;
pub mod eightball;
pub mod wyr;
