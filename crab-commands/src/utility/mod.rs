pub mod embeds;
pub mod gateway_status;
pub mod help;
pub mod ping;
