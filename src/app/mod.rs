mod chat;
pub mod dispatch;
mod input;
mod keys;
mod render;
mod runner;
mod status;
