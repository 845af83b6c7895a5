pub mod app;
pub mod buffer;
pub mod config;
pub mod logging;
pub mod paths;
pub mod view;

mod action;
mod action_handler;
mod input;
mod io_gateway;
mod terminal_session;
