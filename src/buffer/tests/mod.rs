mod common;
mod gap;
mod render;
