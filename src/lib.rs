//! Grid snake: a tick-driven snake simulation plus the terminal shell that
//! drives, draws and scores it.

pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;

pub mod ui {
    pub mod hud;
    pub mod menu;
}
