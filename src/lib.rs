//! A small OpenGL demo: two spinning cubes drawn with shader programs loaded from disk.
//!
//! The [`abs`] module holds thin owned wrappers around SDL2 and OpenGL objects, [`render`] the
//! cube scene itself, and [`config`] and [`logging`] the settings and logger setup used by the
//! `hello-gl` binary.

pub mod abs;
pub mod config;
pub mod logging;
pub mod render;
