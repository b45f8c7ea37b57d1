#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod panels;
pub mod raster;
pub mod style;
pub mod surface;
pub mod texture_manager;

pub use app::SketchApp;
pub use config::Settings;
pub use controller::{Controller, PointerEvent};
pub use error::{ConfigError, ExportError};
pub use gesture::{DrawEffect, Gesture, GestureState};
pub use raster::Shape;
pub use style::{ShapeKind, Style, ToolConfig};
pub use surface::{Layer, RasterSurface, Surface};
