/// State management module
///
/// This module handles all application state, including:
/// - The user's document library and its JSON file (library.rs)
/// - Shared bitmap and geometry types (data.rs)
/// - Selection, zoom and the canvas contents (viewer.rs)
pub mod library;
pub mod data;
pub mod viewer;
