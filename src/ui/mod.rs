// Text front end - numbered menus over stdin/stdout
// Rendering and suggestions are kept separate so the binaries can reuse them

mod app;         // menu loop and per-action handlers
pub mod render;  // plain-text formatting
pub mod suggest; // "did you mean" hints

pub use app::App;
