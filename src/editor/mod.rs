//! Editor-side integration of the improvement button

pub mod integration;
pub mod surfaces;

pub use integration::{BusyIndicator, ClickOutcome, EditorIntegration};
pub use surfaces::{BlockEditor, ClassicEditor, EditorSurface, SurfaceKind, select_surface};
