pub mod changes;
pub mod config;
pub mod curve_files;
pub mod easing;
pub mod gizmo;
pub mod history;
pub mod keyframes;
pub mod validation;

pub use changes::{ChangesManager, UnsavedChoice};
pub use curve_files::{load_curve_bank, save_curve_bank, CurveBank, TypedCurve};
pub use easing::EaseMethod;
pub use gizmo::{handle_layout, DragConstraints, HandleLayout, TransformGizmo};
pub use history::EditHistory;
pub use keyframes::{ColorCurve, Keyframe, KeyframeCurve, PointCurve, ScalarCurve};
