use glam::{Affine2, Vec2};

pub const GIZMO_HANDLE_RADIUS_PX: f32 = 6.0;
pub const GIZMO_OUTLINE_THICKNESS_PX: f32 = 2.0;
pub const GIZMO_ROTATION_RING_THICKNESS_PX: f32 = 8.0;
pub const GIZMO_DEFAULT_BOX_SIZE: f32 = 32.0;

/// Geometry a renderer needs to draw the widget: the nine box handles in
/// row-major order (4 = center), the rotation ring radius, and the
/// rotate+translate transform the handles were pushed through.
#[derive(Clone, Copy, Debug)]
pub struct HandleLayout {
    pub handles: [Vec2; 9],
    pub ring_radius: f32,
    pub transform: Affine2,
}

/// Options for an in-progress scale drag.
#[derive(Clone, Copy, Debug)]
pub struct DragConstraints {
    pub keep_aspect_ratio: bool,
    pub keep_area: bool,
    pub min_size: Option<f32>,
    /// When true the box scales about its center; when false the edge or
    /// corner opposite the dragged handle stays fixed.
    pub lock_center: bool,
}

impl Default for DragConstraints {
    fn default() -> Self {
        Self { keep_aspect_ratio: false, keep_area: false, min_size: None, lock_center: true }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum DragState {
    Center { old_center: Vec2 },
    Scale { handle: usize, old_size: Vec2 },
    Rotate { old_angle: f32, old_mouse_angle: f32 },
}

/// Computes the widget geometry for a box of `size` (the default box when
/// absent) centered on `center`, rotated by `angle` when present. The
/// transform only rotates and translates; scale stays out of it so handle
/// hit radii keep their on-screen size.
pub fn handle_layout(center: Vec2, size: Option<Vec2>, angle: Option<f32>) -> HandleLayout {
    let size_to_use = size.unwrap_or(Vec2::splat(GIZMO_DEFAULT_BOX_SIZE));
    let transform = Affine2::from_angle_translation(angle.unwrap_or(0.0), center);

    let half = size_to_use / 2.0;
    let local = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(0.0, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(-half.x, 0.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(half.x, 0.0),
        Vec2::new(-half.x, half.y),
        Vec2::new(0.0, half.y),
        Vec2::new(half.x, half.y),
    ];
    let mut handles = [Vec2::ZERO; 9];
    for (slot, point) in handles.iter_mut().zip(local) {
        *slot = transform.transform_point2(point);
    }

    let diameter = size_to_use.length();
    let ring_radius = if diameter == 0.0 { 0.0 } else { diameter / 2.0 };

    HandleLayout { handles, ring_radius, transform }
}

/// Drag state for a rectangular transform widget: nine translate/scale
/// handles in a 3x3 grid plus a rotation ring. Holds no transform values
/// itself; callers feed center/size/angle in and the mouse handlers edit
/// them in place.
#[derive(Default)]
pub struct TransformGizmo {
    drag: Option<DragState>,
}

impl TransformGizmo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit-tests a press against the handles and the rotation ring. Scale
    /// handles only register when a size is supplied, the ring only when an
    /// angle is supplied. Returns whether something was grabbed.
    pub fn handle_mouse_down(
        &mut self,
        mouse: Vec2,
        center: Vec2,
        size: Option<Vec2>,
        angle: Option<f32>,
        zoom: f32,
    ) -> bool {
        let layout = handle_layout(center, size, angle);

        for (handle, position) in layout.handles.iter().enumerate() {
            if position.distance(mouse) <= GIZMO_HANDLE_RADIUS_PX * zoom {
                if handle == 4 {
                    self.drag = Some(DragState::Center { old_center: center });
                    return true;
                } else if let Some(size) = size {
                    self.drag = Some(DragState::Scale { handle, old_size: size });
                    return true;
                }
            }
        }

        if let Some(angle) = angle {
            let distance = center.distance(mouse);
            let half_ring = GIZMO_ROTATION_RING_THICKNESS_PX / 2.0 * zoom;
            if distance >= layout.ring_radius - half_ring && distance <= layout.ring_radius + half_ring {
                self.drag = Some(DragState::Rotate {
                    old_angle: angle,
                    old_mouse_angle: bearing(center, mouse),
                });
                return true;
            }
        }

        false
    }

    /// Applies a mouse move to whatever is being dragged, writing the new
    /// center/size/angle back through the supplied references. Returns
    /// false and writes nothing when no handle is active.
    pub fn handle_mouse_move(
        &mut self,
        mouse: Vec2,
        center: &mut Vec2,
        size: Option<&mut Vec2>,
        angle: Option<&mut f32>,
        constraints: DragConstraints,
    ) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };

        match drag {
            DragState::Center { .. } => {
                *center = mouse;
                true
            }
            DragState::Rotate { old_angle, old_mouse_angle } => {
                let Some(angle) = angle else {
                    return false;
                };
                *angle = old_angle + bearing(*center, mouse) - old_mouse_angle;
                true
            }
            DragState::Scale { handle, old_size } => {
                let Some(size) = size else {
                    return false;
                };
                let angle_value = angle.map(|value| *value);
                let layout = handle_layout(*center, Some(*size), angle_value);
                let inverse = layout.transform.inverse();
                let local_mouse = inverse.transform_point2(mouse);
                let mut local_center = inverse.transform_point2(*center);

                let mut new_size = old_size;
                let scaling_x = matches!(handle, 0 | 3 | 6 | 2 | 5 | 8);
                let scaling_y = matches!(handle, 0 | 1 | 2 | 6 | 7 | 8);
                match handle {
                    0 | 3 | 6 => new_size.x = size.x / 2.0 - local_mouse.x,
                    2 | 5 | 8 => new_size.x = local_mouse.x + size.x / 2.0,
                    _ => {}
                }
                match handle {
                    0 | 1 | 2 => new_size.y = size.y / 2.0 - local_mouse.y,
                    6 | 7 | 8 => new_size.y = local_mouse.y + size.y / 2.0,
                    _ => {}
                }

                if let Some(min) = constraints.min_size {
                    new_size = new_size.max(Vec2::splat(min));
                }

                if constraints.keep_aspect_ratio && old_size.x != 0.0 && old_size.y != 0.0 {
                    let w_scale = new_size.x / old_size.x;
                    let h_scale = new_size.y / old_size.y;
                    let mut scale = if !scaling_y {
                        w_scale
                    } else if !scaling_x {
                        h_scale
                    } else if w_scale.abs() > h_scale.abs() {
                        w_scale
                    } else {
                        h_scale
                    };
                    if let Some(min) = constraints.min_size {
                        scale = scale.max(min / old_size.x).max(min / old_size.y);
                    }
                    new_size = old_size * scale;
                } else if constraints.keep_area && old_size.x != 0.0 && old_size.y != 0.0 {
                    let w_scale = new_size.x / old_size.x;
                    let h_scale = new_size.y / old_size.y;
                    // The dragged axis drives; on a corner drag the smaller
                    // change drives so the box squashes instead of growing.
                    let by_x = if !scaling_y {
                        true
                    } else if !scaling_x {
                        false
                    } else {
                        w_scale.abs() < h_scale.abs()
                    };
                    let old_area = old_size.x as f64 * old_size.y as f64;
                    if by_x {
                        if let Some(min) = constraints.min_size {
                            new_size.x = new_size.x.max(min);
                        }
                        new_size.y = (old_area / new_size.x as f64) as f32;
                    } else {
                        if let Some(min) = constraints.min_size {
                            new_size.y = new_size.y.max(min);
                        }
                        new_size.x = (old_area / new_size.y as f64) as f32;
                    }
                }

                if !constraints.lock_center {
                    match handle {
                        0 | 3 | 6 => local_center.x = size.x / 2.0 - new_size.x / 2.0,
                        2 | 5 | 8 => local_center.x = -size.x / 2.0 + new_size.x / 2.0,
                        _ => {}
                    }
                    match handle {
                        0 | 1 | 2 => local_center.y = size.y / 2.0 - new_size.y / 2.0,
                        6 | 7 | 8 => local_center.y = -size.y / 2.0 + new_size.y / 2.0,
                        _ => {}
                    }
                }

                *center = layout.transform.transform_point2(local_center);
                *size = new_size;
                true
            }
        }
    }

    /// Releases the active handle. Returns whether a drag was in progress.
    pub fn handle_mouse_up(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_dragging_center(&self) -> bool {
        matches!(self.drag, Some(DragState::Center { .. }))
    }

    /// Where the center was when the center handle was grabbed.
    pub fn old_center(&self) -> Option<Vec2> {
        match self.drag {
            Some(DragState::Center { old_center }) => Some(old_center),
            _ => None,
        }
    }
}

fn bearing(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}
