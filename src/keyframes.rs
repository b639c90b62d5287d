use crate::easing::EaseMethod;
use anyhow::{anyhow, Result};
use glam::{Vec2, Vec4};
use std::cmp::Ordering;

/// Segments narrower than this interpolate as if they spanned this much.
/// Keeps the ratio finite when two keyframes sit almost on top of each other.
pub const MIN_SEGMENT_SPAN: f32 = 0.01;

/// A value that can live on a curve. Channels interpolate independently:
/// X/Y for points, R/G/B/A for colors.
pub trait CurveValue: Copy {
    fn lerp(a: Self, b: Self, ratio: f32) -> Self;
    fn is_finite(self) -> bool;
}

impl CurveValue for f32 {
    fn lerp(a: Self, b: Self, ratio: f32) -> Self {
        a + (b - a) * ratio
    }

    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

impl CurveValue for Vec2 {
    fn lerp(a: Self, b: Self, ratio: f32) -> Self {
        a + (b - a) * ratio
    }

    fn is_finite(self) -> bool {
        Vec2::is_finite(self)
    }
}

impl CurveValue for Vec4 {
    fn lerp(a: Self, b: Self, ratio: f32) -> Self {
        a + (b - a) * ratio
    }

    fn is_finite(self) -> bool {
        Vec4::is_finite(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe<T> {
    pub time: f32,
    pub value: T,
    /// Easing applied on the segment leading into this keyframe.
    pub ease: EaseMethod,
}

impl<T> Keyframe<T> {
    pub fn new(time: f32, value: T) -> Self {
        Self { time, value, ease: EaseMethod::None }
    }

    pub fn with_ease(time: f32, value: T, ease: EaseMethod) -> Self {
        Self { time, value, ease }
    }
}

/// A piecewise curve over normalized time [0, 1].
///
/// Always holds at least one keyframe; the first one conventionally sits at
/// time 0 and callers must not move it. Editing goes through the explicit
/// operations below so the sequence stays ordered by time.
#[derive(Clone, Debug)]
pub struct KeyframeCurve<T: CurveValue> {
    keyframes: Vec<Keyframe<T>>,
}

pub type ScalarCurve = KeyframeCurve<f32>;
pub type PointCurve = KeyframeCurve<Vec2>;
pub type ColorCurve = KeyframeCurve<Vec4>;

impl<T: CurveValue> KeyframeCurve<T> {
    pub fn new(initial_value: T) -> Self {
        Self { keyframes: vec![Keyframe::new(0.0, initial_value)] }
    }

    /// Builds a curve from arbitrary keyframes: validates them, sorts by
    /// time (input order breaks ties), and collapses exact duplicate
    /// times keeping the later entry.
    pub fn from_keyframes(frames: Vec<Keyframe<T>>) -> Result<Self> {
        if frames.is_empty() {
            return Err(anyhow!("Curve must contain at least one keyframe"));
        }
        let mut indexed: Vec<(usize, Keyframe<T>)> = Vec::with_capacity(frames.len());
        for (index, frame) in frames.into_iter().enumerate() {
            if !frame.time.is_finite() {
                return Err(anyhow!("Curve keyframe time must be finite"));
            }
            if frame.time < 0.0 {
                return Err(anyhow!("Curve keyframe time cannot be negative"));
            }
            if !frame.value.is_finite() {
                return Err(anyhow!("Curve keyframe contains a non-finite value"));
            }
            indexed.push((index, frame));
        }
        indexed.sort_by(|a, b| {
            let time_order = a.1.time.partial_cmp(&b.1.time).unwrap_or(Ordering::Equal);
            if time_order == Ordering::Equal {
                a.0.cmp(&b.0)
            } else {
                time_order
            }
        });
        let mut deduped: Vec<Keyframe<T>> = Vec::with_capacity(indexed.len());
        for (_, frame) in indexed {
            if let Some(last) = deduped.last_mut() {
                if (frame.time - last.time).abs() <= f32::EPSILON {
                    *last = frame;
                    continue;
                }
            }
            deduped.push(frame);
        }
        Ok(Self { keyframes: deduped })
    }

    /// Evaluates the curve at `t`. Queries before the first keyframe return
    /// the first value, queries past the last return the last value, and a
    /// single-keyframe curve is a flat line.
    pub fn sample(&self, t: f32) -> T {
        if t < self.keyframes[0].time {
            return self.keyframes[0].value;
        }
        for k in 1..self.keyframes.len() {
            if t <= self.keyframes[k].time {
                let span = (self.keyframes[k].time - self.keyframes[k - 1].time).max(MIN_SEGMENT_SPAN);
                let ratio = (t - self.keyframes[k - 1].time) / span;
                let ratio = self.keyframes[k].ease.apply(ratio);
                return T::lerp(self.keyframes[k - 1].value, self.keyframes[k].value, ratio);
            }
        }
        self.keyframes[self.keyframes.len() - 1].value
    }

    /// Inserts a keyframe, keeping the sequence ordered by time, and
    /// returns the index it landed at.
    pub fn add(&mut self, time: f32, value: T, ease: EaseMethod) -> usize {
        let index = self.insertion_index(time);
        self.keyframes.insert(index, Keyframe::with_ease(time, value, ease));
        index
    }

    /// Updates the keyframe at `time` if one sits exactly there, otherwise
    /// inserts a new one. Returns the affected index.
    pub fn add_or_set(&mut self, time: f32, value: T, ease: EaseMethod) -> usize {
        for (index, frame) in self.keyframes.iter_mut().enumerate() {
            if frame.time == time {
                frame.value = value;
                return index;
            }
        }
        self.add(time, value, ease)
    }

    /// Removes the keyframe at `index`. Removing the sole remaining
    /// keyframe (or passing an out-of-range index) is a caller error; it is
    /// a no-op in release builds.
    pub fn remove(&mut self, index: usize) {
        debug_assert!(self.keyframes.len() > 1, "cannot remove the last keyframe");
        debug_assert!(index < self.keyframes.len(), "keyframe index out of range");
        if self.keyframes.len() > 1 && index < self.keyframes.len() {
            self.keyframes.remove(index);
        }
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    pub fn keyframe(&self, index: usize) -> Option<&Keyframe<T>> {
        self.keyframes.get(index)
    }

    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    pub fn set_keyframe_value(&mut self, index: usize, value: T) {
        if let Some(frame) = self.keyframes.get_mut(index) {
            frame.value = value;
        }
    }

    /// Changes a keyframe's time, bubbling it past neighbors whose times it
    /// crosses, and returns its new index. Bubbling stops at a neighbor
    /// with the exact same time, so a mover never jumps past an equal
    /// neighbor. The first keyframe is pinned to time 0 by caller contract.
    pub fn set_keyframe_time(&mut self, index: usize, time: f32) -> usize {
        if index >= self.keyframes.len() {
            return index;
        }
        let mut current = index;
        while current > 0 && time < self.keyframes[current - 1].time {
            self.keyframes.swap(current, current - 1);
            current -= 1;
        }
        while current + 1 < self.keyframes.len() && time > self.keyframes[current + 1].time {
            self.keyframes.swap(current, current + 1);
            current += 1;
        }
        self.keyframes[current].time = time;
        current
    }

    fn insertion_index(&self, time: f32) -> usize {
        let mut index = 0;
        while index < self.keyframes.len() {
            if self.keyframes[index].time >= time {
                break;
            }
            index += 1;
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_keyframe_is_a_flat_line() {
        let curve = ScalarCurve::new(3.5);
        assert_eq!(curve.sample(-1.0), 3.5);
        assert_eq!(curve.sample(0.0), 3.5);
        assert_eq!(curve.sample(0.7), 3.5);
        assert_eq!(curve.sample(100.0), 3.5);
    }

    #[test]
    fn add_keeps_time_order() {
        let mut curve = ScalarCurve::new(0.0);
        let last = curve.add(1.0, 10.0, EaseMethod::None);
        let middle = curve.add(0.5, 4.0, EaseMethod::None);
        assert_eq!(last, 1);
        assert_eq!(middle, 1);
        let times: Vec<f32> = curve.keyframes().iter().map(|frame| frame.time).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn add_or_set_updates_exact_match() {
        let mut curve = ScalarCurve::new(1.0);
        curve.add(0.5, 2.0, EaseMethod::None);
        let index = curve.add_or_set(0.5, 9.0, EaseMethod::None);
        assert_eq!(index, 1);
        assert_eq!(curve.keyframe_count(), 2);
        assert_eq!(curve.keyframe(1).unwrap().value, 9.0);
    }

    #[test]
    fn tight_segments_use_the_minimum_span() {
        let mut curve = ScalarCurve::new(0.0);
        curve.add(0.001, 1.0, EaseMethod::None);
        // Span clamps to MIN_SEGMENT_SPAN, so the ratio at the upper
        // keyframe stays below 1.
        let sampled = curve.sample(0.001);
        assert!((sampled - 0.1).abs() < 1e-5, "got {sampled}");
    }

    #[test]
    fn from_keyframes_rejects_bad_input() {
        assert!(ScalarCurve::from_keyframes(Vec::new()).is_err());
        assert!(ScalarCurve::from_keyframes(vec![Keyframe::new(-0.25, 1.0)]).is_err());
        assert!(ScalarCurve::from_keyframes(vec![Keyframe::new(f32::NAN, 1.0)]).is_err());
        assert!(ScalarCurve::from_keyframes(vec![Keyframe::new(0.0, f32::INFINITY)]).is_err());
    }

    #[test]
    fn from_keyframes_sorts_and_dedups() {
        let curve = ScalarCurve::from_keyframes(vec![
            Keyframe::new(0.8, 8.0),
            Keyframe::new(0.0, 0.0),
            Keyframe::new(0.8, 9.0),
        ])
        .expect("valid frames");
        assert_eq!(curve.keyframe_count(), 2);
        assert_eq!(curve.keyframe(1).unwrap().value, 9.0, "later duplicate wins");
    }
}
