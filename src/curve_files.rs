use crate::easing::EaseMethod;
use crate::keyframes::{ColorCurve, Keyframe, PointCurve, ScalarCurve};
use anyhow::{anyhow, Context, Result};
use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One curve of a bank, tagged with its value kind.
#[derive(Clone, Debug)]
pub enum TypedCurve {
    Scalar(ScalarCurve),
    Point(PointCurve),
    Color(ColorCurve),
}

impl TypedCurve {
    pub fn kind_str(&self) -> &'static str {
        match self {
            TypedCurve::Scalar(_) => "scalar",
            TypedCurve::Point(_) => "point",
            TypedCurve::Color(_) => "color",
        }
    }

    pub fn keyframe_count(&self) -> usize {
        match self {
            TypedCurve::Scalar(curve) => curve.keyframe_count(),
            TypedCurve::Point(curve) => curve.keyframe_count(),
            TypedCurve::Color(curve) => curve.keyframe_count(),
        }
    }

    /// Largest keyframe time in the curve.
    pub fn max_time(&self) -> f32 {
        match self {
            TypedCurve::Scalar(curve) => curve.keyframes().last().map(|frame| frame.time).unwrap_or(0.0),
            TypedCurve::Point(curve) => curve.keyframes().last().map(|frame| frame.time).unwrap_or(0.0),
            TypedCurve::Color(curve) => curve.keyframes().last().map(|frame| frame.time).unwrap_or(0.0),
        }
    }
}

/// A named set of property curves, e.g. everything a particle generator
/// animates over a particle's lifetime.
#[derive(Clone, Debug, Default)]
pub struct CurveBank {
    pub name: String,
    curves: BTreeMap<String, TypedCurve>,
}

impl CurveBank {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), curves: BTreeMap::new() }
    }

    pub fn insert(&mut self, key: impl Into<String>, curve: TypedCurve) {
        self.curves.insert(key.into(), curve);
    }

    pub fn remove(&mut self, key: &str) -> Option<TypedCurve> {
        self.curves.remove(key)
    }

    pub fn curve(&self, key: &str) -> Option<&TypedCurve> {
        self.curves.get(key)
    }

    pub fn scalar(&self, key: &str) -> Option<&ScalarCurve> {
        match self.curves.get(key) {
            Some(TypedCurve::Scalar(curve)) => Some(curve),
            _ => None,
        }
    }

    pub fn point(&self, key: &str) -> Option<&PointCurve> {
        match self.curves.get(key) {
            Some(TypedCurve::Point(curve)) => Some(curve),
            _ => None,
        }
    }

    pub fn color(&self, key: &str) -> Option<&ColorCurve> {
        match self.curves.get(key) {
            Some(TypedCurve::Color(curve)) => Some(curve),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(|key| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypedCurve)> {
        self.curves.iter().map(|(key, curve)| (key.as_str(), curve))
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CurveBankFile {
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    curves: BTreeMap<String, CurveEntryFile>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum CurveEntryFile {
    Scalar { keyframes: Vec<ScalarKeyframeFile> },
    Point { keyframes: Vec<PointKeyframeFile> },
    Color { keyframes: Vec<ColorKeyframeFile> },
}

#[derive(Debug, Serialize, Deserialize)]
struct ScalarKeyframeFile {
    time: f32,
    value: f32,
    #[serde(default, skip_serializing_if = "ease_is_none")]
    ease: EaseMethod,
}

#[derive(Debug, Serialize, Deserialize)]
struct PointKeyframeFile {
    time: f32,
    value: [f32; 2],
    #[serde(default, skip_serializing_if = "ease_is_none")]
    ease: EaseMethod,
}

#[derive(Debug, Serialize, Deserialize)]
struct ColorKeyframeFile {
    time: f32,
    value: [f32; 4],
    #[serde(default, skip_serializing_if = "ease_is_none")]
    ease: EaseMethod,
}

fn ease_is_none(ease: &EaseMethod) -> bool {
    *ease == EaseMethod::None
}

pub fn parse_curve_bank_bytes(bytes: &[u8], key_hint: &str, source_label: &str) -> Result<CurveBank> {
    let file: CurveBankFile = serde_json::from_slice(bytes)
        .with_context(|| format!("Failed to parse curve bank {source_label}"))?;
    if file.version == 0 {
        return Err(anyhow!(
            "Curve bank '{key_hint}' has unsupported version 0 (expected >= 1) in {source_label}"
        ));
    }
    let mut bank = CurveBank::new(file.name.unwrap_or_else(|| key_hint.to_string()));
    for (key, entry) in file.curves {
        let curve = match entry {
            CurveEntryFile::Scalar { keyframes } => {
                if keyframes.is_empty() {
                    return Err(anyhow!("Curve '{key}' must contain at least one keyframe"));
                }
                let frames = keyframes
                    .into_iter()
                    .map(|frame| Keyframe::with_ease(frame.time, frame.value, frame.ease))
                    .collect();
                TypedCurve::Scalar(
                    ScalarCurve::from_keyframes(frames).with_context(|| format!("Curve '{key}'"))?,
                )
            }
            CurveEntryFile::Point { keyframes } => {
                if keyframes.is_empty() {
                    return Err(anyhow!("Curve '{key}' must contain at least one keyframe"));
                }
                let frames = keyframes
                    .into_iter()
                    .map(|frame| {
                        Keyframe::with_ease(frame.time, Vec2::from_array(frame.value), frame.ease)
                    })
                    .collect();
                TypedCurve::Point(
                    PointCurve::from_keyframes(frames).with_context(|| format!("Curve '{key}'"))?,
                )
            }
            CurveEntryFile::Color { keyframes } => {
                if keyframes.is_empty() {
                    return Err(anyhow!("Curve '{key}' must contain at least one keyframe"));
                }
                let frames = keyframes
                    .into_iter()
                    .map(|frame| {
                        Keyframe::with_ease(frame.time, Vec4::from_array(frame.value), frame.ease)
                    })
                    .collect();
                TypedCurve::Color(
                    ColorCurve::from_keyframes(frames).with_context(|| format!("Curve '{key}'"))?,
                )
            }
        };
        bank.insert(key, curve);
    }
    Ok(bank)
}

pub fn load_curve_bank(path: impl AsRef<Path>) -> Result<CurveBank> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Reading curve bank {}", path.display()))?;
    let key_hint = path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("curve_bank");
    parse_curve_bank_bytes(&bytes, key_hint, &path.display().to_string())
}

pub fn save_curve_bank(path: impl AsRef<Path>, bank: &CurveBank) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Creating curve bank directory {}", parent.display()))?;
    }
    let file = CurveBankFile {
        version: 1,
        name: if bank.name.is_empty() { None } else { Some(bank.name.clone()) },
        curves: bank
            .iter()
            .map(|(key, curve)| (key.to_string(), curve_to_entry(curve)))
            .collect(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    fs::write(path, json.as_bytes())
        .with_context(|| format!("Writing curve bank {}", path.display()))?;
    Ok(())
}

fn curve_to_entry(curve: &TypedCurve) -> CurveEntryFile {
    match curve {
        TypedCurve::Scalar(curve) => CurveEntryFile::Scalar {
            keyframes: curve
                .keyframes()
                .iter()
                .map(|frame| ScalarKeyframeFile { time: frame.time, value: frame.value, ease: frame.ease })
                .collect(),
        },
        TypedCurve::Point(curve) => CurveEntryFile::Point {
            keyframes: curve
                .keyframes()
                .iter()
                .map(|frame| PointKeyframeFile {
                    time: frame.time,
                    value: frame.value.to_array(),
                    ease: frame.ease,
                })
                .collect(),
        },
        TypedCurve::Color(curve) => CurveEntryFile::Color {
            keyframes: curve
                .keyframes()
                .iter()
                .map(|frame| ColorKeyframeFile {
                    time: frame.time,
                    value: frame.value.to_array(),
                    ease: frame.ease,
                })
                .collect(),
        },
    }
}
