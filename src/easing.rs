use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// How the interpolation ratio is shaped on the way into a keyframe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseMethod {
    #[default]
    None,
    In,
    Out,
    InBack,
    OutBack,
    InOutBack,
    InElastic,
    OutElastic,
    UpAndDown,
    UpAndDownElastic,
}

impl EaseMethod {
    pub fn from_label(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "in" => Self::In,
            "out" => Self::Out,
            "in_back" => Self::InBack,
            "out_back" => Self::OutBack,
            "in_out_back" => Self::InOutBack,
            "in_elastic" => Self::InElastic,
            "out_elastic" => Self::OutElastic,
            "up_and_down" => Self::UpAndDown,
            "up_and_down_elastic" => Self::UpAndDownElastic,
            _ => Self::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::In => "in",
            Self::Out => "out",
            Self::InBack => "in_back",
            Self::OutBack => "out_back",
            Self::InOutBack => "in_out_back",
            Self::InElastic => "in_elastic",
            Self::OutElastic => "out_elastic",
            Self::UpAndDown => "up_and_down",
            Self::UpAndDownElastic => "up_and_down_elastic",
        }
    }

    /// Maps a linear ratio in [0, 1] to the eased ratio.
    pub fn apply(self, n: f32) -> f32 {
        match self {
            Self::None => n,
            Self::In => n * n * n,
            Self::Out => 1.0 - (1.0 - n).powi(3),
            Self::InBack => {
                const MAG1: f32 = 1.70158;
                const MAG2: f32 = MAG1 + 1.0;
                MAG2 * n * n * n - MAG1 * n * n
            }
            Self::OutBack => {
                const MAG1: f32 = 1.70158;
                const MAG2: f32 = MAG1 + 1.0;
                1.0 + MAG2 * (n - 1.0).powi(3) + MAG1 * (n - 1.0).powi(2)
            }
            Self::InOutBack => {
                const MAG1: f32 = 1.70158;
                const MAG2: f32 = MAG1 * 1.525;
                if n < 0.5 {
                    ((2.0 * n).powi(2) * ((MAG2 + 1.0) * 2.0 * n - MAG2)) / 2.0
                } else {
                    ((2.0 * n - 2.0).powi(2) * ((MAG2 + 1.0) * (n * 2.0 - 2.0) + MAG2) + 2.0) / 2.0
                }
            }
            Self::InElastic => {
                const MAG: f32 = TAU / 3.0;
                if n == 0.0 {
                    0.0
                } else if n == 1.0 {
                    1.0
                } else {
                    -(2.0_f32.powf(10.0 * n - 10.0)) * ((n * 10.0 - 10.75) * MAG).sin()
                }
            }
            Self::OutElastic => {
                const MAG: f32 = TAU / 3.0;
                if n == 0.0 {
                    0.0
                } else if n == 1.0 {
                    1.0
                } else {
                    2.0_f32.powf(-10.0 * n) * ((n * 10.0 - 0.75) * MAG).sin() + 1.0
                }
            }
            Self::UpAndDown => (n * TAU / 2.0).sin(),
            Self::UpAndDownElastic => {
                const CP1: f32 = 0.50;
                const CP2: f32 = 0.80;
                const MAG1: f32 = -0.4;
                const MAG2: f32 = 0.15;
                if n < CP1 {
                    let aux = n / CP1;
                    (aux * TAU / 2.0).sin()
                } else if n < CP2 {
                    let aux = (n - CP1) / (CP2 - CP1);
                    (aux * TAU / 2.0).sin() * MAG1
                } else {
                    let aux = (n - CP2) / (1.0 - CP2);
                    (aux * TAU / 2.0).sin() * MAG2
                }
            }
        }
    }
}
