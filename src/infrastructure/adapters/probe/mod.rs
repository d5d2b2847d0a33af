//! Audio Probe Adapter - 基于 symphonia 的音频探测

mod symphonia_probe;

pub use symphonia_probe::SymphoniaProbe;
