//! Configuration resolver: symbolic settings from the embedding page mapped
//! to the numeric parameters the simulation runs on.

use serde::Deserialize;

/// Speed preset. Unknown names resolve to `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum SpeedSetting {
    Fast,
    #[default]
    Medium,
    Slow,
    None,
}

impl SpeedSetting {
    pub fn from_name(name: &str) -> Self {
        match name {
            "fast" => Self::Fast,
            "slow" => Self::Slow,
            "none" => Self::None,
            "medium" => Self::Medium,
            other => {
                log::warn!("unknown speed {:?}, using medium", other);
                Self::Medium
            }
        }
    }

    /// Base velocity magnitude. Each axis of a fresh particle gets
    /// `(u - 0.5) * base` for uniform `u`.
    pub fn base_velocity(self) -> f32 {
        match self {
            Self::Fast => 0.18,
            // Slow is tuned faster than medium in the shipped presets.
            Self::Slow => 0.17,
            Self::None => 0.0,
            Self::Medium => 0.1,
        }
    }
}

impl From<String> for SpeedSetting {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Density preset, or an explicit divisor (surface area per particle).
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "RawDensity")]
pub enum DensitySetting {
    #[default]
    High,
    Medium,
    Low,
    Custom(f32),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDensity {
    Number(f32),
    Name(String),
}

impl From<RawDensity> for DensitySetting {
    fn from(raw: RawDensity) -> Self {
        match raw {
            RawDensity::Number(n) => Self::Custom(n),
            RawDensity::Name(name) => Self::from_name(&name),
        }
    }
}

impl DensitySetting {
    pub const MEDIUM_DIVISOR: f32 = 20000.0;

    pub fn from_name(name: &str) -> Self {
        match name {
            "high" => Self::High,
            "low" => Self::Low,
            "medium" => Self::Medium,
            other => {
                log::warn!("unknown density {:?}, using medium", other);
                Self::Medium
            }
        }
    }

    /// Surface area (CSS px²) per particle.
    pub fn divisor(self) -> f32 {
        match self {
            Self::High => 8400.0,
            Self::Low => 10000.0,
            Self::Medium => Self::MEDIUM_DIVISOR,
            Self::Custom(n) if n.is_finite() && n > 0.0 => n,
            Self::Custom(n) => {
                log::warn!("density {} is not a positive number, using medium", n);
                Self::MEDIUM_DIVISOR
            }
        }
    }
}

/// Resolve an optional speed setting; absent means medium.
pub fn resolve_speed(speed: Option<SpeedSetting>) -> f32 {
    speed.unwrap_or(SpeedSetting::Medium).base_velocity()
}

/// Resolve an optional density setting; absent means medium.
pub fn resolve_density(density: Option<DensitySetting>) -> f32 {
    density.unwrap_or(DensitySetting::Medium).divisor()
}

/// Upper bound on ordinary particles per seed. Tiny custom densities would
/// otherwise allocate without limit.
pub const MAX_PARTICLES: usize = 2000;

/// Number of ordinary particles for a surface area, excluding the anchor.
/// Capped at [`MAX_PARTICLES`].
pub fn particle_count(area: f32, divisor: f32) -> usize {
    if area <= 0.0 || divisor <= 0.0 {
        return 0;
    }
    let count = (area as f64 / divisor as f64).floor();
    if count > MAX_PARTICLES as f64 {
        log::warn!("density {} yields {} particles, capping at {}", divisor, count, MAX_PARTICLES);
        return MAX_PARTICLES;
    }
    count as usize
}

/// Page-facing configuration. Field names follow the component props
/// (camelCase in JSON); every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundConfig {
    /// Base particle color, any CSS color string.
    pub particle_color: String,
    /// Enables the anchor particle, pointer glow and spawn-on-release.
    pub interactive: bool,
    pub speed: Option<SpeedSetting>,
    pub density: Option<DensitySetting>,
    /// Drives Running vs FadingOut/Stopped.
    pub active: bool,
    /// Sparks, ripples and horizontal hue drift. Off gives the simple variant.
    pub effects: bool,
    /// Proximity threshold for connections, in CSS px.
    pub connection_distance: f32,
    /// Fixed RNG seed. `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            particle_color: "#7cd6ff".to_string(),
            interactive: true,
            speed: Some(SpeedSetting::Medium),
            density: Some(DensitySetting::High),
            active: true,
            effects: true,
            connection_distance: SimParams::DEFAULT_CONNECTION_DISTANCE,
            seed: None,
        }
    }
}

impl BackgroundConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve the numeric simulation parameters.
    pub fn params(&self) -> SimParams {
        let connection_distance = if self.connection_distance.is_finite() && self.connection_distance > 0.0 {
            self.connection_distance
        } else {
            log::warn!(
                "connection distance {} is not positive, using {}",
                self.connection_distance,
                SimParams::DEFAULT_CONNECTION_DISTANCE
            );
            SimParams::DEFAULT_CONNECTION_DISTANCE
        };
        SimParams {
            base_velocity: resolve_speed(self.speed),
            density_divisor: resolve_density(self.density),
            connection_distance,
            ..SimParams::default()
        }
    }
}

/// Numeric simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    pub base_velocity: f32,
    pub density_divisor: f32,
    pub connection_distance: f32,
    /// Pointer distance beyond which particles do not glow.
    pub max_glow_distance: f32,
    /// How far past the bounds a particle travels before reflecting.
    pub wall_margin: f32,
    /// Glow smoothing rate (1 / seconds).
    pub glow_rate: f32,
}

impl SimParams {
    pub const DEFAULT_CONNECTION_DISTANCE: f32 = 130.0;
    pub const DEFAULT_MAX_GLOW_DISTANCE: f32 = 120.0;
    pub const DEFAULT_WALL_MARGIN: f32 = 20.0;
    pub const DEFAULT_GLOW_RATE: f32 = 1.0 / 0.3;
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            base_velocity: SpeedSetting::Medium.base_velocity(),
            density_divisor: DensitySetting::MEDIUM_DIVISOR,
            connection_distance: Self::DEFAULT_CONNECTION_DISTANCE,
            max_glow_distance: Self::DEFAULT_MAX_GLOW_DISTANCE,
            wall_margin: Self::DEFAULT_WALL_MARGIN,
            glow_rate: Self::DEFAULT_GLOW_RATE,
        }
    }
}
