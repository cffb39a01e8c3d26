use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::physic_engine::types::{MinMax, Point, Vec2};

// ==================================
// Sous-structures de configuration
// ==================================

/// Style des extrémités de ligne (`lineCap`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Round,
    Square,
    Butt,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LineWidth {
    pub explosion: MinMax<f32>,
    pub trace: MinMax<f32>,
}

impl Default for LineWidth {
    fn default() -> Self {
        Self {
            explosion: MinMax::new(1.0, 3.0),
            trace: MinMax::new(1.0, 2.0),
        }
    }
}

/// Mise à jour partielle de [`LineWidth`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LineWidthUpdate {
    pub explosion: Option<MinMax<f32>>,
    pub trace: Option<MinMax<f32>>,
}

impl LineWidth {
    pub fn apply(&mut self, update: &LineWidthUpdate) {
        if let Some(explosion) = update.explosion {
            self.explosion = explosion;
        }
        if let Some(trace) = update.trace {
            self.trace = trace;
        }
    }
}

/// Rectangle limitant les cibles des fusées.
///
/// `width`/`height` <= 0 signifie "taille du canvas".
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Boundaries {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Boundaries {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            width: 0.0,
            height: 0.0,
        }
    }
}

/// Mise à jour partielle de [`Boundaries`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BoundariesUpdate {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl Boundaries {
    /// Taille effective du rectangle : celle du canvas pour une dimension non renseignée.
    pub fn effective_size(&self, canvas_size: Vec2) -> Vec2 {
        Vec2::new(
            if self.width > 0.0 { self.width } else { canvas_size.x },
            if self.height > 0.0 { self.height } else { canvas_size.y },
        )
    }

    pub fn apply(&mut self, update: &BoundariesUpdate) {
        if let Some(x) = update.x {
            self.x = x;
        }
        if let Some(y) = update.y {
            self.y = y;
        }
        if let Some(width) = update.width {
            self.width = width;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MouseOptions {
    /// Le clic maintenu lance des fusées vers le pointeur
    pub click: bool,
    /// Le simple survol oriente les fusées vers le pointeur
    #[serde(rename = "move")]
    pub follow: bool,
    /// Nombre max de fusées en vol pendant une interaction
    pub max: usize,
}

impl Default for MouseOptions {
    fn default() -> Self {
        Self {
            click: false,
            follow: false,
            max: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MouseOptionsUpdate {
    pub click: Option<bool>,
    #[serde(rename = "move")]
    pub follow: Option<bool>,
    pub max: Option<usize>,
}

impl MouseOptions {
    pub fn apply(&mut self, update: &MouseOptionsUpdate) {
        if let Some(click) = update.click {
            self.click = click;
        }
        if let Some(follow) = update.follow {
            self.follow = follow;
        }
        if let Some(max) = update.max {
            self.max = max;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundOptions {
    pub enabled: bool,
    /// Volume en pourcents, tiré à chaque explosion
    pub volume: MinMax<i32>,
}

impl Default for SoundOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            volume: MinMax::new(4, 8),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundOptionsUpdate {
    pub enabled: Option<bool>,
    pub volume: Option<MinMax<i32>>,
}

impl SoundOptions {
    pub fn apply(&mut self, update: &SoundOptionsUpdate) {
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        if let Some(volume) = update.volume {
            self.volume = volume;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetOptions {
    pub enabled: bool,
    pub x: f32,
    pub y: f32,
}

impl TargetOptions {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn apply(&mut self, update: &TargetOptionsUpdate) {
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        if let Some(x) = update.x {
            self.x = x;
        }
        if let Some(y) = update.y {
            self.y = y;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetOptionsUpdate {
    pub enabled: Option<bool>,
    pub x: Option<f32>,
    pub y: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleKeyword {
    Random,
}

/// Angle de lancement (degrés, 0° = vers la droite, 90° = vers le haut).
///
/// En TOML : `launch_angle = 75`, `launch_angle = { min = 60, max = 120 }`
/// ou `launch_angle = "random"`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LaunchAngle {
    Degrees(f32),
    Range(MinMax<f32>),
    Keyword(AngleKeyword),
}

// ==================================
// FireworksOptions
// ==================================

/// Snapshot de tous les paramètres réglables de l'animation.
///
/// Construction : `FireworksOptions::default()`, `FireworksOptionsBuilder`,
/// ou `FireworksOptions::from_file("fireworks.toml")` (toutes les clés sont optionnelles).
#[derive(Debug, Clone, PartialEq, Builder, Deserialize, Serialize)]
#[builder(pattern = "owned", build_fn(error = "anyhow::Error"))]
#[serde(default)]
pub struct FireworksOptions {
    /// Teinte des fusées (degrés)
    #[builder(default = "MinMax::new(0, 360)")]
    pub hue: MinMax<i32>,

    /// Bande horizontale de départ des fusées, en pourcents de la largeur
    #[builder(default = "MinMax::new(50, 50)")]
    pub rockets_point: MinMax<i32>,

    /// Opacité du voile noir appliqué à chaque frame (effet de traînée)
    #[builder(default = "0.5")]
    pub opacity: f32,

    #[builder(default = "1.05")]
    pub acceleration: f32,

    #[builder(default = "0.95")]
    pub friction: f32,

    #[builder(default = "1.5")]
    pub gravity: f32,

    /// Nombre de fragments par explosion
    #[builder(default = "50.0")]
    pub particles: f32,

    /// Longueur de la traînée des fragments
    #[builder(default = "5.0")]
    pub explosion: f32,

    /// Longueur de la traînée des fusées
    #[builder(default = "3.0")]
    pub trace_length: f32,

    #[builder(default = "10.0")]
    pub trace_speed: f32,

    /// Probabilité (en %) qu'un fragment scintille
    #[builder(default = "50.0")]
    pub flickering: f32,

    /// Facteur de vitesse du compteur de ticks
    #[builder(default = "30.0")]
    pub intensity: f32,

    #[builder(default)]
    pub line_style: LineStyle,

    #[builder(default)]
    pub line_width: LineWidth,

    #[builder(default = "MinMax::new(50, 80)")]
    pub brightness: MinMax<i32>,

    #[builder(default = "MinMax::new(0.015, 0.03)")]
    pub decay: MinMax<f32>,

    /// Délai entre deux lancements automatiques (en ticks)
    #[builder(default = "MinMax::new(30, 60)")]
    pub delay: MinMax<i32>,

    #[builder(default)]
    pub boundaries: Boundaries,

    #[builder(default)]
    pub mouse: MouseOptions,

    #[builder(default)]
    pub sound: SoundOptions,

    #[builder(default)]
    pub launch_angle: Option<LaunchAngle>,

    #[builder(default)]
    pub burst_distance: Option<f32>,

    #[builder(default)]
    pub target: TargetOptions,
}

impl Default for FireworksOptions {
    fn default() -> Self {
        Self {
            hue: MinMax::new(0, 360),
            rockets_point: MinMax::new(50, 50),
            opacity: 0.5,
            acceleration: 1.05,
            friction: 0.95,
            gravity: 1.5,
            particles: 50.0,
            explosion: 5.0,
            trace_length: 3.0,
            trace_speed: 10.0,
            flickering: 50.0,
            intensity: 30.0,
            line_style: LineStyle::default(),
            line_width: LineWidth::default(),
            brightness: MinMax::new(50, 80),
            decay: MinMax::new(0.015, 0.03),
            delay: MinMax::new(30, 60),
            boundaries: Boundaries::default(),
            mouse: MouseOptions::default(),
            sound: SoundOptions::default(),
            launch_angle: None,
            burst_distance: None,
            target: TargetOptions::default(),
        }
    }
}

impl FireworksOptions {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Fusionne une mise à jour partielle dans les options courantes.
    pub fn update(&mut self, update: OptionsUpdate) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = update.$field {
                    self.$field = v;
                })*
            };
        }

        merge!(
            hue,
            rockets_point,
            opacity,
            acceleration,
            friction,
            gravity,
            particles,
            explosion,
            trace_length,
            trace_speed,
            flickering,
            intensity,
            line_style,
            brightness,
            decay,
            delay,
        );

        // sous-tables : fusion champ par champ
        if let Some(line_width) = &update.line_width {
            self.line_width.apply(line_width);
        }
        if let Some(boundaries) = &update.boundaries {
            self.boundaries.apply(boundaries);
        }
        if let Some(mouse) = &update.mouse {
            self.mouse.apply(mouse);
        }
        if let Some(sound) = &update.sound {
            self.sound.apply(sound);
        }
        if let Some(target) = &update.target {
            self.target.apply(target);
        }
        // `Some(None)` permet de désactiver explicitement angle/distance
        if let Some(angle) = update.launch_angle {
            self.launch_angle = angle;
        }
        if let Some(distance) = update.burst_distance {
            self.burst_distance = distance;
        }
    }
}

/// Mise à jour partielle de [`FireworksOptions`] : seuls les champs `Some` sont appliqués.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OptionsUpdate {
    pub hue: Option<MinMax<i32>>,
    pub rockets_point: Option<MinMax<i32>>,
    pub opacity: Option<f32>,
    pub acceleration: Option<f32>,
    pub friction: Option<f32>,
    pub gravity: Option<f32>,
    pub particles: Option<f32>,
    pub explosion: Option<f32>,
    pub trace_length: Option<f32>,
    pub trace_speed: Option<f32>,
    pub flickering: Option<f32>,
    pub intensity: Option<f32>,
    pub line_style: Option<LineStyle>,
    pub line_width: Option<LineWidthUpdate>,
    pub brightness: Option<MinMax<i32>>,
    pub decay: Option<MinMax<f32>>,
    pub delay: Option<MinMax<i32>>,
    pub boundaries: Option<BoundariesUpdate>,
    pub mouse: Option<MouseOptionsUpdate>,
    pub sound: Option<SoundOptionsUpdate>,
    pub launch_angle: Option<Option<LaunchAngle>>,
    pub burst_distance: Option<Option<f32>>,
    pub target: Option<TargetOptionsUpdate>,
}

impl OptionsUpdate {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn boundaries(boundaries: BoundariesUpdate) -> Self {
        Self {
            boundaries: Some(boundaries),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_default() {
        let built = FireworksOptionsBuilder::default().build().unwrap();
        assert_eq!(built, FireworksOptions::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let opts: FireworksOptions = toml::from_str(
            r#"
            particles = 120
            launch_angle = "random"

            [delay]
            min = 10
            max = 10
            "#,
        )
        .unwrap();

        assert_eq!(opts.particles, 120.0);
        assert_eq!(opts.delay, MinMax::new(10, 10));
        assert_eq!(
            opts.launch_angle,
            Some(LaunchAngle::Keyword(AngleKeyword::Random))
        );
        assert_eq!(opts.friction, 0.95);
        assert_eq!(opts.boundaries, Boundaries::default());
    }

    #[test]
    fn test_launch_angle_variants() {
        #[derive(Deserialize)]
        struct Wrapper {
            a: LaunchAngle,
        }
        let fixed: Wrapper = toml::from_str("a = 45").unwrap();
        assert_eq!(fixed.a, LaunchAngle::Degrees(45.0));
        let range: Wrapper = toml::from_str("a = { min = 60, max = 120 }").unwrap();
        assert_eq!(range.a, LaunchAngle::Range(MinMax::new(60.0, 120.0)));
    }

    #[test]
    fn test_update_merges_only_given_fields() {
        let mut opts = FireworksOptions::default();
        opts.update(OptionsUpdate {
            gravity: Some(0.5),
            boundaries: Some(BoundariesUpdate {
                width: Some(800.0),
                ..Default::default()
            }),
            burst_distance: Some(Some(300.0)),
            ..Default::default()
        });

        assert_eq!(opts.gravity, 0.5);
        assert_eq!(opts.boundaries.width, 800.0);
        assert_eq!(opts.boundaries.x, 50.0);
        assert_eq!(opts.burst_distance, Some(300.0));
        assert_eq!(opts.friction, 0.95);

        opts.update(OptionsUpdate {
            burst_distance: Some(None),
            ..Default::default()
        });
        assert_eq!(opts.burst_distance, None);
    }

    #[test]
    fn test_options_update_from_toml() {
        let update = OptionsUpdate::from_toml(
            r#"
            opacity = 0.2
            [boundaries]
            y = 10
            "#,
        )
        .unwrap();
        assert_eq!(update.opacity, Some(0.2));
        assert_eq!(update.boundaries.unwrap().y, Some(10.0));
        assert_eq!(update.gravity, None);
    }

    #[test]
    fn test_nested_partial_update_keeps_other_fields() {
        let mut opts = FireworksOptions::default();
        opts.mouse.max = 5;
        opts.mouse.follow = true;
        opts.sound.volume = MinMax::new(20, 40);
        opts.target = TargetOptions {
            enabled: false,
            x: 120.0,
            y: 80.0,
        };
        opts.line_width.trace = MinMax::new(4.0, 6.0);

        let update = OptionsUpdate::from_toml(
            r#"
            [mouse]
            click = true

            [sound]
            enabled = true

            [target]
            enabled = true

            [line_width.explosion]
            min = 2
            max = 2
            "#,
        )
        .unwrap();
        opts.update(update);

        assert!(opts.mouse.click);
        assert_eq!(opts.mouse.max, 5);
        assert!(opts.mouse.follow);
        assert!(opts.sound.enabled);
        assert_eq!(opts.sound.volume, MinMax::new(20, 40));
        assert!(opts.target.enabled);
        assert_eq!(opts.target.point(), Point::new(120.0, 80.0));
        assert_eq!(opts.line_width.explosion, MinMax::new(2.0, 2.0));
        assert_eq!(opts.line_width.trace, MinMax::new(4.0, 6.0));
    }
}
