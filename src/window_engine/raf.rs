use std::f32::consts::PI;

/// Cadence cible du rendu
pub const DEFAULT_FPS: f32 = 60.0;
/// Tolérance (ms) sur l'intervalle entre deux frames
pub const FRAME_TOLERANCE_MS: f64 = 0.1;

/// Équivalent d'un abonnement `requestAnimationFrame` piloté par l'hôte.
///
/// L'hôte appelle [`RequestAnimationFrame::poll`] à chaque repaint avec un
/// timestamp monotone (ms); le scheduler décide si une frame doit être rendue
/// (limitation à `fps`) et fait avancer le compteur de ticks utilisé pour le
/// délai entre deux lancements.
#[derive(Debug, Clone)]
pub struct RequestAnimationFrame {
    tick: f32,
    fps: f32,
    tolerance: f64,
    mounted: bool,
    /// Ancre temporelle de la dernière frame rendue (`None` : pas encore de timestamp)
    now: Option<f64>,
}

impl Default for RequestAnimationFrame {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl RequestAnimationFrame {
    pub fn new(fps: f32) -> Self {
        Self {
            tick: 0.0,
            fps,
            tolerance: FRAME_TOLERANCE_MS,
            mounted: false,
            now: None,
        }
    }

    pub fn tick(&self) -> f32 {
        self.tick
    }

    pub fn set_tick(&mut self, tick: f32) {
        self.tick = tick;
    }

    pub fn reset_tick(&mut self) {
        self.tick = 0.0;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Abonne le scheduler; l'ancre temporelle est prise au premier `poll`.
    pub fn mount(&mut self) {
        self.mounted = true;
        self.now = None;
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    fn interval_ms(&self) -> f64 {
        1000.0 / self.fps.max(1.0) as f64
    }

    /// Retourne `true` si une frame doit être rendue à `timestamp_ms`.
    pub fn poll(&mut self, timestamp_ms: f64, intensity: f32) -> bool {
        if !self.mounted {
            return false;
        }

        let Some(now) = self.now else {
            self.now = Some(timestamp_ms);
            return false;
        };

        let interval = self.interval_ms();
        let delta = timestamp_ms - now;
        if delta < interval - self.tolerance {
            return false;
        }

        self.now = Some(timestamp_ms - delta % interval);
        self.tick += (delta as f32 * intensity * PI) / 1000.0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmounted_never_renders() {
        let mut raf = RequestAnimationFrame::default();
        assert!(!raf.poll(0.0, 30.0));
        assert!(!raf.poll(1000.0, 30.0));
        assert_eq!(raf.tick(), 0.0);
    }

    #[test]
    fn test_throttles_to_fps() {
        let mut raf = RequestAnimationFrame::new(60.0);
        raf.mount();
        assert!(!raf.poll(0.0, 30.0)); // ancre
        assert!(!raf.poll(5.0, 30.0)); // trop tôt
        assert!(raf.poll(16.7, 30.0));
        assert!(raf.tick() > 0.0);
    }

    #[test]
    fn test_tick_scales_with_intensity() {
        let mut raf = RequestAnimationFrame::new(60.0);
        raf.mount();
        raf.poll(0.0, 30.0);
        raf.poll(1000.0, 30.0);
        // 1 s à l'intensité 30 : 30π ticks
        assert!((raf.tick() - 30.0 * PI).abs() < 1e-3);

        raf.reset_tick();
        assert_eq!(raf.tick(), 0.0);
    }

    #[test]
    fn test_unmount_then_mount_takes_new_anchor() {
        let mut raf = RequestAnimationFrame::new(60.0);
        raf.mount();
        raf.poll(0.0, 30.0);
        raf.unmount();
        assert!(!raf.poll(500.0, 30.0));
        raf.mount();
        assert!(!raf.poll(10_000.0, 30.0));
        assert!(raf.poll(10_017.0, 30.0));
    }
}
