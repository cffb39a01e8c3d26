use crate::physic_engine::config::MouseOptions;
use crate::physic_engine::types::Vec2;

/// État du pointeur tel que le moteur le consomme.
pub trait PointerState {
    /// Position courante; composantes non finies si inconnue.
    fn position(&self) -> Vec2;

    /// Interaction en cours (clic maintenu).
    fn is_active(&self) -> bool;

    fn has_finite_position(&self) -> bool {
        let p = self.position();
        p.x.is_finite() && p.y.is_finite()
    }
}

/// Pointeur alimenté par les événements de l'hôte (coordonnées canvas).
#[derive(Debug, Clone, Copy)]
pub struct Mouse {
    pos: Vec2,
    active: bool,
}

impl Default for Mouse {
    fn default() -> Self {
        Self {
            pos: Vec2::NAN,
            active: false,
        }
    }
}

impl Mouse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, options: &MouseOptions) {
        self.pos = Vec2::new(x, y);
        self.active = options.click;
    }

    pub fn pointer_up(&mut self) {
        self.active = false;
    }

    pub fn pointer_move(&mut self, x: f32, y: f32, options: &MouseOptions) {
        if self.active || options.follow {
            self.pos = Vec2::new(x, y);
        }
    }

    /// Le pointeur sort du canvas : position oubliée.
    pub fn pointer_leave(&mut self) {
        self.pos = Vec2::NAN;
        self.active = false;
    }
}

impl PointerState for Mouse {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
