use generational_arena::Index;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio_engine::{AudioEngine, Sound};
use crate::physic_engine::{
    config::FireworksOptions,
    explosion::{Explosion, ExplosionParams},
    helpers::{floor, get_distance, random_float, random_int, sample_float, sample_int},
    live_set::{LiveSet, Retain},
    targeting::{clamp_target, direction_from_angle, normalize_direction, resolve_angle},
    trace::{Trace, TraceParams},
    types::{Color, Point, Vec2},
};
use crate::renderer_engine::{Canvas2D, CompositeOperation, LineCap, Rect};
use crate::window_engine::{PointerState, RequestAnimationFrame};

/// Dépendances d'une frame, passées explicitement par le contrôleur.
pub struct FrameContext<'a, A: AudioEngine> {
    pub options: &'a FireworksOptions,
    pub pointer: &'a dyn PointerState,
    pub sound: &'a Sound<A>,
    pub scheduler: &'a mut RequestAnimationFrame,
    /// Lancements automatiques (désactivés pendant un drain)
    pub auto_launch: bool,
}

/// Moteur de l'animation : fusées et fragments vivants, décision de lancement,
/// calcul des cibles et composition de la frame.
#[derive(Debug)]
pub struct FireworksEngine {
    traces: LiveSet<Trace>,
    explosions: LiveSet<Explosion>,
    /// Fragments créés pendant la frame courante, ajoutés après la passe explosions
    pending_explosions: Vec<Explosion>,

    width: f32,
    height: f32,
    rng: StdRng,
}

impl FireworksEngine {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_rng(width, height, StdRng::from_rng(&mut rand::rng()))
    }

    /// Moteur déterministe (tests, rendus reproductibles).
    pub fn with_seed(width: f32, height: f32, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: f32, height: f32, rng: StdRng) -> Self {
        Self {
            traces: LiveSet::new(),
            explosions: LiveSet::with_capacity(512),
            pending_explosions: Vec::new(),
            width,
            height,
            rng,
        }
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn traces_count(&self) -> usize {
        self.traces.len()
    }

    pub fn explosions_count(&self) -> usize {
        self.explosions.len() + self.pending_explosions.len()
    }

    /// Plus aucune fusée ni aucun fragment vivant.
    pub fn is_idle(&self) -> bool {
        self.traces.is_empty() && self.explosions.is_empty() && self.pending_explosions.is_empty()
    }

    pub fn traces(&self) -> impl Iterator<Item = &Trace> {
        self.traces.iter()
    }

    pub fn trace(&self, idx: Index) -> Option<&Trace> {
        self.traces.get(idx)
    }

    pub fn explosions(&self) -> impl Iterator<Item = &Explosion> {
        self.explosions.iter()
    }

    pub fn clear(&mut self) {
        self.traces.clear();
        self.explosions.clear();
        self.pending_explosions.clear();
    }

    /// Une frame complète : voile + modes de composition, décision de lancement,
    /// passe fusées, passe fragments.
    pub fn advance_frame<A: AudioEngine>(
        &mut self,
        canvas: &mut dyn Canvas2D,
        ctx: FrameContext<'_, A>,
    ) {
        let line_width = self.prepare_surface(canvas, ctx.options);

        if ctx.auto_launch {
            self.init_trace(ctx.options, ctx.pointer, ctx.scheduler);
        }
        self.draw_traces(canvas, ctx.options, ctx.sound, line_width);
        self.draw_explosions(canvas, ctx.options);

        // les gerbes de cette frame ne sont dessinées qu'à partir de la suivante
        self.explosions.extend(self.pending_explosions.drain(..));
    }

    /// Voile noir soustractif puis passage en mode additif; retourne la largeur
    /// de trait des fusées pour la frame.
    fn prepare_surface(&mut self, canvas: &mut dyn Canvas2D, options: &FireworksOptions) -> f32 {
        canvas.set_composite_operation(CompositeOperation::DestinationOut);
        canvas.fill_rect(
            Rect::new(0.0, 0.0, self.width, self.height),
            Color::new(0.0, 0.0, 0.0, options.opacity),
        );
        canvas.set_composite_operation(CompositeOperation::Lighter);

        sample_float(&mut self.rng, &options.line_width.trace)
    }

    /// Décision de lancement : délai aléatoire écoulé, ou interaction pointeur
    /// active avec moins de `mouse.max` fusées en vol.
    pub fn init_trace(
        &mut self,
        options: &FireworksOptions,
        pointer: &dyn PointerState,
        scheduler: &mut RequestAnimationFrame,
    ) -> Option<Index> {
        let delay = sample_int(&mut self.rng, &options.delay) as f32;
        let pointer_launch = pointer.is_active() && options.mouse.max > self.traces.len();

        if scheduler.tick() > delay || pointer_launch {
            let idx = self.create_trace(options, pointer);
            scheduler.reset_tick();
            return Some(idx);
        }
        None
    }

    /// Crée une fusée : départ sur le bord bas, cible résolue puis bornée.
    pub fn create_trace(&mut self, options: &FireworksOptions, pointer: &dyn PointerState) -> Index {
        let start = Point::new(
            self.width * sample_int(&mut self.rng, &options.rockets_point) as f32 / 100.0,
            self.height,
        );
        let target = self.resolve_target(options, pointer, start);

        let params = TraceParams {
            origin: start,
            target,
            hue: sample_int(&mut self.rng, &options.hue) as f32,
            speed: options.trace_speed,
            acceleration: options.acceleration,
            trace_length: floor(options.trace_length),
        };

        debug!(
            "🚀 Trace spawned ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            start.x, start.y, target.x, target.y
        );
        let trace = Trace::new(params, &mut self.rng);
        self.traces.push(trace)
    }

    /// Cible d'une fusée partant de `start`, par priorité :
    /// pointeur, cible fixe, angle/distance configurés, point aléatoire.
    pub fn resolve_target(
        &mut self,
        options: &FireworksOptions,
        pointer: &dyn PointerState,
        start: Point,
    ) -> Point {
        let boundaries = &options.boundaries;
        let bounds = boundaries.effective_size(self.size());

        // point de repli : moitié haute de la zone, en retrait des bords
        let fallback = Point::new(
            random_int(
                &mut self.rng,
                boundaries.x as i32,
                (bounds.x - boundaries.x) as i32,
            ) as f32,
            random_int(
                &mut self.rng,
                boundaries.y as i32,
                (bounds.y * 0.5) as i32,
            ) as f32,
        );

        let pointer_available = pointer.is_active()
            || (options.mouse.follow && pointer.has_finite_position());

        let angle = resolve_angle(&mut self.rng, options.launch_angle.as_ref());

        let target: Point = if pointer_available {
            pointer.position().into()
        } else if options.target.enabled {
            options.target.point()
        } else if angle.is_some() || options.burst_distance.is_some() {
            let distance = options
                .burst_distance
                .unwrap_or_else(|| get_distance(start.x, start.y, fallback.x, fallback.y));
            let direction = match angle {
                Some(deg) => direction_from_angle(deg),
                None => normalize_direction(start, fallback),
            };
            (Vec2::from(start) + direction * distance).into()
        } else {
            fallback
        };

        clamp_target(target.x, target.y, boundaries, self.size())
    }

    fn draw_traces<A: AudioEngine>(
        &mut self,
        canvas: &mut dyn Canvas2D,
        options: &FireworksOptions,
        sound: &Sound<A>,
        line_width: f32,
    ) {
        let cap = LineCap::from(options.line_style);
        let rng = &mut self.rng;
        let mut bursts: Vec<(f32, f32, f32)> = Vec::new();

        self.traces.visit_rev(|trace| {
            trace.draw(&mut *canvas, line_width, cap);

            let mut completed = None;
            trace.update(|x, y, hue| completed = Some((x, y, hue)));

            match completed {
                Some((x, y, hue)) => {
                    sound.play(&options.sound, (x, y), &mut *rng);
                    bursts.push((x, y, hue));
                    Retain::Remove
                }
                None => Retain::Keep,
            }
        });

        for (x, y, hue) in bursts {
            self.init_explosion(x, y, hue, options);
        }
    }

    /// Gerbe de `particles` fragments au point d'arrivée d'une fusée.
    fn init_explosion(&mut self, x: f32, y: f32, hue: f32, options: &FireworksOptions) {
        let count = floor(options.particles);
        self.pending_explosions.reserve(count);

        for _ in 0..count {
            let params = ExplosionParams {
                pos: Point::new(x, y),
                hue,
                friction: options.friction,
                gravity: options.gravity,
                flickering: random_float(&mut self.rng, 0.0, 100.0) < options.flickering,
                line_width: sample_float(&mut self.rng, &options.line_width.explosion),
                explosion_length: floor(options.explosion),
                brightness: options.brightness,
                decay: options.decay,
            };
            let fragment = Explosion::new(params, &mut self.rng);
            self.pending_explosions.push(fragment);
        }

        debug!("💥 Burst of {} fragments at ({:.1}, {:.1})", count, x, y);
    }

    fn draw_explosions(&mut self, canvas: &mut dyn Canvas2D, options: &FireworksOptions) {
        let cap = LineCap::from(options.line_style);
        let rng = &mut self.rng;

        self.explosions.visit_rev(|fragment| {
            fragment.draw(&mut *canvas, cap, &mut *rng);

            let mut done = false;
            fragment.update(&mut *rng, || done = true);
            if done {
                Retain::Remove
            } else {
                Retain::Keep
            }
        });
    }
}
