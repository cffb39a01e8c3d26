use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, info};

use crate::audio_engine::{AudioEngine, Sound};
use crate::physic_engine::config::{BoundariesUpdate, FireworksOptions, OptionsUpdate};
use crate::physic_engine::{FireworksEngine, FrameContext, Vec2};
use crate::renderer_engine::Canvas2D;
use crate::window_engine::{Mouse, RequestAnimationFrame};

/// Issue d'une attente d'arrêt ([`Fireworks::wait_stop`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Toutes les fusées et tous les fragments se sont éteints, l'animation est arrêtée
    Drained,
    /// Un `stop` explicite a interrompu l'attente
    Cancelled,
}

/// Attente d'arrêt en cours : vérifiée une fois par frame.
#[derive(Debug)]
struct Drain {
    dispose: bool,
    waiters: Vec<Sender<DrainOutcome>>,
}

impl Drain {
    fn notify(self, outcome: DrainOutcome) {
        for waiter in self.waiters {
            // le receveur a pu être abandonné : rien à faire
            let _ = waiter.send(outcome);
        }
    }
}

/// Contrôleur de l'animation : cycle de vie (start/stop/pause), lancements
/// manuels, options, taille, et point d'entrée de la boucle de rendu de l'hôte.
///
/// L'hôte appelle [`Fireworks::on_animation_frame`] à chaque repaint.
pub struct Fireworks<C, A>
where
    C: Canvas2D,
    A: AudioEngine,
{
    canvas: Option<C>,
    engine: FireworksEngine,
    options: FireworksOptions,
    sound: Sound<A>,
    mouse: Mouse,
    raf: RequestAnimationFrame,
    drain: Option<Drain>,
    running: bool,
}

impl<C, A> Fireworks<C, A>
where
    C: Canvas2D,
    A: AudioEngine,
{
    pub fn new(canvas: C, audio: A, options: FireworksOptions) -> Self {
        let size = canvas.size();
        Self::with_engine(
            Some(canvas),
            audio,
            options,
            FireworksEngine::new(size.x, size.y),
        )
    }

    /// Comme [`Fireworks::new`] avec un tirage aléatoire reproductible.
    pub fn with_seed(canvas: C, audio: A, options: FireworksOptions, seed: u64) -> Self {
        let size = canvas.size();
        Self::with_engine(
            Some(canvas),
            audio,
            options,
            FireworksEngine::with_seed(size.x, size.y, seed),
        )
    }

    /// Contrôleur sans surface : toutes les opérations sont sûres, rien n'est dessiné.
    pub fn detached(audio: A, options: FireworksOptions) -> Self {
        Self::with_engine(None, audio, options, FireworksEngine::new(0.0, 0.0))
    }

    fn with_engine(
        canvas: Option<C>,
        audio: A,
        options: FireworksOptions,
        engine: FireworksEngine,
    ) -> Self {
        let mut fireworks = Self {
            canvas,
            engine,
            options,
            sound: Sound::new(audio),
            mouse: Mouse::new(),
            raf: RequestAnimationFrame::default(),
            drain: None,
            running: false,
        };
        fireworks.update_size(None, None);
        fireworks
    }

    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Une attente d'arrêt est en cours.
    pub fn is_draining(&self) -> bool {
        self.drain.is_some()
    }

    pub fn current_options(&self) -> &FireworksOptions {
        &self.options
    }

    pub fn engine(&self) -> &FireworksEngine {
        &self.engine
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut C> {
        self.canvas.as_mut()
    }

    pub fn audio(&self) -> &A {
        self.sound.backend()
    }

    pub fn audio_mut(&mut self) -> &mut A {
        self.sound.backend_mut()
    }

    /// Monte (ou remplace) la surface de dessin et adapte la taille.
    pub fn mount_canvas(&mut self, canvas: C) {
        let size = canvas.size();
        self.canvas = Some(canvas);
        self.update_size(Some(size.x as u32), Some(size.y as u32));
    }

    /// Détache la surface de dessin; l'animation continue sans rien dessiner.
    pub fn take_canvas(&mut self) -> Option<C> {
        self.canvas.take()
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.raf.mount();
        info!("🎆 Fireworks started");
    }

    /// Arrête l'animation, vide les collections et efface la surface.
    /// `dispose` libère en plus la surface de dessin.
    ///
    /// Une attente d'arrêt en cours est annulée ([`DrainOutcome::Cancelled`]).
    pub fn stop(&mut self, dispose: bool) {
        if let Some(drain) = self.drain.take() {
            debug!("Drain cancelled by explicit stop");
            drain.notify(DrainOutcome::Cancelled);
        }
        self.halt(dispose);
    }

    fn halt(&mut self, dispose: bool) {
        if !self.running {
            return;
        }
        self.running = false;
        self.raf.unmount();
        self.clear();

        if dispose {
            self.canvas = None;
        }
        info!("🛑 Fireworks stopped (dispose: {})", dispose);
    }

    /// Attend que toutes les fusées et tous les fragments soient éteints, puis
    /// arrête l'animation. Les lancements automatiques sont suspendus pendant l'attente.
    ///
    /// Le receveur reçoit [`DrainOutcome::Drained`] à l'arrêt, ou
    /// [`DrainOutcome::Cancelled`] si un `stop` explicite intervient avant.
    pub fn wait_stop(&mut self, dispose: bool) -> Receiver<DrainOutcome> {
        let (tx, rx) = bounded(1);

        if !self.running {
            let _ = tx.send(DrainOutcome::Drained);
            return rx;
        }

        match &mut self.drain {
            Some(drain) => {
                drain.dispose |= dispose;
                drain.waiters.push(tx);
            }
            None => {
                self.drain = Some(Drain {
                    dispose,
                    waiters: vec![tx],
                });
            }
        }

        self.poll_drain();
        rx
    }

    /// Vérification de l'attente d'arrêt (une fois par frame).
    fn poll_drain(&mut self) {
        if self.drain.is_none() || !self.engine.is_idle() {
            return;
        }
        if let Some(drain) = self.drain.take() {
            self.halt(drain.dispose);
            info!("✅ Drain finished");
            drain.notify(DrainOutcome::Drained);
        }
    }

    /// Suspend/reprend l'abonnement au scheduler sans toucher aux entités.
    pub fn pause(&mut self) {
        self.running = !self.running;
        if self.running {
            self.raf.mount();
        } else {
            self.raf.unmount();
        }
        debug!("⏯️ Fireworks running: {}", self.running);
    }

    /// Vide les fusées et fragments et efface la surface (si montée).
    pub fn clear(&mut self) {
        self.engine.clear();
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.clear();
        }
    }

    /// Lance `count` fusées immédiatement. Si aucune attente d'arrêt n'est en cours,
    /// démarre l'animation et l'arrête une fois toutes les gerbes éteintes.
    pub fn launch(&mut self, count: usize) {
        for _ in 0..count {
            self.engine.create_trace(&self.options, &self.mouse);
        }
        debug!("🚀 Launched {} trace(s)", count);

        if self.drain.is_none() {
            self.start();
            // attente implicite, sans receveur
            self.drain = Some(Drain {
                dispose: false,
                waiters: Vec::new(),
            });
        }
    }

    pub fn update_options(&mut self, update: OptionsUpdate) {
        self.options.update(update);
    }

    /// Redimensionne la surface; une dimension absente garde la taille actuelle.
    /// Les bornes suivent la nouvelle taille.
    pub fn update_size(&mut self, width: Option<u32>, height: Option<u32>) {
        let current = match &self.canvas {
            Some(canvas) => canvas.size(),
            None => self.engine.size(),
        };
        let width = width.unwrap_or(current.x as u32);
        let height = height.unwrap_or(current.y as u32);

        self.engine.set_size(width as f32, height as f32);
        if let Some(canvas) = self.canvas.as_mut() {
            if canvas.size() != Vec2::new(width as f32, height as f32) {
                canvas.resize(width, height);
            }
        }

        self.update_boundaries(BoundariesUpdate {
            width: Some(width as f32),
            height: Some(height as f32),
            ..Default::default()
        });
        debug!("📐 Size updated: {} x {}", width, height);
    }

    pub fn update_boundaries(&mut self, boundaries: BoundariesUpdate) {
        self.update_options(OptionsUpdate::boundaries(boundaries));
    }

    // ------------------------
    // Pointeur
    // ------------------------
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.mouse.pointer_down(x, y, &self.options.mouse);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.mouse.pointer_move(x, y, &self.options.mouse);
    }

    pub fn pointer_up(&mut self) {
        self.mouse.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.mouse.pointer_leave();
    }

    pub fn mouse(&self) -> &Mouse {
        &self.mouse
    }

    /// Callback par frame de l'hôte (`timestamp_ms` monotone).
    ///
    /// Rend une frame si le scheduler est monté et que l'intervalle est écoulé,
    /// puis vérifie l'attente d'arrêt. Retourne `true` si une frame a été rendue.
    pub fn on_animation_frame(&mut self, timestamp_ms: f64) -> bool {
        let rendered = self.running && self.raf.poll(timestamp_ms, self.options.intensity);
        if rendered {
            self.render();
        }
        self.poll_drain();
        rendered
    }

    /// Rend une frame sans condition de cadence (no-op sans surface ou à l'arrêt).
    pub fn render(&mut self) {
        if !self.running {
            return;
        }
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };

        self.engine.advance_frame(
            canvas,
            FrameContext {
                options: &self.options,
                pointer: &self.mouse,
                sound: &self.sound,
                scheduler: &mut self.raf,
                auto_launch: self.drain.is_none(),
            },
        );
    }
}

// ==================================
// Helpers pour tests
// ==================================
#[cfg(any(test, feature = "test_helpers"))]
pub trait FireworksTestHelpers {
    fn force_next_launch(&mut self);
    fn scheduler(&self) -> &RequestAnimationFrame;
    fn scheduler_mut(&mut self) -> &mut RequestAnimationFrame;
}

#[cfg(any(test, feature = "test_helpers"))]
impl<C: Canvas2D, A: AudioEngine> FireworksTestHelpers for Fireworks<C, A> {
    fn force_next_launch(&mut self) {
        let (_, max) = self.options.delay.normalized();
        self.raf.set_tick(max as f32 + 1.0);
    }

    fn scheduler(&self) -> &RequestAnimationFrame {
        &self.raf
    }

    fn scheduler_mut(&mut self) -> &mut RequestAnimationFrame {
        &mut self.raf
    }
}
