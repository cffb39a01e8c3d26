use log::trace;
use rand::Rng;

use crate::audio_engine::AudioEngine;
use crate::physic_engine::config::SoundOptions;
use crate::physic_engine::helpers::sample_int;

/// Applique les options sonores avant de déléguer au backend.
#[derive(Debug)]
pub struct Sound<A: AudioEngine> {
    backend: A,
}

impl<A: AudioEngine> Sound<A> {
    pub fn new(backend: A) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &A {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut A {
        &mut self.backend
    }

    /// Joue un son d'explosion si le son est activé; volume tiré dans `options.volume` (%).
    pub fn play(&self, options: &SoundOptions, pos: (f32, f32), rng: &mut impl Rng) {
        if !options.enabled {
            return;
        }
        let gain = sample_int(rng, &options.volume) as f32 / 100.0;
        trace!("🔊 explosion sound at ({:.1}, {:.1}) gain={:.2}", pos.0, pos.1, gain);
        self.backend.play_explosion(pos, gain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physic_engine::types::MinMax;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;

    #[derive(Default)]
    struct GainLog(RefCell<Vec<f32>>);

    impl AudioEngine for GainLog {
        fn play_explosion(&self, _pos: (f32, f32), gain: f32) {
            self.0.borrow_mut().push(gain);
        }
    }

    #[test]
    fn test_disabled_sound_is_silent() {
        let sound = Sound::new(GainLog::default());
        let mut rng = StdRng::seed_from_u64(0);
        sound.play(&SoundOptions::default(), (0.0, 0.0), &mut rng);
        assert!(sound.backend().0.borrow().is_empty());
    }

    #[test]
    fn test_gain_within_volume_range() {
        let sound = Sound::new(GainLog::default());
        let mut rng = StdRng::seed_from_u64(0);
        let options = SoundOptions {
            enabled: true,
            volume: MinMax::new(4, 8),
        };
        for _ in 0..50 {
            sound.play(&options, (10.0, 20.0), &mut rng);
        }
        let gains = sound.backend().0.borrow();
        assert_eq!(gains.len(), 50);
        assert!(gains.iter().all(|g| (0.04..=0.08).contains(g)));
    }
}
