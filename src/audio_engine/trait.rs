/// Backend sonore : un appel "joue un son d'explosion", sans retour ni attente.
pub trait AudioEngine {
    fn play_explosion(&self, pos: (f32, f32), gain: f32);

    fn mute(&mut self) {}
    fn unmute(&mut self) {}
}

/// Backend muet, utilisé quand l'hôte ne fournit pas de sortie audio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioEngine for SilentAudio {
    fn play_explosion(&self, _pos: (f32, f32), _gain: f32) {}
}
