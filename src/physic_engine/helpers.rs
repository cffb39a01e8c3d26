use rand::Rng;

use crate::physic_engine::types::MinMax;

/// Partie entière (vers -inf) en valeur absolue, utilisée pour les longueurs/compteurs.
#[inline]
pub fn floor(num: f32) -> usize {
    num.floor().abs() as usize
}

/// Tirage uniforme dans `[min, max)`.
///
/// Contrairement à `Rng::random_range`, ne panique pas si l'intervalle est vide ou inversé.
#[inline]
pub fn random_float(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    rng.random::<f32>() * (max - min) + min
}

/// Tirage d'un entier uniforme dans `[min, max]` (bornes incluses).
#[inline]
pub fn random_int(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    let v = random_float(rng, min as f32, max as f32 + 1.0).floor() as i32;
    // l'arrondi f32 peut atteindre `max + 1` quand le tirage est proche de 1
    if min <= max {
        v.min(max)
    } else {
        v
    }
}

/// Distance euclidienne entre `(x, y)` et `(dx, dy)`.
#[inline]
pub fn get_distance(x: f32, y: f32, dx: f32, dy: f32) -> f32 {
    ((x - dx).powi(2) + (y - dy).powi(2)).sqrt()
}

/// Tirage flottant dans un intervalle de configuration (bornes remises dans l'ordre).
pub fn sample_float(rng: &mut impl Rng, range: &MinMax<f32>) -> f32 {
    let (min, max) = range.normalized();
    random_float(rng, min, max)
}

/// Tirage entier dans un intervalle de configuration (bornes remises dans l'ordre).
pub fn sample_int(rng: &mut impl Rng, range: &MinMax<i32>) -> i32 {
    let (min, max) = range.normalized();
    random_int(rng, min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_floor_is_absolute() {
        assert_eq!(floor(3.7), 3);
        assert_eq!(floor(-2.2), 3);
        assert_eq!(floor(0.0), 0);
    }

    #[test]
    fn test_random_int_inclusive_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let v = random_int(&mut rng, 1, 4);
            assert!((1..=4).contains(&v), "out of range: {}", v);
            seen_min |= v == 1;
            seen_max |= v == 4;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn test_random_helpers_degenerate_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_int(&mut rng, 10, 10), 10);
        assert_eq!(random_float(&mut rng, 2.5, 2.5), 2.5);

        // intervalle inversé : pas de panique, bornes réordonnées
        for _ in 0..100 {
            let v = sample_int(&mut rng, &MinMax::new(60, 30));
            assert!((30..=60).contains(&v));
            let f = sample_float(&mut rng, &MinMax::new(0.03, 0.015));
            assert!((0.015..=0.03).contains(&f));
        }
    }

    #[test]
    fn test_get_distance() {
        assert_eq!(get_distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(get_distance(1.0, 1.0, 1.0, 1.0), 0.0);
    }
}
