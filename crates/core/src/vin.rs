//! VIN generation.
//!
//! A VIN is two independent random fragments drawn from the lowercase
//! base-36 alphabet, concatenated. No uniqueness check is made against the
//! fleet; the space is wide enough that collisions are a purely theoretical
//! concern.

use rand::Rng;

const VIN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FRAGMENT_LEN: usize = 13;

/// Generate a fresh VIN using the thread-local RNG.
pub fn generate() -> String {
    generate_with(&mut rand::thread_rng())
}

/// Generate a VIN from the provided RNG. Used with a seeded generator in
/// tests.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut vin = String::with_capacity(FRAGMENT_LEN * 2);
    push_fragment(rng, &mut vin);
    push_fragment(rng, &mut vin);
    vin
}

fn push_fragment<R: Rng + ?Sized>(rng: &mut R, out: &mut String) {
    for _ in 0..FRAGMENT_LEN {
        let idx = rng.gen_range(0..VIN_ALPHABET.len());
        out.push(VIN_ALPHABET[idx] as char);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn vin_has_expected_shape() {
        let vin = generate();
        assert_eq!(vin.len(), FRAGMENT_LEN * 2);
        assert!(vin
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(generate_with(&mut a), generate_with(&mut b));
    }

    #[test]
    fn thousand_vins_are_distinct() {
        let vins: HashSet<String> = (0..1000).map(|_| generate()).collect();
        assert_eq!(vins.len(), 1000);
    }
}
