// src/domain/ids.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

pub const DEFAULT_ID_BYTES: usize = 12;
const ID_PREFIX: &str = "prop_";

/// Generate a property id that is not in `taken`, using the OS RNG.
pub fn generate_property_id<'a, I>(taken: I) -> String
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let mut rng = OsRng;
    generate_unique_id(&mut rng, taken)
}

/// Draw random ids until one is free.
/// 12 random bytes make a retry practically unreachable, but the loop keeps
/// the uniqueness guarantee independent of the RNG.
pub fn generate_unique_id<'a, R, I>(rng: &mut R, taken: I) -> String
where
    R: RngCore,
    I: IntoIterator<Item = &'a str> + Clone,
{
    loop {
        let candidate = generate_id(rng, DEFAULT_ID_BYTES);
        if !taken.clone().into_iter().any(|id| id == candidate) {
            return candidate;
        }
    }
}

/// `prop_` followed by URL-safe base64 (no padding) of `nbytes` random bytes.
pub fn generate_id<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    format!(
        "{ID_PREFIX}{}",
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buf)
    )
}
