use rand::Rng;

const PREFIX: &str = "BK";
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 8;

/// Generate a human-readable booking reference: `BK` plus 8 characters drawn
/// uniformly from `[A-Z0-9]`.
///
/// 36^8 values is not collision-free; the bookings table enforces uniqueness
/// and the orchestrator regenerates on conflict.
pub fn generate_reference() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("{}{}", PREFIX, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_format() {
        for _ in 0..100 {
            let r = generate_reference();
            assert_eq!(r.len(), 10);
            assert!(r.starts_with("BK"));
            assert!(r[2..]
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_references_vary() {
        let a = generate_reference();
        let b = generate_reference();
        // 36^8 keyspace; two draws landing on the same value would point at
        // a broken RNG, not bad luck
        assert_ne!(a, b);
    }
}
