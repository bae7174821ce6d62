use rand::Rng;

use super::types::AccountNo;

pub const ACCOUNT_NO_LEN: usize = 9;

/// Fresh account number from the thread-local generator.
pub fn generate() -> AccountNo {
    generate_with(&mut rand::thread_rng())
}

/// Nine independently drawn decimal digits. Nothing here checks the result
/// against existing accounts.
pub fn generate_with<R: Rng>(rng: &mut R) -> AccountNo {
    (0..ACCOUNT_NO_LEN)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
