//! Keygen command.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::core::constants::MASTER_KEY_LEN;
use crate::error::Result;

/// Print a random hex master key.
pub fn execute() -> Result<()> {
    let mut key = Zeroizing::new([0u8; MASTER_KEY_LEN]);
    OsRng
        .try_fill_bytes(&mut key[..])
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    println!("{}", hex::encode(&key[..]));
    Ok(())
}
