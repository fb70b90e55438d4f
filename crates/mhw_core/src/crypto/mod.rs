//! Two-stage decryption of a raw save buffer.
//!
//! Stage one runs Blowfish over the whole buffer. Stage two, present only in
//! layouts that declare cipher regions, runs a [`RegionCipher`] over each
//! region of the stage-one output. This crate does not ship the region
//! transform used by the game; callers decoding such layouts must supply one.

mod block;
mod region;

pub use block::{BLOCK_SIZE, SAVE_KEY, decrypt_whole_buffer};
pub use region::{RegionCipher, decrypt_regions};

use tracing::debug;

use crate::error::{Result, SaveError};
use crate::layout::LayoutVersion;

/// Run both cipher stages for `layout` over `buffer` in place.
///
/// Fails with [`SaveError::RegionCipherMissing`] when the layout has cipher
/// regions and `region_cipher` is `None`.
pub fn decrypt(
    buffer: &mut [u8],
    layout: &LayoutVersion,
    region_cipher: Option<&dyn RegionCipher>,
) -> Result<()> {
    if !layout.cipher_regions.is_empty() && region_cipher.is_none() {
        return Err(SaveError::RegionCipherMissing(layout.name));
    }

    decrypt_whole_buffer(buffer)?;
    if let Some(cipher) = region_cipher {
        decrypt_regions(buffer, layout.cipher_regions, cipher)?;
    }
    debug!(layout = layout.name, len = buffer.len(), "save buffer decrypted");
    Ok(())
}
