use blowfish::Blowfish;
use blowfish::cipher::generic_array::GenericArray;
use blowfish::cipher::{BlockDecrypt, KeyInit};
use byteorder::LittleEndian;

use crate::error::{Result, SaveError};

/// Passphrase baked into the game for its save files.
pub const SAVE_KEY: &[u8] = b"xieZjoe#P2134-3zmaghgpqoe0z8$3azeq";
pub const BLOCK_SIZE: usize = 8;

/// Blowfish in ECB mode with each 32-bit half-block stored little-endian.
pub(crate) fn save_cipher() -> Result<Blowfish<LittleEndian>> {
    Blowfish::<LittleEndian>::new_from_slice(SAVE_KEY)
        .map_err(|_| SaveError::Cipher("save key rejected"))
}

pub fn decrypt_whole_buffer(buffer: &mut [u8]) -> Result<()> {
    if buffer.len() % BLOCK_SIZE != 0 {
        return Err(SaveError::InvalidLength(buffer.len()));
    }

    let cipher = save_cipher()?;
    for block in buffer.chunks_exact_mut(BLOCK_SIZE) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use blowfish::cipher::BlockEncrypt;

    use super::*;

    fn encrypt(buffer: &mut [u8]) {
        let cipher = save_cipher().unwrap();
        for block in buffer.chunks_exact_mut(BLOCK_SIZE) {
            cipher.encrypt_block(GenericArray::from_mut_slice(block));
        }
    }

    #[test]
    fn rejects_partial_blocks() {
        let mut buffer = vec![0u8; 12];
        assert!(matches!(
            decrypt_whole_buffer(&mut buffer),
            Err(SaveError::InvalidLength(12))
        ));
    }

    #[test]
    fn inverts_encryption_in_place() {
        let plain: Vec<u8> = (0..64u8).collect();
        let mut buffer = plain.clone();
        encrypt(&mut buffer);
        assert_ne!(buffer, plain);
        decrypt_whole_buffer(&mut buffer).unwrap();
        assert_eq!(buffer, plain);
    }

    #[test]
    fn blocks_are_independent_of_position() {
        let mut first = [0x5Au8; 16];
        decrypt_whole_buffer(&mut first).unwrap();
        assert_eq!(first[..8], first[8..]);
    }

    #[test]
    fn empty_buffer_is_a_no_op() {
        let mut buffer: Vec<u8> = Vec::new();
        decrypt_whole_buffer(&mut buffer).unwrap();
        assert!(buffer.is_empty());
    }
}
