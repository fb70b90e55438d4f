#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::error::{Result, SaveError};
use crate::layout::ByteRange;

/// Second-stage transform applied to each cipher region of a layout.
///
/// `decrypt_region` receives the Blowfish output for exactly one region, with
/// index 0 at the region's first byte. Regions may be processed concurrently.
pub trait RegionCipher: Sync {
    fn decrypt_region(&self, region: &mut [u8]) -> Result<()>;
}

/// Run `cipher` over every range in `regions`.
///
/// All ranges are validated before any byte is touched; they must lie inside
/// the buffer and must not overlap.
pub fn decrypt_regions(
    buffer: &mut [u8],
    regions: &[ByteRange],
    cipher: &dyn RegionCipher,
) -> Result<()> {
    let slices = split_disjoint(buffer, regions)?;
    trace!(count = slices.len(), "dispatching region transforms");

    #[cfg(feature = "parallel")]
    slices
        .into_par_iter()
        .try_for_each(|region| cipher.decrypt_region(region))?;

    #[cfg(not(feature = "parallel"))]
    slices
        .into_iter()
        .try_for_each(|region| cipher.decrypt_region(region))?;

    Ok(())
}

fn split_disjoint<'a>(buffer: &'a mut [u8], regions: &[ByteRange]) -> Result<Vec<&'a mut [u8]>> {
    let buffer_len = buffer.len();
    for region in regions {
        if region.end < region.start || region.end > buffer_len {
            return Err(SaveError::RegionOutOfBounds {
                offset: region.start,
                length: region.len(),
                buffer_len,
            });
        }
    }

    let mut ordered = regions.to_vec();
    ordered.sort_by_key(|region| region.start);

    let mut out = Vec::with_capacity(ordered.len());
    let mut rest = buffer;
    let mut consumed = 0usize;
    for region in ordered {
        if region.start < consumed {
            return Err(SaveError::RegionOverlap {
                offset: region.start,
                length: region.len(),
            });
        }
        let (_, tail) = std::mem::take(&mut rest).split_at_mut(region.start - consumed);
        let (slice, tail) = tail.split_at_mut(region.len());
        out.push(slice);
        rest = tail;
        consumed = region.end;
    }
    Ok(out)
}
