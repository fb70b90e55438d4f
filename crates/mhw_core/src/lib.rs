pub mod catalog;
pub mod core_api;
pub mod crypto;
pub mod error;
pub mod layout;
pub mod monsters;
pub mod reader;
pub mod section;
pub mod slots;
pub mod weapon;

pub use catalog::{DecorationCatalog, DecorationInfo, DecorationLookup};
pub use crypto::RegionCipher;
pub use error::{LookupKind, Result, SaveError};
pub use layout::{ByteRange, LayoutVersion, Revision};
pub use reader::ByteCursor;
pub use section::{SectionTable, locate_player_section};
pub use slots::{SaveSlotBase, SlotDecoder, format_playtime, read_slots};
pub use weapon::WeaponClass;

/// Decrypt a copy of `raw` for `layout` and decode every non-empty slot.
///
/// `region_cipher` is only consulted for layouts with cipher regions.
pub fn decode_save<D: SlotDecoder>(
    raw: &[u8],
    layout: &LayoutVersion,
    region_cipher: Option<&dyn RegionCipher>,
    decoder: &D,
) -> Result<Vec<D::Record>> {
    let mut buffer = raw.to_vec();
    crypto::decrypt(&mut buffer, layout, region_cipher)?;
    read_slots(&buffer, layout, decoder)
}
