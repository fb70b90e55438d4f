use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::catalog::DecorationLookup;
use crate::crypto::{self, RegionCipher};
use crate::error::SaveError;
use crate::layout::LayoutVersion;
use crate::reader::ByteCursor;
use crate::section::locate_player_section;
use crate::slots::decorations::{DecorationsDecoder, DecorationsRecord};
use crate::slots::equipment::{EquipmentDecoder, EquipmentRecord};
use crate::slots::monster_stats::{MonsterStatsDecoder, MonsterStatsRecord};
use crate::slots::weapon_usage::{WeaponUsageDecoder, WeaponUsageRecord};
use crate::slots::{HeaderDecoder, SaveSlotBase, SlotDecoder, read_slots};

use super::error::{CoreError, CoreErrorCode};
use super::types::Snapshot;

/// Opens saves. Layouts with cipher regions need a region cipher, supplied
/// through [`Engine::with_region_cipher`].
#[derive(Default, Clone, Copy)]
pub struct Engine<'c> {
    region_cipher: Option<&'c dyn RegionCipher>,
}

impl fmt::Debug for Engine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("region_cipher", &self.region_cipher.is_some())
            .finish()
    }
}

/// A decrypted save bound to the layout it decoded under.
#[derive(Debug)]
pub struct Session {
    layout: &'static LayoutVersion,
    plaintext: Vec<u8>,
    snapshot: Snapshot,
}

impl Engine<'static> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'c> Engine<'c> {
    pub fn with_region_cipher(cipher: &'c dyn RegionCipher) -> Self {
        Self {
            region_cipher: Some(cipher),
        }
    }

    pub fn open_path(
        &self,
        path: &Path,
        hint: Option<&'static LayoutVersion>,
    ) -> Result<Session, CoreError> {
        let bytes = fs::read(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;
        self.open_bytes(bytes, hint)
    }

    /// Decrypt and validate a raw save. Without a hint every layout in
    /// [`LayoutVersion::ALL`] is tried and exactly one must decode.
    pub fn open_bytes<B: AsRef<[u8]>>(
        &self,
        bytes: B,
        hint: Option<&'static LayoutVersion>,
    ) -> Result<Session, CoreError> {
        let bytes = bytes.as_ref();

        if let Some(layout) = hint {
            return open_with(bytes, layout, self.region_cipher).map_err(|e| {
                CoreError::new(
                    CoreErrorCode::Format,
                    format!("failed to decode as {}: {e}", layout.name),
                )
            });
        }

        let mut decoded = Vec::new();
        let mut failures = Vec::new();
        for layout in LayoutVersion::ALL {
            match open_with(bytes, layout, self.region_cipher) {
                Ok(session) => decoded.push(session),
                Err(e) => {
                    debug!(layout = layout.name, error = %e, "layout rejected");
                    failures.push(format!("{}: {e}", layout.name));
                }
            }
        }

        if decoded.len() > 1 {
            let names: Vec<&str> = decoded.iter().map(|s| s.layout.name).collect();
            return Err(CoreError::new(
                CoreErrorCode::LayoutDetectionAmbiguous,
                format!(
                    "input decoded under layouts {}; supply a layout",
                    names.join(", ")
                ),
            ));
        }
        decoded.pop().ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::Format,
                format!("failed to decode input: {}", failures.join("; ")),
            )
        })
    }
}

fn open_with(
    bytes: &[u8],
    layout: &'static LayoutVersion,
    region_cipher: Option<&dyn RegionCipher>,
) -> Result<Session, SaveError> {
    let mut plaintext = bytes.to_vec();
    crypto::decrypt(&mut plaintext, layout, region_cipher)?;

    let section_offset = locate_player_section(&mut ByteCursor::new(&plaintext))?;
    let slots = read_slots(&plaintext, layout, &HeaderDecoder)?;
    debug!(
        layout = layout.name,
        slots = slots.len(),
        "save opened"
    );

    let snapshot = Snapshot {
        revision: layout.revision,
        layout: layout.name.to_string(),
        file_len: plaintext.len(),
        section_offset,
        slots,
    };
    Ok(Session {
        layout,
        plaintext,
        snapshot,
    })
}

impl Session {
    pub fn layout(&self) -> &'static LayoutVersion {
        self.layout
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn slots(&self) -> &[SaveSlotBase] {
        &self.snapshot.slots
    }

    pub fn plaintext(&self) -> &[u8] {
        &self.plaintext
    }

    /// Run any slot decoder over the decrypted buffer.
    pub fn decode<D: SlotDecoder>(&self, decoder: &D) -> Result<Vec<D::Record>, CoreError> {
        read_slots(&self.plaintext, self.layout, decoder).map_err(CoreError::from)
    }

    pub fn equipment(&self) -> Result<Vec<EquipmentRecord>, CoreError> {
        self.decode(&EquipmentDecoder)
    }

    pub fn decorations<L: DecorationLookup + ?Sized>(
        &self,
        lookup: &L,
    ) -> Result<Vec<DecorationsRecord>, CoreError> {
        self.decode(&DecorationsDecoder::new(lookup))
    }

    pub fn weapon_usage(&self) -> Result<Vec<WeaponUsageRecord>, CoreError> {
        self.decode(&WeaponUsageDecoder)
    }

    pub fn monster_stats(&self) -> Result<Vec<MonsterStatsRecord>, CoreError> {
        self.decode(&MonsterStatsDecoder)
    }
}
