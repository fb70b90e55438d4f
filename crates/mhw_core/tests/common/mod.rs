#![allow(dead_code)]

//! Synthetic save files. No real saves ship with the repo, so tests build a
//! plaintext buffer at layout-derived offsets and run the cipher stages in
//! reverse over it.

use blowfish::Blowfish;
use blowfish::cipher::generic_array::GenericArray;
use blowfish::cipher::{BlockEncrypt, KeyInit};
use byteorder::LittleEndian;
use mhw_core::crypto::{BLOCK_SIZE, RegionCipher, SAVE_KEY};
use mhw_core::layout::{HUNTER_NAME_LEN, PLAYER_SECTION_SIGNATURE, SPECIALIZED_TOOL_SIZE};
use mhw_core::{LayoutVersion, Result, Revision};

pub const EMPTY: u32 = u32::MAX;

/// Byte offsets inside one slot, relative to the slot start.
#[derive(Debug, Clone, Copy)]
pub struct SlotOffsets {
    pub guild_card: usize,
    pub weapon_usage: usize,
    pub monsters: usize,
    pub item_box: usize,
    pub box_decorations: usize,
    pub equipment: usize,
    pub tools: usize,
}

impl SlotOffsets {
    pub fn for_layout(layout: &LayoutVersion) -> Self {
        let card = &layout.guild_card;
        let guild_card = layout.header_size() + layout.pre_guild_card_size();
        let weapon_usage = guild_card + card.pre_usage_size();
        let monsters = weapon_usage + card.weapon_usage_size() + card.pre_monster_size();
        let item_box = guild_card + card.size() + layout.pre_item_box_size();
        let box_decorations = item_box + layout.item_box.pre_decorations_size();
        let equipment = item_box + layout.item_box.size();
        let tools = equipment + layout.equipment_box.size() + layout.post_equipment_gap;
        Self {
            guild_card,
            weapon_usage,
            monsters,
            item_box,
            box_decorations,
            equipment,
            tools,
        }
    }
}

/// Stand-in for the game's region transform, used only by synthetic saves.
///
/// A positional XOR keystream per 32-bit word, so one call scrambles and the
/// next unscrambles. Real Iceborne saves will not decrypt with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestRegionCipher;

impl TestRegionCipher {
    fn keystream_word(index: u32) -> u32 {
        let mut x = index.wrapping_mul(0x9E37_79B9) ^ 0x3A9E_1C5D;
        x ^= x >> 16;
        x = x.wrapping_mul(0x7FEB_352D);
        x ^= x >> 15;
        x = x.wrapping_mul(0x846C_A68B);
        x ^= x >> 16;
        x
    }
}

impl RegionCipher for TestRegionCipher {
    fn decrypt_region(&self, region: &mut [u8]) -> Result<()> {
        for (index, word) in region.chunks_mut(4).enumerate() {
            let key = Self::keystream_word(index as u32).to_le_bytes();
            for (byte, k) in word.iter_mut().zip(key) {
                *byte ^= k;
            }
        }
        Ok(())
    }
}

pub const REGIONS: Option<&dyn RegionCipher> = Some(&TestRegionCipher);

pub struct Hunter<'a> {
    pub name: &'a str,
    pub hunter_rank: u32,
    pub master_rank: u32,
    pub zeni: u32,
    pub research_points: u32,
    pub hunter_experience: u32,
    pub master_experience: u32,
    pub playtime: u32,
}

impl Default for Hunter<'_> {
    fn default() -> Self {
        Self {
            name: "Aiden",
            hunter_rank: 49,
            master_rank: 24,
            zeni: 120_000,
            research_points: 3_000,
            hunter_experience: 9_999,
            master_experience: 555,
            playtime: 3661,
        }
    }
}

pub struct SaveBuilder {
    pub layout: &'static LayoutVersion,
    pub section: usize,
    pub offsets: SlotOffsets,
    buffer: Vec<u8>,
}

impl SaveBuilder {
    pub fn new(layout: &'static LayoutVersion) -> Self {
        // Iceborne slots must begin where the second cipher region does.
        let section = match layout.revision {
            Revision::Base => 0x80,
            Revision::Iceborne => 0x3010C4,
        };
        let end = section + 4 + layout.section_preamble + 3 * layout.slot_size();
        let len = end.next_multiple_of(BLOCK_SIZE);

        let mut builder = Self {
            layout,
            section,
            offsets: SlotOffsets::for_layout(layout),
            buffer: vec![0u8; len],
        };
        builder.put_u64(layout.player_section_pointer(), section as u64);
        builder.put_u32(section, PLAYER_SECTION_SIGNATURE);
        builder
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn slot_start(&self, slot: u8) -> usize {
        self.section
            + 4
            + self.layout.section_preamble
            + usize::from(slot - 1) * self.layout.slot_size()
    }

    pub fn put_u8(&mut self, at: usize, value: u8) {
        self.buffer[at] = value;
    }

    pub fn put_u16(&mut self, at: usize, value: u16) {
        self.buffer[at..at + 2].copy_from_slice(&value.to_le_bytes());
    }

    pub fn put_u32(&mut self, at: usize, value: u32) {
        self.buffer[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub fn put_u64(&mut self, at: usize, value: u64) {
        self.buffer[at..at + 8].copy_from_slice(&value.to_le_bytes());
    }

    pub fn put_words(&mut self, at: usize, words: &[u32]) {
        for (i, word) in words.iter().enumerate() {
            self.put_u32(at + i * 4, *word);
        }
    }

    pub fn hunter(&mut self, slot: u8, hunter: &Hunter<'_>) -> &mut Self {
        let start = self.slot_start(slot);
        let name = hunter.name.as_bytes();
        assert!(name.len() < HUNTER_NAME_LEN);
        self.buffer[start..start + name.len()].copy_from_slice(name);

        let mut words = vec![hunter.hunter_rank];
        if self.layout.has_master_rank {
            words.push(hunter.master_rank);
        }
        words.extend([hunter.zeni, hunter.research_points, hunter.hunter_experience]);
        if self.layout.has_master_rank {
            words.push(hunter.master_experience);
        }
        words.push(hunter.playtime);
        self.put_words(start + HUNTER_NAME_LEN, &words);
        self
    }

    /// Overwrite the raw name field of a slot.
    pub fn name_bytes(&mut self, slot: u8, bytes: &[u8]) -> &mut Self {
        let start = self.slot_start(slot);
        self.buffer[start..start + HUNTER_NAME_LEN].fill(0);
        self.buffer[start..start + bytes.len()].copy_from_slice(bytes);
        self
    }

    /// Fill every equipment record of a slot with an empty discriminant.
    pub fn clear_equipment(&mut self, slot: u8) -> &mut Self {
        let start = self.slot_start(slot) + self.offsets.equipment;
        let record_size = self.layout.equipment_box.record_size();
        for i in 0..self.layout.equipment_box.records {
            self.put_u32(start + i * record_size + 4, EMPTY);
        }
        self
    }

    /// Write the fifteen leading words of equipment record `index`.
    pub fn equipment(&mut self, slot: u8, index: usize, words: [u32; 15]) -> &mut Self {
        let at = self.slot_start(slot)
            + self.offsets.equipment
            + index * self.layout.equipment_box.record_size();
        self.put_words(at, &words);
        self
    }

    pub fn box_decoration(&mut self, slot: u8, index: usize, item_id: u32, quantity: u32) -> &mut Self {
        let at = self.slot_start(slot) + self.offsets.box_decorations + index * 8;
        self.put_words(at, &[item_id, quantity]);
        self
    }

    pub fn specialized_tool(
        &mut self,
        slot: u8,
        index: usize,
        available: bool,
        decorations: [u32; 3],
    ) -> &mut Self {
        assert!(index < self.layout.specialized_tools);
        let at = self.slot_start(slot) + self.offsets.tools + index * SPECIALIZED_TOOL_SIZE;
        let [a, b, c] = decorations;
        self.put_words(at, &[u32::from(available), 0, a, b, c]);
        self
    }

    pub fn weapon_usage(&mut self, slot: u8, block: usize, counts: [u16; 14]) -> &mut Self {
        let at = self.slot_start(slot) + self.offsets.weapon_usage + block * 28;
        for (i, count) in counts.iter().enumerate() {
            self.put_u16(at + i * 2, *count);
        }
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn monster(
        &mut self,
        slot: u8,
        index: usize,
        captured: u16,
        slain: u16,
        largest: u16,
        smallest: u16,
        research: u8,
    ) -> &mut Self {
        let slots = self.layout.guild_card.monster_slots;
        let at = self.slot_start(slot) + self.offsets.monsters;
        self.put_u16(at + index * 2, captured);
        self.put_u16(at + (slots + index) * 2, slain);
        self.put_u16(at + (2 * slots + index) * 2, largest);
        self.put_u16(at + (3 * slots + index) * 2, smallest);
        self.put_u8(at + 8 * slots + index, research);
        self
    }

    pub fn plaintext(&self) -> Vec<u8> {
        self.buffer.clone()
    }

    /// Scramble the cipher regions, then Blowfish-encrypt every block.
    pub fn encrypted(&self) -> Vec<u8> {
        let mut bytes = self.buffer.clone();
        for region in self.layout.cipher_regions {
            TestRegionCipher
                .decrypt_region(&mut bytes[region.start..region.end])
                .expect("test region cipher is infallible");
        }
        encrypt_blocks(&mut bytes);
        bytes
    }
}

pub fn encrypt_blocks(bytes: &mut [u8]) {
    let cipher = Blowfish::<LittleEndian>::new_from_slice(SAVE_KEY).expect("save key is valid");
    for block in bytes.chunks_exact_mut(BLOCK_SIZE) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
}

/// Record words: sort, kind, subtype, class id, level, points, 3 decorations,
/// 3 variant words, 3 augments.
pub fn armor(sort: u32, piece: u32, class_id: u32, decorations: [u32; 3]) -> [u32; 15] {
    let [a, b, c] = decorations;
    [sort, 0, piece, class_id, 0, 0, a, b, c, 0, 0, 0, EMPTY, EMPTY, EMPTY]
}

pub fn weapon(sort: u32, type_id: u32, class_id: u32, decorations: [u32; 3]) -> [u32; 15] {
    let [a, b, c] = decorations;
    [sort, 1, type_id, class_id, 0, 0, a, b, c, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY]
}

pub fn charm(sort: u32, charm_id: u32) -> [u32; 15] {
    [sort, 2, charm_id, charm_id, 0, 0, EMPTY, EMPTY, EMPTY, 0, 0, 0, EMPTY, EMPTY, EMPTY]
}

/// A fixture with one populated first slot and two empty ones.
pub fn single_hunter(layout: &'static LayoutVersion) -> SaveBuilder {
    let mut builder = SaveBuilder::new(layout);
    builder.hunter(1, &Hunter::default());
    for slot in 1..=3 {
        builder.clear_equipment(slot);
    }
    builder
}
