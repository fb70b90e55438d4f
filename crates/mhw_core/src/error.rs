use thiserror::Error;

/// Which id namespace a failed decoration lookup was keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    ItemId,
    EquippedId,
    Name,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("cipher setup failed: {0}")]
    Cipher(&'static str),

    #[error("buffer length {0} is not a multiple of the cipher block size")]
    InvalidLength(usize),

    #[error("cipher region {offset:#x}+{length:#x} exceeds buffer length {buffer_len:#x}")]
    RegionOutOfBounds {
        offset: usize,
        length: usize,
        buffer_len: usize,
    },

    #[error("layout {0} has cipher regions but no region cipher was supplied")]
    RegionCipherMissing(&'static str),

    #[error("cipher region {offset:#x}+{length:#x} overlaps another region")]
    RegionOverlap { offset: usize, length: usize },

    #[error("cursor overrun at {position:#x}: wanted {wanted} bytes, buffer length {len:#x}")]
    OutOfRange {
        position: usize,
        wanted: i64,
        len: usize,
    },

    #[error("invalid player section offset ({0})")]
    InvalidSectionOffset(i64),

    #[error("invalid player section signature, expected {expected:08X} but read {found:08X}")]
    SignatureMismatch { expected: u32, found: u32 },

    #[error("slot {slot} misaligned: expected to end at {expected:#x}, ended at {actual:#x}")]
    SlotMisaligned {
        slot: u8,
        expected: usize,
        actual: usize,
    },

    #[error("no decoration with {kind:?} {value}")]
    UnknownDecoration { kind: LookupKind, value: String },

    #[error("hunter name in slot {0} is not valid UTF-8")]
    InvalidName(u8),

    #[error("decoration catalog: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, SaveError>;
