use thiserror::Error;

/// Failures that can occur while building up an [`crate::mmu::Mmu`].
///
/// These are all caller mistakes discoverable before any instruction runs,
/// so they are rejected at construction time instead of panicking.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmuError {
    #[error(
        "block [{new_start:#06x}, {new_end:#06x}) overlaps existing block [{existing_start:#06x}, {existing_end:#06x})"
    )]
    OverlappingBlock {
        new_start: u16,
        new_end: u16,
        existing_start: u16,
        existing_end: u16,
    },

    #[error("ROM image is {image_len} bytes, which does not fit in a {block_len}-byte block")]
    ImageTooLarge { image_len: usize, block_len: usize },
}

/// Faults that can interrupt the `step` loop.
///
/// All 6502 arithmetic within an instruction body is wrapping and cannot
/// fail; the only fault the core recognizes is dispatching an opcode with
/// no legal instruction bound to it (see the Non-goals on illegal opcodes).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    #[error("halted on illegal/unmapped opcode {opcode:#04x} at {pc:#06x}")]
    IllegalOpcode { opcode: u8, pc: u16 },
}
