//! Addressing-mode decoders (component C).
//!
//! Each decoder consumes bytes at `pc` (advancing it) and yields an
//! [`Operand`] plus any page-cross penalty it incurred. Decoders never
//! mutate cycle-accounting state themselves; the penalty travels back in
//! the return value and the step loop sums it (see the design notes on
//! per-step penalty counters).

use crate::mmu::Mmu;
use crate::opcodes::Mode;
use crate::registers::Registers;

/// What an addressing-mode decode produced.
///
/// Most modes produce an effective address the instruction body reads or
/// writes through the MMU. `Immediate` and `Accumulator` instead hand back
/// the operand value directly, since there is no bus address to speak of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Address(u16),
    Value(u8),
    Accumulator,
    Implied,
}

impl Operand {
    /// Reads the operand's value, dereferencing through `mmu` if it names
    /// an address.
    pub fn read(self, mmu: &Mmu, a: u8) -> u8 {
        match self {
            Operand::Address(addr) => mmu.read(addr),
            Operand::Value(v) => v,
            Operand::Accumulator => a,
            Operand::Implied => 0,
        }
    }
}

/// Fetches the next byte at `pc`, advancing it. `pub(crate)` so it can be
/// exercised directly by tests reproducing fetch-sequence scenarios, not
/// just indirectly through `decode`.
pub(crate) fn next_byte(mmu: &Mmu, pc: &mut u16) -> u8 {
    let byte = mmu.read(*pc);
    *pc = pc.wrapping_add(1);
    byte
}

/// Fetches the next little-endian word at `pc`, advancing it by two.
pub(crate) fn next_word(mmu: &Mmu, pc: &mut u16) -> u16 {
    let word = mmu.read_word(*pc);
    *pc = pc.wrapping_add(2);
    word
}

fn page_crossed(base: u16, indexed: u16) -> bool {
    (base & 0xff00) != (indexed & 0xff00)
}

/// Decodes the operand named by `mode`, consuming bytes from `regs.pc`.
///
/// Returns the decoded [`Operand`] and the page-cross penalty in cycles
/// (0 or 1; `Relative`'s branch-taken/page-cross penalties are instead
/// applied by the branch instruction body, since they depend on whether the
/// branch is taken).
pub fn decode(mode: Mode, regs: &mut Registers, mmu: &Mmu) -> (Operand, u8) {
    match mode {
        Mode::Imp => (Operand::Implied, 0),
        Mode::Acc => (Operand::Accumulator, 0),
        Mode::Imm => {
            let value = next_byte(mmu, &mut regs.pc);
            (Operand::Value(value), 0)
        }
        Mode::Zp => {
            let addr = next_byte(mmu, &mut regs.pc) as u16;
            (Operand::Address(addr), 0)
        }
        Mode::Zpx => {
            let addr = next_byte(mmu, &mut regs.pc).wrapping_add(regs.x) as u16;
            (Operand::Address(addr), 0)
        }
        Mode::Zpy => {
            let addr = next_byte(mmu, &mut regs.pc).wrapping_add(regs.y) as u16;
            (Operand::Address(addr), 0)
        }
        Mode::Abs => {
            let addr = next_word(mmu, &mut regs.pc);
            (Operand::Address(addr), 0)
        }
        Mode::Abx => {
            let base = next_word(mmu, &mut regs.pc);
            let addr = base.wrapping_add(regs.x as u16);
            let penalty = page_crossed(base, addr) as u8;
            (Operand::Address(addr), penalty)
        }
        Mode::Aby => {
            let base = next_word(mmu, &mut regs.pc);
            let addr = base.wrapping_add(regs.y as u16);
            let penalty = page_crossed(base, addr) as u8;
            (Operand::Address(addr), penalty)
        }
        Mode::Ind => {
            let ptr = next_word(mmu, &mut regs.pc);
            let addr = read_word_with_page_bug(mmu, ptr);
            (Operand::Address(addr), 0)
        }
        Mode::Izx => {
            let zp = next_byte(mmu, &mut regs.pc).wrapping_add(regs.x);
            let addr = read_word_zero_page(mmu, zp);
            (Operand::Address(addr), 0)
        }
        Mode::Izy => {
            let zp = next_byte(mmu, &mut regs.pc);
            let base = read_word_zero_page(mmu, zp);
            let addr = base.wrapping_add(regs.y as u16);
            let penalty = page_crossed(base, addr) as u8;
            (Operand::Address(addr), penalty)
        }
        Mode::Rel => {
            let offset = next_byte(mmu, &mut regs.pc);
            let target = regs
                .pc
                .wrapping_add(crate::registers::from_twos_complement(offset) as u16);
            (Operand::Address(target), 0)
        }
    }
}

/// Reads a little-endian word from a zero-page pointer, wrapping within
/// page 0 — the high byte comes from `(ptr + 1) & 0xFF`, not `ptr + 1`.
fn read_word_zero_page(mmu: &Mmu, ptr: u8) -> u16 {
    let low = mmu.read(ptr as u16);
    let high = mmu.read(ptr.wrapping_add(1) as u16);
    u16::from_le_bytes([low, high])
}

/// Reads a little-endian word through `ptr`, reproducing the 6502's
/// indirect-JMP page-boundary bug: if `ptr`'s low byte is 0xFF, the high
/// byte is fetched from `ptr & 0xFF00` rather than `ptr + 1`.
fn read_word_with_page_bug(mmu: &Mmu, ptr: u16) -> u16 {
    let low = mmu.read(ptr);
    let high_addr = if ptr & 0x00ff == 0x00ff {
        ptr & 0xff00
    } else {
        ptr.wrapping_add(1)
    };
    let high = mmu.read(high_addr);
    u16::from_le_bytes([low, high])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mmu::Mmu;

    fn mmu_with_rom(start: u16, bytes: &[u8]) -> Mmu {
        let mut mmu = Mmu::new();
        mmu.add_block(start, bytes.len() as u16, true, Some(bytes))
            .unwrap();
        mmu
    }

    fn regs_at(pc: u16) -> Registers {
        let mut regs = Registers::new();
        regs.pc = pc;
        regs
    }

    #[test]
    fn next_byte_runs_out_past_the_mapped_image() {
        let mmu = mmu_with_rom(0x1000, &[1, 2, 3]);
        let mut pc = 0x1000;
        assert_eq!(next_byte(&mmu, &mut pc), 1);
        assert_eq!(next_byte(&mmu, &mut pc), 2);
        assert_eq!(next_byte(&mmu, &mut pc), 3);
        assert_eq!(next_byte(&mmu, &mut pc), 0);
    }

    #[test]
    fn next_word_interleaved_with_next_byte() {
        let mmu = mmu_with_rom(0x1000, &[1, 2, 3, 4, 5, 9, 10]);
        let mut pc = 0x1000;
        assert_eq!(next_word(&mmu, &mut pc), 0x0201);
        next_byte(&mmu, &mut pc);
        assert_eq!(next_word(&mmu, &mut pc), 0x0504);
        assert_eq!(next_word(&mmu, &mut pc), 0x0a09);
    }

    #[test]
    fn zero_page_indexed_addressing() {
        // One continuous decode sequence over [1,2,3,4,5], each mode
        // consuming the next byte in turn rather than re-reading one spot.
        let mmu = mmu_with_rom(0x1000, &[1, 2, 3, 4, 5]);
        let mut regs = regs_at(0x1000);

        let (op, _) = decode(Mode::Zp, &mut regs, &mmu);
        assert_eq!(op, Operand::Address(1));

        regs.x = 0;
        let (op, _) = decode(Mode::Zpx, &mut regs, &mmu);
        assert_eq!(op, Operand::Address(2));

        regs.x = 1;
        let (op, _) = decode(Mode::Zpx, &mut regs, &mmu);
        assert_eq!(op, Operand::Address(3 + 1));

        regs.y = 0;
        let (op, _) = decode(Mode::Zpy, &mut regs, &mmu);
        assert_eq!(op, Operand::Address(4));

        regs.y = 1;
        let (op, _) = decode(Mode::Zpy, &mut regs, &mmu);
        assert_eq!(op, Operand::Address(5 + 1));
    }

    #[test]
    fn absolute_indexed_x_page_cross_penalty() {
        let mmu = mmu_with_rom(0x1000, &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);

        let mut regs = regs_at(0x1000);
        let (op, penalty) = decode(Mode::Abs, &mut regs, &mmu);
        assert_eq!(op, Operand::Address(0x0201));
        assert_eq!(penalty, 0);

        let mut regs = regs_at(0x1002);
        regs.x = 0;
        let (op, penalty) = decode(Mode::Abx, &mut regs, &mmu);
        assert_eq!(op, Operand::Address(0x0403));
        assert_eq!(penalty, 0);

        let mut regs = regs_at(0x1004);
        regs.x = 0xff;
        let (op, penalty) = decode(Mode::Abx, &mut regs, &mmu);
        assert_eq!(op, Operand::Address(0x0605u16.wrapping_add(0xff)));
        assert_eq!(penalty, 1);
    }

    #[test]
    fn indirect_jmp_reproduces_the_page_boundary_bug() {
        let mut mmu = Mmu::new();
        mmu.add_block(0x1000, 0x0100, false, None).unwrap();
        mmu.write(0x1000, 0x00);
        mmu.write(0x10ff, 0xd0);

        let addr = read_word_with_page_bug(&mmu, 0x10ff);
        assert_eq!(addr, 0x00d0);
    }

    #[test]
    fn indexed_indirect_wraps_within_zero_page() {
        let mut mmu = Mmu::new();
        mmu.add_block(0x0000, 0x0200, false, None).unwrap();
        // Operand byte 0xff, X=1 -> pointer at (0xff + 1) & 0xff == 0x00,
        // wrapping within zero page rather than spilling into page 1.
        mmu.write(0x0000, 0x34);
        mmu.write(0x0001, 0x12);
        mmu.write(0x0100, 0xff);

        let mut regs = Registers::new();
        regs.pc = 0x0100;
        regs.x = 1;
        let (op, _) = decode(Mode::Izx, &mut regs, &mmu);
        assert_eq!(op, Operand::Address(0x1234));
    }

    #[test]
    fn indirect_indexed_applies_page_cross_penalty() {
        let mut mmu = Mmu::new();
        mmu.add_block(0x0000, 0x0300, false, None).unwrap();
        mmu.write(0x0010, 0xff);
        mmu.write(0x0011, 0x02);

        let mut regs = Registers::new();
        regs.y = 0x01;
        mmu.write(regs.pc, 0x10);
        let (op, penalty) = decode(Mode::Izy, &mut regs, &mmu);
        assert_eq!(op, Operand::Address(0x0300));
        assert_eq!(penalty, 1);
    }
}
