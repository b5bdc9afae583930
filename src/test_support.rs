//! Fixture builders for tests: an MMU-first replacement for the assembler-
//! driven `run_program` helper this crate's teacher used, since this crate
//! has no assembly front end (see the Non-goals on dev tooling).

use crate::cpu::Cpu;
use crate::mmu::Mmu;

/// Builds an `Mmu` with `rom` mapped read-only at `start`, plus a writable
/// RAM block covering the rest of the address space (zero page and stack
/// included) so instructions that write memory have somewhere to land.
pub fn mmu_with_rom(start: u16, rom: &[u8]) -> Mmu {
    let mut mmu = Mmu::new();
    mmu.add_block(start, rom.len() as u16, true, Some(rom))
        .unwrap();

    let rom_end = start as u32 + rom.len() as u32;
    if start > 0 {
        mmu.add_block(0x0000, start, false, None).unwrap();
    }
    if rom_end < 0x10000 {
        mmu.add_block(rom_end as u16, (0x10000 - rom_end) as u16, false, None)
            .unwrap();
    }
    mmu
}

/// Builds a `Cpu` over `mmu_with_rom(start, rom)`, with PC forced to
/// `start` rather than read from the reset vector.
pub fn cpu_at(start: u16, rom: &[u8]) -> Cpu {
    let mmu = mmu_with_rom(start, rom);
    Cpu::new(mmu, Some(start))
}
