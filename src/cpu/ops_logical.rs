//! AND/ORA/EOR and BIT.

use super::Cpu;
use crate::addressing::Operand;
use crate::registers::Status;

pub(super) fn and(cpu: &mut Cpu, operand: Operand) -> u8 {
    let m = operand.read(&cpu.mmu, cpu.regs.a);
    cpu.regs.a &= m;
    cpu.regs.p.update_nz(cpu.regs.a);
    0
}

pub(super) fn ora(cpu: &mut Cpu, operand: Operand) -> u8 {
    let m = operand.read(&cpu.mmu, cpu.regs.a);
    cpu.regs.a |= m;
    cpu.regs.p.update_nz(cpu.regs.a);
    0
}

pub(super) fn eor(cpu: &mut Cpu, operand: Operand) -> u8 {
    let m = operand.read(&cpu.mmu, cpu.regs.a);
    cpu.regs.a ^= m;
    cpu.regs.p.update_nz(cpu.regs.a);
    0
}

/// BIT leaves A untouched: Z reflects `A & M`, but N and V come straight
/// from bits 7 and 6 of the memory operand, not the AND result.
pub(super) fn bit(cpu: &mut Cpu, operand: Operand) -> u8 {
    let m = operand.read(&cpu.mmu, cpu.regs.a);
    cpu.regs.p.set_flag(Status::ZERO, cpu.regs.a & m == 0);
    cpu.regs.p.set_flag(Status::NEGATIVE, m & 0x80 != 0);
    cpu.regs.p.set_flag(Status::OVERFLOW, m & 0x40 != 0);
    0
}
