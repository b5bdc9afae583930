//! LDA/LDX/LDY, STA/STX/STY, and the inter-register transfers.

use super::Cpu;
use crate::addressing::Operand;

pub(super) fn lda(cpu: &mut Cpu, operand: Operand) -> u8 {
    let value = operand.read(&cpu.mmu, cpu.regs.a);
    cpu.regs.a = value;
    cpu.regs.p.update_nz(value);
    0
}

pub(super) fn ldx(cpu: &mut Cpu, operand: Operand) -> u8 {
    let value = operand.read(&cpu.mmu, cpu.regs.a);
    cpu.regs.x = value;
    cpu.regs.p.update_nz(value);
    0
}

pub(super) fn ldy(cpu: &mut Cpu, operand: Operand) -> u8 {
    let value = operand.read(&cpu.mmu, cpu.regs.a);
    cpu.regs.y = value;
    cpu.regs.p.update_nz(value);
    0
}

pub(super) fn sta(cpu: &mut Cpu, operand: Operand) -> u8 {
    if let Operand::Address(addr) = operand {
        cpu.mmu.write(addr, cpu.regs.a);
    }
    0
}

pub(super) fn stx(cpu: &mut Cpu, operand: Operand) -> u8 {
    if let Operand::Address(addr) = operand {
        cpu.mmu.write(addr, cpu.regs.x);
    }
    0
}

pub(super) fn sty(cpu: &mut Cpu, operand: Operand) -> u8 {
    if let Operand::Address(addr) = operand {
        cpu.mmu.write(addr, cpu.regs.y);
    }
    0
}

pub(super) fn tax(cpu: &mut Cpu) -> u8 {
    cpu.regs.x = cpu.regs.a;
    cpu.regs.p.update_nz(cpu.regs.x);
    0
}

pub(super) fn txa(cpu: &mut Cpu) -> u8 {
    cpu.regs.a = cpu.regs.x;
    cpu.regs.p.update_nz(cpu.regs.a);
    0
}

pub(super) fn tay(cpu: &mut Cpu) -> u8 {
    cpu.regs.y = cpu.regs.a;
    cpu.regs.p.update_nz(cpu.regs.y);
    0
}

pub(super) fn tya(cpu: &mut Cpu) -> u8 {
    cpu.regs.a = cpu.regs.y;
    cpu.regs.p.update_nz(cpu.regs.a);
    0
}

pub(super) fn tsx(cpu: &mut Cpu) -> u8 {
    cpu.regs.x = cpu.regs.sp;
    cpu.regs.p.update_nz(cpu.regs.x);
    0
}

/// Unlike every other transfer, TXS does not touch N or Z — SP isn't a
/// value register, so there's nothing meaningful to flag.
pub(super) fn txs(cpu: &mut Cpu) -> u8 {
    cpu.regs.sp = cpu.regs.x;
    0
}
