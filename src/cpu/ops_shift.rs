//! ASL/LSR/ROL/ROR, each operating on the accumulator or a memory operand.

use super::Cpu;
use crate::addressing::Operand;
use crate::registers::Status;

fn read_operand(cpu: &Cpu, operand: Operand) -> u8 {
    operand.read(&cpu.mmu, cpu.regs.a)
}

fn write_result(cpu: &mut Cpu, operand: Operand, result: u8) {
    match operand {
        Operand::Accumulator => cpu.regs.a = result,
        Operand::Address(addr) => cpu.mmu.write(addr, result),
        Operand::Value(_) | Operand::Implied => {}
    }
    cpu.regs.p.update_nz(result);
}

pub(super) fn asl(cpu: &mut Cpu, operand: Operand) -> u8 {
    let value = read_operand(cpu, operand);
    cpu.regs.p.set_flag(Status::CARRY, value & 0x80 != 0);
    write_result(cpu, operand, value << 1);
    0
}

pub(super) fn lsr(cpu: &mut Cpu, operand: Operand) -> u8 {
    let value = read_operand(cpu, operand);
    cpu.regs.p.set_flag(Status::CARRY, value & 0x01 != 0);
    write_result(cpu, operand, value >> 1);
    0
}

pub(super) fn rol(cpu: &mut Cpu, operand: Operand) -> u8 {
    let value = read_operand(cpu, operand);
    let carry_in = cpu.regs.p.contains(Status::CARRY) as u8;
    cpu.regs.p.set_flag(Status::CARRY, value & 0x80 != 0);
    write_result(cpu, operand, (value << 1) | carry_in);
    0
}

pub(super) fn ror(cpu: &mut Cpu, operand: Operand) -> u8 {
    let value = read_operand(cpu, operand);
    let carry_in = cpu.regs.p.contains(Status::CARRY) as u8;
    cpu.regs.p.set_flag(Status::CARRY, value & 0x01 != 0);
    write_result(cpu, operand, (value >> 1) | (carry_in << 7));
    0
}
