//! The single-flag set/clear instructions.

use super::Cpu;
use crate::registers::Status;

pub(super) fn clc(cpu: &mut Cpu) -> u8 {
    cpu.regs.p.remove(Status::CARRY);
    0
}

pub(super) fn sec(cpu: &mut Cpu) -> u8 {
    cpu.regs.p.insert(Status::CARRY);
    0
}

pub(super) fn cli(cpu: &mut Cpu) -> u8 {
    cpu.regs.p.remove(Status::IRQ_DISABLE);
    0
}

pub(super) fn sei(cpu: &mut Cpu) -> u8 {
    cpu.regs.p.insert(Status::IRQ_DISABLE);
    0
}

pub(super) fn cld(cpu: &mut Cpu) -> u8 {
    cpu.regs.p.remove(Status::DECIMAL);
    0
}

pub(super) fn sed(cpu: &mut Cpu) -> u8 {
    cpu.regs.p.insert(Status::DECIMAL);
    0
}

pub(super) fn clv(cpu: &mut Cpu) -> u8 {
    cpu.regs.p.remove(Status::OVERFLOW);
    0
}
