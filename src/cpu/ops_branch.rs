//! The eight conditional branches share one body; only the tested flag and
//! polarity differ, which `Cpu::dispatch` resolves before calling in.

use super::Cpu;
use crate::addressing::Operand;
use crate::registers::Registers;

/// Applies `PC ← target` iff `taken`, reporting the branch-cycle penalty:
/// +1 if taken, +1 more if the branch also crosses a page.
///
/// Operates on the register file alone — branching touches no other CPU
/// state — which also lets it be exercised directly in tests without a
/// full opcode fetch.
pub(super) fn branch_regs(regs: &mut Registers, operand: Operand, taken: bool) -> u8 {
    let target = match operand {
        Operand::Address(addr) => addr,
        _ => return 0,
    };

    if !taken {
        return 0;
    }

    let page_crossed = (regs.pc & 0xff00) != (target & 0xff00);
    regs.pc = target;

    if page_crossed {
        2
    } else {
        1
    }
}

pub(super) fn branch(cpu: &mut Cpu, operand: Operand, taken: bool) -> u8 {
    branch_regs(&mut cpu.regs, operand, taken)
}
