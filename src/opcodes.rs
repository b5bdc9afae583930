//! The 256-entry opcode dispatch table (component D).
//!
//! Binds each opcode byte to an [`Instruction`] family, the [`Mode`] its
//! operand is fetched with, and its base cycle count. Opcode bytes with no
//! legal binding carry `instruction: None`; `Cpu::step` treats those as a
//! fault rather than guessing at undocumented behavior (see the Non-goals
//! on illegal/undocumented opcodes).

/// An addressing mode, naming how an instruction's operand is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No operand, or the operand is the accumulator / implied by the opcode.
    Imp,
    /// The operand is the accumulator itself (shifts/rotates).
    Acc,
    /// The operand byte immediately follows the opcode.
    Imm,
    /// A zero-page address.
    Zp,
    /// A zero-page address, indexed by X (wrapping within page 0).
    Zpx,
    /// A zero-page address, indexed by Y (wrapping within page 0).
    Zpy,
    /// A 16-bit absolute address.
    Abs,
    /// An absolute address, indexed by X.
    Abx,
    /// An absolute address, indexed by Y.
    Aby,
    /// A 16-bit address read through a pointer, reproducing the 6502's
    /// page-boundary fetch bug.
    Ind,
    /// Indexed indirect: a zero-page pointer selected by `(operand + X)`.
    Izx,
    /// Indirect indexed: a zero-page pointer offset by Y after dereferencing.
    Izy,
    /// A signed 8-bit displacement from PC, used by branches.
    Rel,
}

/// The legal, documented 6502 instruction mnemonics.
///
/// Undocumented/illegal opcodes are deliberately not represented here: the
/// opcode table maps bytes with no legal binding to `instruction: None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

/// One slot of the 256-entry opcode table.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub instruction: Option<Instruction>,
    pub mode: Mode,
    pub cycles: u8,
}

impl Entry {
    const fn new(instruction: Instruction, mode: Mode, cycles: u8) -> Entry {
        Entry {
            instruction: Some(instruction),
            mode,
            cycles,
        }
    }

    const fn illegal(mode: Mode) -> Entry {
        Entry {
            instruction: None,
            mode,
            cycles: 0,
        }
    }
}

/// Indexed by opcode byte; see [`Entry`].
pub static OPCODE_TABLE: [Entry; 256] = [
    Entry::new(Instruction::Brk, Mode::Imp, 7),
    Entry::new(Instruction::Ora, Mode::Izx, 6),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Izx),
    Entry::illegal(Mode::Zp),
    Entry::new(Instruction::Ora, Mode::Zp, 3),
    Entry::new(Instruction::Asl, Mode::Zp, 5),
    Entry::illegal(Mode::Zp),
    Entry::new(Instruction::Php, Mode::Imp, 3),
    Entry::new(Instruction::Ora, Mode::Imm, 2),
    Entry::new(Instruction::Asl, Mode::Acc, 2),
    Entry::illegal(Mode::Imm),
    Entry::illegal(Mode::Abs),
    Entry::new(Instruction::Ora, Mode::Abs, 4),
    Entry::new(Instruction::Asl, Mode::Abs, 6),
    Entry::illegal(Mode::Abs),
    Entry::new(Instruction::Bpl, Mode::Rel, 2),
    Entry::new(Instruction::Ora, Mode::Izy, 5),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Izy),
    Entry::illegal(Mode::Zpx),
    Entry::new(Instruction::Ora, Mode::Zpx, 4),
    Entry::new(Instruction::Asl, Mode::Zpx, 6),
    Entry::illegal(Mode::Zpx),
    Entry::new(Instruction::Clc, Mode::Imp, 2),
    Entry::new(Instruction::Ora, Mode::Aby, 4),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Aby),
    Entry::illegal(Mode::Abx),
    Entry::new(Instruction::Ora, Mode::Abx, 4),
    Entry::new(Instruction::Asl, Mode::Abx, 7),
    Entry::illegal(Mode::Abx),
    Entry::new(Instruction::Jsr, Mode::Abs, 6),
    Entry::new(Instruction::And, Mode::Izx, 6),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Izx),
    Entry::new(Instruction::Bit, Mode::Zp, 3),
    Entry::new(Instruction::And, Mode::Zp, 3),
    Entry::new(Instruction::Rol, Mode::Zp, 5),
    Entry::illegal(Mode::Zp),
    Entry::new(Instruction::Plp, Mode::Imp, 4),
    Entry::new(Instruction::And, Mode::Imm, 2),
    Entry::new(Instruction::Rol, Mode::Acc, 2),
    Entry::illegal(Mode::Imm),
    Entry::new(Instruction::Bit, Mode::Abs, 4),
    Entry::new(Instruction::And, Mode::Abs, 4),
    Entry::new(Instruction::Rol, Mode::Abs, 6),
    Entry::illegal(Mode::Abs),
    Entry::new(Instruction::Bmi, Mode::Rel, 2),
    Entry::new(Instruction::And, Mode::Izy, 5),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Izy),
    Entry::illegal(Mode::Zpx),
    Entry::new(Instruction::And, Mode::Zpx, 4),
    Entry::new(Instruction::Rol, Mode::Zpx, 6),
    Entry::illegal(Mode::Zpx),
    Entry::new(Instruction::Sec, Mode::Imp, 2),
    Entry::new(Instruction::And, Mode::Aby, 4),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Aby),
    Entry::illegal(Mode::Abx),
    Entry::new(Instruction::And, Mode::Abx, 4),
    Entry::new(Instruction::Rol, Mode::Abx, 7),
    Entry::illegal(Mode::Abx),
    Entry::new(Instruction::Rti, Mode::Imp, 6),
    Entry::new(Instruction::Eor, Mode::Izx, 6),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Izx),
    Entry::illegal(Mode::Zp),
    Entry::new(Instruction::Eor, Mode::Zp, 3),
    Entry::new(Instruction::Lsr, Mode::Zp, 5),
    Entry::illegal(Mode::Zp),
    Entry::new(Instruction::Pha, Mode::Imp, 3),
    Entry::new(Instruction::Eor, Mode::Imm, 2),
    Entry::new(Instruction::Lsr, Mode::Acc, 2),
    Entry::illegal(Mode::Imm),
    Entry::new(Instruction::Jmp, Mode::Abs, 3),
    Entry::new(Instruction::Eor, Mode::Abs, 4),
    Entry::new(Instruction::Lsr, Mode::Abs, 6),
    Entry::illegal(Mode::Abs),
    Entry::new(Instruction::Bvc, Mode::Rel, 2),
    Entry::new(Instruction::Eor, Mode::Izy, 5),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Izy),
    Entry::illegal(Mode::Zpx),
    Entry::new(Instruction::Eor, Mode::Zpx, 4),
    Entry::new(Instruction::Lsr, Mode::Zpx, 6),
    Entry::illegal(Mode::Zpx),
    Entry::new(Instruction::Cli, Mode::Imp, 2),
    Entry::new(Instruction::Eor, Mode::Aby, 4),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Aby),
    Entry::illegal(Mode::Abx),
    Entry::new(Instruction::Eor, Mode::Abx, 4),
    Entry::new(Instruction::Lsr, Mode::Abx, 7),
    Entry::illegal(Mode::Abx),
    Entry::new(Instruction::Rts, Mode::Imp, 6),
    Entry::new(Instruction::Adc, Mode::Izx, 6),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Izx),
    Entry::illegal(Mode::Zp),
    Entry::new(Instruction::Adc, Mode::Zp, 3),
    Entry::new(Instruction::Ror, Mode::Zp, 5),
    Entry::illegal(Mode::Zp),
    Entry::new(Instruction::Pla, Mode::Imp, 4),
    Entry::new(Instruction::Adc, Mode::Imm, 2),
    Entry::new(Instruction::Ror, Mode::Acc, 2),
    Entry::illegal(Mode::Imm),
    Entry::new(Instruction::Jmp, Mode::Ind, 5),
    Entry::new(Instruction::Adc, Mode::Abs, 4),
    Entry::new(Instruction::Ror, Mode::Abs, 6),
    Entry::illegal(Mode::Abs),
    Entry::new(Instruction::Bvs, Mode::Rel, 2),
    Entry::new(Instruction::Adc, Mode::Izy, 5),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Izy),
    Entry::illegal(Mode::Zpx),
    Entry::new(Instruction::Adc, Mode::Zpx, 4),
    Entry::new(Instruction::Ror, Mode::Zpx, 6),
    Entry::illegal(Mode::Zpx),
    Entry::new(Instruction::Sei, Mode::Imp, 2),
    Entry::new(Instruction::Adc, Mode::Aby, 4),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Aby),
    Entry::illegal(Mode::Abx),
    Entry::new(Instruction::Adc, Mode::Abx, 4),
    Entry::new(Instruction::Ror, Mode::Abx, 7),
    Entry::illegal(Mode::Abx),
    Entry::illegal(Mode::Imm),
    Entry::new(Instruction::Sta, Mode::Izx, 6),
    Entry::illegal(Mode::Imm),
    Entry::illegal(Mode::Izx),
    Entry::new(Instruction::Sty, Mode::Zp, 3),
    Entry::new(Instruction::Sta, Mode::Zp, 3),
    Entry::new(Instruction::Stx, Mode::Zp, 3),
    Entry::illegal(Mode::Zp),
    Entry::new(Instruction::Dey, Mode::Imp, 2),
    Entry::illegal(Mode::Imm),
    Entry::new(Instruction::Txa, Mode::Imp, 2),
    Entry::illegal(Mode::Imm),
    Entry::new(Instruction::Sty, Mode::Abs, 4),
    Entry::new(Instruction::Sta, Mode::Abs, 4),
    Entry::new(Instruction::Stx, Mode::Abs, 4),
    Entry::illegal(Mode::Abs),
    Entry::new(Instruction::Bcc, Mode::Rel, 2),
    Entry::new(Instruction::Sta, Mode::Izy, 6),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Izy),
    Entry::new(Instruction::Sty, Mode::Zpx, 4),
    Entry::new(Instruction::Sta, Mode::Zpx, 4),
    Entry::new(Instruction::Stx, Mode::Zpy, 4),
    Entry::illegal(Mode::Zpy),
    Entry::new(Instruction::Tya, Mode::Imp, 2),
    Entry::new(Instruction::Sta, Mode::Aby, 5),
    Entry::new(Instruction::Txs, Mode::Imp, 2),
    Entry::illegal(Mode::Aby),
    Entry::illegal(Mode::Abx),
    Entry::new(Instruction::Sta, Mode::Abx, 5),
    Entry::illegal(Mode::Aby),
    Entry::illegal(Mode::Aby),
    Entry::new(Instruction::Ldy, Mode::Imm, 2),
    Entry::new(Instruction::Lda, Mode::Izx, 6),
    Entry::new(Instruction::Ldx, Mode::Imm, 2),
    Entry::illegal(Mode::Izx),
    Entry::new(Instruction::Ldy, Mode::Zp, 3),
    Entry::new(Instruction::Lda, Mode::Zp, 3),
    Entry::new(Instruction::Ldx, Mode::Zp, 3),
    Entry::illegal(Mode::Zp),
    Entry::new(Instruction::Tay, Mode::Imp, 2),
    Entry::new(Instruction::Lda, Mode::Imm, 2),
    Entry::new(Instruction::Tax, Mode::Imp, 2),
    Entry::illegal(Mode::Imm),
    Entry::new(Instruction::Ldy, Mode::Abs, 4),
    Entry::new(Instruction::Lda, Mode::Abs, 4),
    Entry::new(Instruction::Ldx, Mode::Abs, 4),
    Entry::illegal(Mode::Abs),
    Entry::new(Instruction::Bcs, Mode::Rel, 2),
    Entry::new(Instruction::Lda, Mode::Izy, 5),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Izy),
    Entry::new(Instruction::Ldy, Mode::Zpx, 4),
    Entry::new(Instruction::Lda, Mode::Zpx, 4),
    Entry::new(Instruction::Ldx, Mode::Zpy, 4),
    Entry::illegal(Mode::Zpy),
    Entry::new(Instruction::Clv, Mode::Imp, 2),
    Entry::new(Instruction::Lda, Mode::Aby, 4),
    Entry::new(Instruction::Tsx, Mode::Imp, 2),
    Entry::illegal(Mode::Aby),
    Entry::new(Instruction::Ldy, Mode::Abx, 4),
    Entry::new(Instruction::Lda, Mode::Abx, 4),
    Entry::new(Instruction::Ldx, Mode::Aby, 4),
    Entry::illegal(Mode::Aby),
    Entry::new(Instruction::Cpy, Mode::Imm, 2),
    Entry::new(Instruction::Cmp, Mode::Izx, 6),
    Entry::illegal(Mode::Imm),
    Entry::illegal(Mode::Izx),
    Entry::new(Instruction::Cpy, Mode::Zp, 3),
    Entry::new(Instruction::Cmp, Mode::Zp, 3),
    Entry::new(Instruction::Dec, Mode::Zp, 5),
    Entry::illegal(Mode::Zp),
    Entry::new(Instruction::Iny, Mode::Imp, 2),
    Entry::new(Instruction::Cmp, Mode::Imm, 2),
    Entry::new(Instruction::Dex, Mode::Imp, 2),
    Entry::illegal(Mode::Imm),
    Entry::new(Instruction::Cpy, Mode::Abs, 4),
    Entry::new(Instruction::Cmp, Mode::Abs, 4),
    Entry::new(Instruction::Dec, Mode::Abs, 6),
    Entry::illegal(Mode::Abs),
    Entry::new(Instruction::Bne, Mode::Rel, 2),
    Entry::new(Instruction::Cmp, Mode::Izy, 5),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Izy),
    Entry::illegal(Mode::Zpx),
    Entry::new(Instruction::Cmp, Mode::Zpx, 4),
    Entry::new(Instruction::Dec, Mode::Zpx, 6),
    Entry::illegal(Mode::Zpx),
    Entry::new(Instruction::Cld, Mode::Imp, 2),
    Entry::new(Instruction::Cmp, Mode::Aby, 4),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Aby),
    Entry::illegal(Mode::Abx),
    Entry::new(Instruction::Cmp, Mode::Abx, 4),
    Entry::new(Instruction::Dec, Mode::Abx, 7),
    Entry::illegal(Mode::Abx),
    Entry::new(Instruction::Cpx, Mode::Imm, 2),
    Entry::new(Instruction::Sbc, Mode::Izx, 6),
    Entry::illegal(Mode::Imm),
    Entry::illegal(Mode::Izx),
    Entry::new(Instruction::Cpx, Mode::Zp, 3),
    Entry::new(Instruction::Sbc, Mode::Zp, 3),
    Entry::new(Instruction::Inc, Mode::Zp, 5),
    Entry::illegal(Mode::Zp),
    Entry::new(Instruction::Inx, Mode::Imp, 2),
    Entry::new(Instruction::Sbc, Mode::Imm, 2),
    Entry::new(Instruction::Nop, Mode::Imp, 2),
    Entry::new(Instruction::Sbc, Mode::Imm, 2),
    Entry::new(Instruction::Cpx, Mode::Abs, 4),
    Entry::new(Instruction::Sbc, Mode::Abs, 4),
    Entry::new(Instruction::Inc, Mode::Abs, 6),
    Entry::illegal(Mode::Abs),
    Entry::new(Instruction::Beq, Mode::Rel, 2),
    Entry::new(Instruction::Sbc, Mode::Izy, 5),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Izy),
    Entry::illegal(Mode::Zpx),
    Entry::new(Instruction::Sbc, Mode::Zpx, 4),
    Entry::new(Instruction::Inc, Mode::Zpx, 6),
    Entry::illegal(Mode::Zpx),
    Entry::new(Instruction::Sed, Mode::Imp, 2),
    Entry::new(Instruction::Sbc, Mode::Aby, 4),
    Entry::illegal(Mode::Imp),
    Entry::illegal(Mode::Aby),
    Entry::illegal(Mode::Abx),
    Entry::new(Instruction::Sbc, Mode::Abx, 4),
    Entry::new(Instruction::Inc, Mode::Abx, 7),
    Entry::illegal(Mode::Abx),
];


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn brk_is_implied_seven_cycles() {
        let entry = OPCODE_TABLE[0x00];
        assert_eq!(entry.instruction, Some(Instruction::Brk));
        assert_eq!(entry.mode, Mode::Imp);
        assert_eq!(entry.cycles, 7);
    }

    #[test]
    fn lda_immediate_is_two_cycles() {
        let entry = OPCODE_TABLE[0xa9];
        assert_eq!(entry.instruction, Some(Instruction::Lda));
        assert_eq!(entry.mode, Mode::Imm);
        assert_eq!(entry.cycles, 2);
    }

    #[test]
    fn nop_is_0xea() {
        let entry = OPCODE_TABLE[0xea];
        assert_eq!(entry.instruction, Some(Instruction::Nop));
    }

    #[test]
    fn jmp_indirect_is_0x6c() {
        let entry = OPCODE_TABLE[0x6c];
        assert_eq!(entry.instruction, Some(Instruction::Jmp));
        assert_eq!(entry.mode, Mode::Ind);
        assert_eq!(entry.cycles, 5);
    }

    #[test]
    fn unbound_opcode_has_no_instruction() {
        let entry = OPCODE_TABLE[0x02];
        assert_eq!(entry.instruction, None);
    }
}
