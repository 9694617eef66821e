// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Contains the definition of a Chip-8 [Instruction]
//!
//! Words are matched against the opcode table in [Insn], then lifted into an
//! [Operator] and its [Operands].

pub mod disassembler;

use crate::{
    machine::registers::Register,
    num::{Adr, Byte, Nib, Word, ADDRESS_MASK},
};
use imperative_rs::InstructionSet;
use std::fmt::Display;

/// The opcode table. Lowercase hex digits are fixed, everything else is a field.
#[allow(non_camel_case_types, non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq)]
pub(crate) enum Insn {
    /// | 00e0 | Clear screen memory to 0s
    #[opcode = "0x00e0"]
    cls,
    /// | 00ee | Return from subroutine
    #[opcode = "0x00ee"]
    ret,
    /// | 1aaa | Jumps to an absolute address
    #[opcode = "0x1AAA"]
    jmp { A: u16 },
    /// | 2aaa | Pushes pc onto the stack, then jumps to a
    #[opcode = "0x2AAA"]
    call { A: u16 },
    /// | 3xbb | Skips next instruction if register X == b
    #[opcode = "0x3xBB"]
    seb { B: u8, x: usize },
    /// | 4xbb | Skips next instruction if register X != b
    #[opcode = "0x4xBB"]
    sneb { B: u8, x: usize },
    /// | 5xy0 | Skip next instruction if vX == vY
    #[opcode = "0x5xy0"]
    se { y: usize, x: usize },
    /// | 6xbb | Loads immediate byte b into register vX
    #[opcode = "0x6xBB"]
    movb { B: u8, x: usize },
    /// | 7xbb | Adds immediate byte b to register vX
    #[opcode = "0x7xBB"]
    addb { B: u8, x: usize },
    /// | 8xy0 | Loads the value of y into x
    #[opcode = "0x8xy0"]
    mov { y: usize, x: usize },
    /// | 8xy1 | Performs bitwise or of vX and vY, and stores the result in vX
    #[opcode = "0x8xy1"]
    or { y: usize, x: usize },
    /// | 8xy2 | Performs bitwise and of vX and vY, and stores the result in vX
    #[opcode = "0x8xy2"]
    and { y: usize, x: usize },
    /// | 8xy3 | Performs bitwise xor of vX and vY, and stores the result in vX
    #[opcode = "0x8xy3"]
    xor { y: usize, x: usize },
    /// | 8xy4 | Performs addition of vX and vY, and stores the result in vX
    #[opcode = "0x8xy4"]
    add { y: usize, x: usize },
    /// | 8xy5 | Performs subtraction of vX and vY, and stores the result in vX
    #[opcode = "0x8xy5"]
    sub { y: usize, x: usize },
    /// | 8xy6 | Performs bitwise right shift of vX. vY is ignored.
    #[opcode = "0x8xy6"]
    shr { y: usize, x: usize },
    /// | 8xy7 | Performs subtraction of vY and vX, and stores the result in vX
    #[opcode = "0x8xy7"]
    bsub { y: usize, x: usize },
    /// | 8xyE | Performs bitwise left shift of vX. vY is ignored.
    #[opcode = "0x8xye"]
    shl { y: usize, x: usize },
    /// | 9xy0 | Skip next instruction if vX != vY
    #[opcode = "0x9xy0"]
    sne { y: usize, x: usize },
    /// | Aaaa | Load address #a into register I
    #[opcode = "0xaAAA"]
    movI { A: u16 },
    /// | Baaa | Jump to &adr + v0
    #[opcode = "0xbAAA"]
    jmpr { A: u16 },
    /// | Cxbb | Stores a random number & the provided byte into vX
    #[opcode = "0xcxBB"]
    rand { B: u8, x: usize },
    /// | Dxyn | Draws n-byte sprite to the screen at coordinates (vX, vY)
    #[opcode = "0xdxyn"]
    draw { y: usize, x: usize, n: u8 },
    /// | eX9e | Skip next instruction if key vX is pressed
    #[opcode = "0xex9e"]
    sek { x: usize },
    /// | eXa1 | Skip next instruction if key vX is not pressed
    #[opcode = "0xexa1"]
    snek { x: usize },
    /// | fX07 | Set vX to value in delay timer
    #[opcode = "0xfx07"]
    getdt { x: usize },
    /// | fX0a | Wait for input, store key in vX
    #[opcode = "0xfx0a"]
    waitk { x: usize },
    /// | fX15 | Set delay timer to the value in vX
    #[opcode = "0xfx15"]
    setdt { x: usize },
    /// | fX18 | Set sound timer to the value in vX
    #[opcode = "0xfx18"]
    movst { x: usize },
    /// | fX1e | Add vX to I
    #[opcode = "0xfx1e"]
    addI { x: usize },
    /// | fX29 | Load sprite for character x into I
    #[opcode = "0xfx29"]
    font { x: usize },
    /// | fX33 | BCD convert X into I[0..3]
    #[opcode = "0xfx33"]
    bcd { x: usize },
    /// | fX55 | DMA Stor from I to registers 0..X
    #[opcode = "0xfx55"]
    dmao { x: usize },
    /// | fX65 | DMA Load from I to registers 0..X
    #[opcode = "0xfx65"]
    dmai { x: usize },
}

impl Display for Insn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Instruction::from(*self).fmt(f)
    }
}

/// Selects the behavior of an [Instruction]
#[allow(non_camel_case_types, missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    cls,
    ret,
    jmp_a,
    call_a,
    seq_v_b,
    sne_v_b,
    seq_v_v,
    mov_v_b,
    add_v_b,
    mov_v_v,
    or_v_v,
    and_v_v,
    xor_v_v,
    add_v_v,
    sub_v_v,
    shr_v,
    subn_v_v,
    shl_v,
    sne_v_v,
    mov_i_a,
    jmp_v0_a,
    rnd_v_b,
    drw_v_v_n,
    skp_v,
    sknp_v,
    mov_v_dt,
    wkp_v,
    mov_dt_v,
    mov_st_v,
    add_i_v,
    font_v,
    bcd_v,
    mov_ii_v,
    mov_v_ii,
}

impl Operator {
    /// Returns true if `args` has the shape (and field widths) this operator takes
    pub fn accepts(self, args: &Operands) -> bool {
        use Operator::*;
        match self {
            cls | ret => matches!(args, Operands::None),
            jmp_a | call_a | mov_i_a | jmp_v0_a => {
                matches!(args, Operands::A { address } if *address <= ADDRESS_MASK)
            }
            seq_v_b | sne_v_b | mov_v_b | add_v_b | rnd_v_b => matches!(args, Operands::VB { .. }),
            seq_v_v | mov_v_v | or_v_v | and_v_v | xor_v_v | add_v_v | sub_v_v | subn_v_v
            | sne_v_v => matches!(args, Operands::VV { .. }),
            drw_v_v_n => matches!(args, Operands::VVN { nibble, .. } if *nibble <= 0xf),
            shr_v | shl_v | skp_v | sknp_v | mov_v_dt | wkp_v | mov_dt_v | mov_st_v | add_i_v
            | font_v | bcd_v | mov_ii_v | mov_v_ii => matches!(args, Operands::V { .. }),
        }
    }
}

/// The operands of an [Instruction]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operands {
    /// No operands
    None,
    /// A 12-bit address
    A {
        /// The address
        address: Adr,
    },
    /// A register and an immediate byte
    VB {
        /// The destination (or compared) register
        vx: Register,
        /// The immediate byte
        byte: Byte,
    },
    /// Two registers
    VV {
        /// The destination (or first compared) register
        vx: Register,
        /// The source (or second compared) register
        vy: Register,
    },
    /// Two registers and a nibble
    VVN {
        /// Register holding the x coordinate
        vx: Register,
        /// Register holding the y coordinate
        vy: Register,
        /// Sprite height
        nibble: Nib,
    },
    /// One register
    V {
        /// The register
        vx: Register,
    },
}

/// A decoded Chip-8 instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instruction {
    op: Operator,
    args: Operands,
}

impl Instruction {
    /// Every instruction is one [Word] wide
    pub const WIDTH: Adr = 2;

    /// Constructs an [Instruction], if `args` fit `op`
    /// # Examples
    /// ```rust
    /// # use chipcore::*;
    /// let add = Instruction::new(
    ///     Operator::add_v_b,
    ///     Operands::VB { vx: Register::v3, byte: 0x01 },
    /// );
    /// assert_eq!(Some(0x7301), add.map(|i| i.encode()));
    /// // cls takes no operands
    /// assert!(Instruction::new(Operator::cls, Operands::V { vx: Register::v0 }).is_none());
    /// ```
    pub fn new(op: Operator, args: Operands) -> Option<Self> {
        op.accepts(&args).then_some(Instruction { op, args })
    }

    /// Decodes a [Word], or returns [None] if it isn't an instruction
    /// # Examples
    /// ```rust
    /// # use chipcore::*;
    /// let cls = Instruction::decode(0x00e0).unwrap();
    /// assert_eq!(Operator::cls, cls.op());
    /// assert!(Instruction::decode(0xffff).is_none());
    /// ```
    pub fn decode(word: Word) -> Option<Self> {
        Insn::decode(&word.to_be_bytes())
            .ok()
            .map(|(_, insn)| insn.into())
    }

    /// Encodes the instruction as a [Word]
    pub fn encode(&self) -> Word {
        use Operator::*;
        let (a, x, y, b, n): (Word, Word, Word, Word, Word) = match self.args {
            Operands::None => (0, 0, 0, 0, 0),
            Operands::A { address } => (address, 0, 0, 0, 0),
            Operands::VB { vx, byte } => (0, vx.index() as Word, 0, byte as Word, 0),
            Operands::VV { vx, vy } => (0, vx.index() as Word, vy.index() as Word, 0, 0),
            Operands::VVN { vx, vy, nibble } => {
                (0, vx.index() as Word, vy.index() as Word, 0, nibble as Word)
            }
            Operands::V { vx } => (0, vx.index() as Word, 0, 0, 0),
        };
        let (x, y) = (x << 8, y << 4);
        #[rustfmt::skip]
        let word = match self.op {
            cls       => 0x00e0,
            ret       => 0x00ee,
            jmp_a     => 0x1000 | a,
            call_a    => 0x2000 | a,
            seq_v_b   => 0x3000 | x | b,
            sne_v_b   => 0x4000 | x | b,
            seq_v_v   => 0x5000 | x | y,
            mov_v_b   => 0x6000 | x | b,
            add_v_b   => 0x7000 | x | b,
            mov_v_v   => 0x8000 | x | y,
            or_v_v    => 0x8001 | x | y,
            and_v_v   => 0x8002 | x | y,
            xor_v_v   => 0x8003 | x | y,
            add_v_v   => 0x8004 | x | y,
            sub_v_v   => 0x8005 | x | y,
            shr_v     => 0x8006 | x,
            subn_v_v  => 0x8007 | x | y,
            shl_v     => 0x800e | x,
            sne_v_v   => 0x9000 | x | y,
            mov_i_a   => 0xa000 | a,
            jmp_v0_a  => 0xb000 | a,
            rnd_v_b   => 0xc000 | x | b,
            drw_v_v_n => 0xd000 | x | y | n,
            skp_v     => 0xe09e | x,
            sknp_v    => 0xe0a1 | x,
            mov_v_dt  => 0xf007 | x,
            wkp_v     => 0xf00a | x,
            mov_dt_v  => 0xf015 | x,
            mov_st_v  => 0xf018 | x,
            add_i_v   => 0xf01e | x,
            font_v    => 0xf029 | x,
            bcd_v     => 0xf033 | x,
            mov_ii_v  => 0xf055 | x,
            mov_v_ii  => 0xf065 | x,
        };
        word
    }

    /// Gets the [Operator]
    pub fn op(&self) -> Operator {
        self.op
    }

    /// Gets the [Operands]
    pub fn args(&self) -> Operands {
        self.args
    }
}

impl From<Insn> for Instruction {
    #[rustfmt::skip]
    fn from(insn: Insn) -> Self {
        use Operator::*;
        let r = |n: usize| Register::from_nibble(n as Nib);
        let (op, args) = match insn {
            Insn::cls               => (cls,       Operands::None),
            Insn::ret               => (ret,       Operands::None),
            Insn::jmp   {       A } => (jmp_a,     Operands::A { address: A }),
            Insn::call  {       A } => (call_a,    Operands::A { address: A }),
            Insn::seb   {    x, B } => (seq_v_b,   Operands::VB { vx: r(x), byte: B }),
            Insn::sneb  {    x, B } => (sne_v_b,   Operands::VB { vx: r(x), byte: B }),
            Insn::se    { y, x    } => (seq_v_v,   Operands::VV { vx: r(x), vy: r(y) }),
            Insn::movb  {    x, B } => (mov_v_b,   Operands::VB { vx: r(x), byte: B }),
            Insn::addb  {    x, B } => (add_v_b,   Operands::VB { vx: r(x), byte: B }),
            Insn::mov   { y, x    } => (mov_v_v,   Operands::VV { vx: r(x), vy: r(y) }),
            Insn::or    { y, x    } => (or_v_v,    Operands::VV { vx: r(x), vy: r(y) }),
            Insn::and   { y, x    } => (and_v_v,   Operands::VV { vx: r(x), vy: r(y) }),
            Insn::xor   { y, x    } => (xor_v_v,   Operands::VV { vx: r(x), vy: r(y) }),
            Insn::add   { y, x    } => (add_v_v,   Operands::VV { vx: r(x), vy: r(y) }),
            Insn::sub   { y, x    } => (sub_v_v,   Operands::VV { vx: r(x), vy: r(y) }),
            Insn::shr   { x, ..   } => (shr_v,     Operands::V { vx: r(x) }),
            Insn::bsub  { y, x    } => (subn_v_v,  Operands::VV { vx: r(x), vy: r(y) }),
            Insn::shl   { x, ..   } => (shl_v,     Operands::V { vx: r(x) }),
            Insn::sne   { y, x    } => (sne_v_v,   Operands::VV { vx: r(x), vy: r(y) }),
            Insn::movI  {       A } => (mov_i_a,   Operands::A { address: A }),
            Insn::jmpr  {       A } => (jmp_v0_a,  Operands::A { address: A }),
            Insn::rand  {    x, B } => (rnd_v_b,   Operands::VB { vx: r(x), byte: B }),
            Insn::draw  { y, x, n } => (drw_v_v_n, Operands::VVN { vx: r(x), vy: r(y), nibble: n }),
            Insn::sek   {    x    } => (skp_v,     Operands::V { vx: r(x) }),
            Insn::snek  {    x    } => (sknp_v,    Operands::V { vx: r(x) }),
            Insn::getdt {    x    } => (mov_v_dt,  Operands::V { vx: r(x) }),
            Insn::waitk {    x    } => (wkp_v,     Operands::V { vx: r(x) }),
            Insn::setdt {    x    } => (mov_dt_v,  Operands::V { vx: r(x) }),
            Insn::movst {    x    } => (mov_st_v,  Operands::V { vx: r(x) }),
            Insn::addI  {    x    } => (add_i_v,   Operands::V { vx: r(x) }),
            Insn::font  {    x    } => (font_v,    Operands::V { vx: r(x) }),
            Insn::bcd   {    x    } => (bcd_v,     Operands::V { vx: r(x) }),
            Insn::dmao  {    x    } => (mov_ii_v,  Operands::V { vx: r(x) }),
            Insn::dmai  {    x    } => (mov_v_ii,  Operands::V { vx: r(x) }),
        };
        Instruction { op, args }
    }
}

impl Display for Instruction {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Operator::*;
        match (self.op, self.args) {
            (cls, _)                                 => write!(f, "cls    "),
            (ret, _)                                 => write!(f, "ret    "),
            (jmp_a, Operands::A { address })         => write!(f, "jmp    {address:03x}"),
            (call_a, Operands::A { address })        => write!(f, "call   {address:03x}"),
            (mov_i_a, Operands::A { address })       => write!(f, "mov    ${address:03x}, I"),
            (jmp_v0_a, Operands::A { address })      => write!(f, "jmp    ${address:03x}+v0"),
            (op, Operands::VB { vx, byte })          => {
                let name = match op {
                    seq_v_b => "se",
                    sne_v_b => "sne",
                    mov_v_b => "mov",
                    add_v_b => "add",
                    _       => "rand",
                };
                write!(f, "{name:<6} #{byte:02x}, {vx}")
            }
            (op, Operands::VV { vx, vy })            => {
                let name = match op {
                    seq_v_v  => "se",
                    sne_v_v  => "sne",
                    mov_v_v  => "mov",
                    or_v_v   => "or",
                    and_v_v  => "and",
                    xor_v_v  => "xor",
                    add_v_v  => "add",
                    sub_v_v  => "sub",
                    _        => "bsub",
                };
                write!(f, "{name:<6} {vy}, {vx}")
            }
            (_, Operands::VVN { vx, vy, nibble })    => write!(f, "draw   #{nibble:x}, {vx}, {vy}"),
            (shr_v, Operands::V { vx })              => write!(f, "shr    {vx}"),
            (shl_v, Operands::V { vx })              => write!(f, "shl    {vx}"),
            (skp_v, Operands::V { vx })              => write!(f, "sek    {vx}"),
            (sknp_v, Operands::V { vx })             => write!(f, "snek   {vx}"),
            (mov_v_dt, Operands::V { vx })           => write!(f, "mov    DT, {vx}"),
            (wkp_v, Operands::V { vx })              => write!(f, "waitk  {vx}"),
            (mov_dt_v, Operands::V { vx })           => write!(f, "mov    {vx}, DT"),
            (mov_st_v, Operands::V { vx })           => write!(f, "mov    {vx}, ST"),
            (add_i_v, Operands::V { vx })            => write!(f, "add    {vx}, I"),
            (font_v, Operands::V { vx })             => write!(f, "font   {vx}, I"),
            (bcd_v, Operands::V { vx })              => write!(f, "bcd    {vx}, &I"),
            (mov_ii_v, Operands::V { vx })           => write!(f, "dmao   {vx}"),
            (mov_v_ii, Operands::V { vx })           => write!(f, "dmai   {vx}"),
            (op, args)                               => write!(f, "{op:?} {args:?}"),
        }
    }
}
