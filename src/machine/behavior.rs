// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Contains implementations for each Chip-8 [Instruction]
//!
//! Every behavior either returns `Ok` having moved the program counter, or
//! returns the [FaultKind] having changed nothing.

use super::{
    instruction::{Instruction, Operands, Operator},
    mem::glyph_offset,
    registers::Register,
    Exec, Machine,
};
use crate::{
    error::FaultKind::*,
    num::{addition_overflow, lsb, msb, subtraction_underflow, Adr, Byte, Nib, ADDRESS_MASK},
};
use rand::Rng;

/// Tallest sprite `draw` will accept
pub const MAX_SPRITE_HEIGHT: Nib = 15;

const W: Adr = Instruction::WIDTH;

impl Machine {
    /// Executes a single [Instruction]
    #[rustfmt::skip]
    pub(super) fn execute(&mut self, insn: Instruction) -> Exec {
        use Operator::*;
        match (insn.op(), insn.args()) {
            (cls,       Operands::None                 ) => self.clear_screen(),
            (ret,       Operands::None                 ) => self.ret(),
            (jmp_a,     Operands::A { address }        ) => self.jump(address),
            (call_a,    Operands::A { address }        ) => self.call(address),
            (seq_v_b,   Operands::VB { vx, byte }      ) => self.skip_equals_immediate(vx, byte),
            (sne_v_b,   Operands::VB { vx, byte }      ) => self.skip_not_equals_immediate(vx, byte),
            (seq_v_v,   Operands::VV { vx, vy }        ) => self.skip_equals(vx, vy),
            (mov_v_b,   Operands::VB { vx, byte }      ) => self.load_immediate(vx, byte),
            (add_v_b,   Operands::VB { vx, byte }      ) => self.add_immediate(vx, byte),
            (mov_v_v,   Operands::VV { vx, vy }        ) => self.load(vx, vy),
            (or_v_v,    Operands::VV { vx, vy }        ) => self.or(vx, vy),
            (and_v_v,   Operands::VV { vx, vy }        ) => self.and(vx, vy),
            (xor_v_v,   Operands::VV { vx, vy }        ) => self.xor(vx, vy),
            (add_v_v,   Operands::VV { vx, vy }        ) => self.add(vx, vy),
            (sub_v_v,   Operands::VV { vx, vy }        ) => self.sub(vx, vy),
            (shr_v,     Operands::V { vx }             ) => self.shift_right(vx),
            (subn_v_v,  Operands::VV { vx, vy }        ) => self.backwards_sub(vx, vy),
            (shl_v,     Operands::V { vx }             ) => self.shift_left(vx),
            (sne_v_v,   Operands::VV { vx, vy }        ) => self.skip_not_equals(vx, vy),
            (mov_i_a,   Operands::A { address }        ) => self.load_i_immediate(address),
            (jmp_v0_a,  Operands::A { address }        ) => self.jump_indexed(address),
            (rnd_v_b,   Operands::VB { vx, byte }      ) => self.rand(vx, byte),
            (drw_v_v_n, Operands::VVN { vx, vy, nibble }) => self.draw(vx, vy, nibble),
            (skp_v,     Operands::V { vx }             ) => self.skip_key_equals(vx),
            (sknp_v,    Operands::V { vx }             ) => self.skip_key_not_equals(vx),
            (mov_v_dt,  Operands::V { vx }             ) => self.load_delay_timer(vx),
            (wkp_v,     Operands::V { vx }             ) => self.wait_for_key(vx),
            (mov_dt_v,  Operands::V { vx }             ) => self.store_delay_timer(vx),
            (mov_st_v,  Operands::V { vx }             ) => self.store_sound_timer(vx),
            (add_i_v,   Operands::V { vx }             ) => self.add_i(vx),
            (font_v,    Operands::V { vx }             ) => self.load_sprite(vx),
            (bcd_v,     Operands::V { vx }             ) => self.bcd_convert(vx),
            (mov_ii_v,  Operands::V { vx }             ) => self.store_dma(vx),
            (mov_v_ii,  Operands::V { vx }             ) => self.load_dma(vx),
            // Instruction::new and Instruction::decode only pair an operator with its own shape
            (op, args) => unreachable!("{op:?} does not take {args:?}"),
        }
    }

    /// Moves on to the next instruction
    #[inline(always)]
    fn next(&mut self) -> Exec {
        self.pc = self.pc.wrapping_add(W);
        Ok(())
    }

    /// Moves past the next instruction if `cond` holds, else moves on to it
    #[inline(always)]
    fn skip_if(&mut self, cond: bool) -> Exec {
        if cond {
            self.pc = self.pc.wrapping_add(W);
        }
        self.next()
    }
}

/// |`0aaa`| Issues a "System call" (ML routine)
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`00e0`| Clear screen memory to all 0       |
/// |`00ee`| Return from subroutine             |
impl Machine {
    /// |`00e0`| Clears the screen memory to 0
    #[inline(always)]
    pub(super) fn clear_screen(&mut self) -> Exec {
        self.screen.clear();
        self.next()
    }
    /// |`00ee`| Returns from subroutine
    #[inline(always)]
    pub(super) fn ret(&mut self) -> Exec {
        self.pc = self.stack.pop().ok_or(EmptyStack)?;
        Ok(())
    }
}

/// |`1aaa`| Sets pc to an absolute address
impl Machine {
    /// |`1aaa`| Sets the program counter to an absolute address
    #[inline(always)]
    pub(super) fn jump(&mut self, a: Adr) -> Exec {
        self.pc = a;
        Ok(())
    }
}

/// |`2aaa`| Pushes pc onto the stack, then jumps to a
impl Machine {
    /// |`2aaa`| Pushes the return address onto the stack, then jumps to a
    #[inline(always)]
    pub(super) fn call(&mut self, a: Adr) -> Exec {
        if !self.stack.push(self.pc.wrapping_add(W)) {
            return Err(FullStack);
        }
        self.pc = a;
        Ok(())
    }
}

/// |`3xbb`| Skips next instruction if register X == b
impl Machine {
    /// |`3xbb`| Skips the next instruction if register X == b
    #[inline(always)]
    pub(super) fn skip_equals_immediate(&mut self, x: Register, b: Byte) -> Exec {
        self.skip_if(self.registers[x] == b)
    }
}

/// |`4xbb`| Skips next instruction if register X != b
impl Machine {
    /// |`4xbb`| Skips the next instruction if register X != b
    #[inline(always)]
    pub(super) fn skip_not_equals_immediate(&mut self, x: Register, b: Byte) -> Exec {
        self.skip_if(self.registers[x] != b)
    }
}

/// |`5xy0`| Skip next instruction if vX == vY
impl Machine {
    /// |`5xy0`| Skips the next instruction if register X == register Y
    #[inline(always)]
    pub(super) fn skip_equals(&mut self, x: Register, y: Register) -> Exec {
        self.skip_if(self.registers[x] == self.registers[y])
    }
}

/// |`6xbb`| Loads immediate byte b into register vX
impl Machine {
    /// |`6xbb`| Loads immediate byte b into register vX
    #[inline(always)]
    pub(super) fn load_immediate(&mut self, x: Register, b: Byte) -> Exec {
        self.registers[x] = b;
        self.next()
    }
}

/// |`7xbb`| Adds immediate byte b to register vX
impl Machine {
    /// |`7xbb`| Adds immediate byte b to register vX. vF is untouched.
    #[inline(always)]
    pub(super) fn add_immediate(&mut self, x: Register, b: Byte) -> Exec {
        self.registers[x] = self.registers[x].wrapping_add(b);
        self.next()
    }
}

/// |`8xyn`| Performs ALU operation
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`8xy0`| X = Y                              |
/// |`8xy1`| X = X | Y                          |
/// |`8xy2`| X = X & Y                          |
/// |`8xy3`| X = X ^ Y                          |
/// |`8xy4`| X = X + Y; Set vF=carry            |
/// |`8xy5`| X = X - Y; Set vF=!borrow          |
/// |`8xy6`| X = X >> 1; Set vF=shifted out     |
/// |`8xy7`| X = Y - X; Set vF=!borrow          |
/// |`8xyE`| X = X << 1; Set vF=shifted out     |
///
/// vF may be named as an operand. The flagging instructions read their
/// operands first, then write vF, then write vX. When X is F, the result wins.
impl Machine {
    /// |`8xy0`| Loads the value of y into x
    #[inline(always)]
    pub(super) fn load(&mut self, x: Register, y: Register) -> Exec {
        self.registers[x] = self.registers[y];
        self.next()
    }
    /// |`8xy1`| Performs bitwise or of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn or(&mut self, x: Register, y: Register) -> Exec {
        self.registers[x] |= self.registers[y];
        self.next()
    }
    /// |`8xy2`| Performs bitwise and of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn and(&mut self, x: Register, y: Register) -> Exec {
        self.registers[x] &= self.registers[y];
        self.next()
    }
    /// |`8xy3`| Performs bitwise xor of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn xor(&mut self, x: Register, y: Register) -> Exec {
        self.registers[x] ^= self.registers[y];
        self.next()
    }
    /// |`8xy4`| Performs addition of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn add(&mut self, x: Register, y: Register) -> Exec {
        let (vx, vy) = (self.registers[x], self.registers[y]);
        self.registers.set_vf(addition_overflow(vx, vy).into());
        self.registers[x] = vx.wrapping_add(vy);
        self.next()
    }
    /// |`8xy5`| Performs subtraction of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn sub(&mut self, x: Register, y: Register) -> Exec {
        let (vx, vy) = (self.registers[x], self.registers[y]);
        self.registers.set_vf((!subtraction_underflow(vx, vy)).into());
        self.registers[x] = vx.wrapping_sub(vy);
        self.next()
    }
    /// |`8xy6`| Performs bitwise right shift of vX
    #[inline(always)]
    pub(super) fn shift_right(&mut self, x: Register) -> Exec {
        let vx = self.registers[x];
        self.registers.set_vf(lsb(vx).into());
        self.registers[x] = vx >> 1;
        self.next()
    }
    /// |`8xy7`| Performs subtraction of vY and vX, and stores the result in vX
    #[inline(always)]
    pub(super) fn backwards_sub(&mut self, x: Register, y: Register) -> Exec {
        let (vx, vy) = (self.registers[x], self.registers[y]);
        self.registers.set_vf((!subtraction_underflow(vy, vx)).into());
        self.registers[x] = vy.wrapping_sub(vx);
        self.next()
    }
    /// |`8xyE`| Performs bitwise left shift of vX
    #[inline(always)]
    pub(super) fn shift_left(&mut self, x: Register) -> Exec {
        let vx = self.registers[x];
        self.registers.set_vf(msb(vx).into());
        self.registers[x] = vx << 1;
        self.next()
    }
}

/// |`9xy0`| Skip next instruction if vX != vY
impl Machine {
    /// |`9xy0`| Skip next instruction if X != y
    #[inline(always)]
    pub(super) fn skip_not_equals(&mut self, x: Register, y: Register) -> Exec {
        self.skip_if(self.registers[x] != self.registers[y])
    }
}

/// |`Aaaa`| Load address #a into register I
impl Machine {
    /// |`Aadr`| Load address #adr into register I
    #[inline(always)]
    pub(super) fn load_i_immediate(&mut self, a: Adr) -> Exec {
        self.registers.i = a;
        self.next()
    }
}

/// |`Baaa`| Jump to &adr + v0
impl Machine {
    /// |`Badr`| Jump to &adr + v0
    ///
    /// The target isn't masked. Jumping past the end of memory faults on the next fetch.
    #[inline(always)]
    pub(super) fn jump_indexed(&mut self, a: Adr) -> Exec {
        self.pc = a.wrapping_add(self.registers[Register::v0] as Adr);
        Ok(())
    }
}

/// |`Cxbb`| Stores a random number & the provided byte into vX
impl Machine {
    /// |`Cxbb`| Stores a random number & the provided byte into vX
    #[inline(always)]
    pub(super) fn rand(&mut self, x: Register, b: Byte) -> Exec {
        self.registers[x] = self.rng.gen::<Byte>() & b;
        self.next()
    }
}

/// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
impl Machine {
    /// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
    ///
    /// Pixels are XORed onto the screen, most significant bit leftmost.
    /// Pixels which land off-screen are clipped. vF is set if any lit
    /// pixel was turned off, and cleared otherwise.
    pub(super) fn draw(&mut self, x: Register, y: Register, n: Nib) -> Exec {
        if n > MAX_SPRITE_HEIGHT {
            return Err(InvalidInstruction);
        }
        let sprite = self
            .memory
            .window(self.registers.i, n as usize)
            .ok_or(InvalidAddress)?;
        let (x0, y0) = (self.registers[x] as usize, self.registers[y] as usize);
        self.registers.set_vf(0);
        for (row, &bits) in sprite.iter().enumerate() {
            for col in 0..Byte::BITS as usize {
                let Some(pixel) = self.screen.pixel_mut(x0 + col, y0 + row) else {
                    continue;
                };
                let bit = bits & (0x80 >> col) != 0;
                if *pixel && bit {
                    self.registers.set_vf(1);
                }
                *pixel ^= bit;
            }
        }
        self.next()
    }
}

/// |`Exbb`| Skips instructions based on key state
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`eX9e`| Skip if key vX is pressed          |
/// |`eXa1`| Skip if key vX is not pressed      |
impl Machine {
    /// |`Ex9E`| Skip next instruction if key == vX
    ///
    /// Keys past `F` are never pressed
    #[inline(always)]
    pub(super) fn skip_key_equals(&mut self, x: Register) -> Exec {
        self.skip_if(self.keys.is_pressed(self.registers[x] as usize))
    }
    /// |`ExaE`| Skip next instruction if key != vX
    #[inline(always)]
    pub(super) fn skip_key_not_equals(&mut self, x: Register) -> Exec {
        self.skip_if(!self.keys.is_pressed(self.registers[x] as usize))
    }
}

/// |`Fxbb`| Performs IO
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`fX07`| Set vX to value in delay timer     |
/// |`fX0a`| Wait for input, store key in vX    |
/// |`fX15`| Set delay timer to the value in vX |
/// |`fX18`| Set sound timer to the value in vX |
/// |`fX1e`| Add vX to I                        |
/// |`fX29`| Load sprite for character x into I |
/// |`fX33`| BCD convert X into I[0..3]         |
/// |`fX55`| DMA Stor from I to registers 0..X  |
/// |`fX65`| DMA Load from I to registers 0..X  |
impl Machine {
    /// |`Fx07`| Get the current DT, and put it in vX
    /// ```py
    /// vX = DT
    /// ```
    #[inline(always)]
    pub(super) fn load_delay_timer(&mut self, x: Register) -> Exec {
        self.registers[x] = self.registers.dt;
        self.next()
    }
    /// |`Fx0A`| Wait for key, then vX = K
    ///
    /// Until a key is held, this doesn't advance, and runs again on the next step.
    /// If several keys are held, the lowest wins.
    #[inline(always)]
    pub(super) fn wait_for_key(&mut self, x: Register) -> Exec {
        match self.keys.first_pressed() {
            Some(key) => {
                self.registers[x] = key as Byte;
                self.next()
            }
            None => Ok(()),
        }
    }
    /// |`Fx15`| Load vX into DT
    /// ```py
    /// DT = vX
    /// ```
    #[inline(always)]
    pub(super) fn store_delay_timer(&mut self, x: Register) -> Exec {
        self.registers.dt = self.registers[x];
        self.next()
    }
    /// |`Fx18`| Load vX into ST
    /// ```py
    /// ST = vX;
    /// ```
    #[inline(always)]
    pub(super) fn store_sound_timer(&mut self, x: Register) -> Exec {
        self.registers.st = self.registers[x];
        self.next()
    }
    /// |`Fx1e`| Add vX to I, wrapping within the 12-bit address space
    /// ```py
    /// I = (I + vX) & 0xfff
    /// ```
    #[inline(always)]
    pub(super) fn add_i(&mut self, x: Register) -> Exec {
        self.registers.i = self.registers.i.wrapping_add(self.registers[x] as Adr) & ADDRESS_MASK;
        self.next()
    }
    /// |`Fx29`| Load sprite for character vX into I
    /// ```py
    /// I = sprite(vX)
    /// ```
    #[inline(always)]
    pub(super) fn load_sprite(&mut self, x: Register) -> Exec {
        let offset = glyph_offset(self.registers[x]).ok_or(InvalidDigit)?;
        self.registers.i = self.font + offset;
        self.next()
    }
    /// |`Fx33`| BCD convert X into I`[0..3]`
    #[inline(always)]
    pub(super) fn bcd_convert(&mut self, x: Register) -> Exec {
        let vx = self.registers[x];
        let digits = self
            .memory
            .window_mut(self.registers.i, 3)
            .ok_or(InvalidAddress)?;
        digits.copy_from_slice(&[vx / 100, vx / 10 % 10, vx % 10]);
        self.next()
    }
    /// |`Fx55`| DMA Stor from I to registers 0..=X
    ///
    /// I is left unchanged
    /// ```py
    /// for n in range(0, X + 1):
    ///     *(I + n) = vN
    /// ```
    #[inline(always)]
    pub(super) fn store_dma(&mut self, x: Register) -> Exec {
        let len = x.range().len();
        let dst = self
            .memory
            .window_mut(self.registers.i, len)
            .ok_or(InvalidAddress)?;
        dst.copy_from_slice(&self.registers.v[..len]);
        self.next()
    }
    /// |`Fx65`| DMA Load from I to registers 0..=X
    ///
    /// I is left unchanged
    /// ```py
    /// for n in range(0, X + 1):
    ///     vN = *(I + n)
    /// ```
    #[inline(always)]
    pub(super) fn load_dma(&mut self, x: Register) -> Exec {
        let len = x.range().len();
        let src = self
            .memory
            .window(self.registers.i, len)
            .ok_or(InvalidAddress)?;
        self.registers.v[..len].copy_from_slice(src);
        self.next()
    }
}
