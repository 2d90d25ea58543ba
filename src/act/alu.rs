//! Arithmetic over the register file.
//!
//! Every primitive walks the inclusive nibble range picked by the field
//! selector, least significant nibble first, threading the carry flag
//! through the walk. A missing source or argument reads as zero, which is
//! how `0 -> c[f]`, `a - 1 -> a[f]` and the compare-only forms fall out of
//! the same four routines.

use arbitrary_int::{u4, u10};
use log::trace;

use super::{Act, Error};
use crate::register::{RegId, REG_SIZE};

/// BCD/hex nibble add.
fn add(num1: u4, num2: u4, carry: bool, base: u8) -> (u4, bool) {
  let mut result = num1.value() + num2.value();
  if carry {
    result += 1;
  }
  if result >= base {
    (u4::new(result - base), true)
  } else {
    (u4::new(result), false)
  }
}

/// BCD/hex nibble subtract.
fn sub(num1: u4, num2: u4, borrow: bool, base: u8) -> (u4, bool) {
  let mut result = num1.value() as i8 - num2.value() as i8;
  if borrow {
    result -= 1;
  }
  if result < 0 {
    (u4::new((result + base as i8) as u8), true)
  } else {
    (u4::new(result as u8), false)
  }
}

impl<'rom, const DATA_REGISTERS: usize> Act<'rom, DATA_REGISTERS> {
  /// Decode the 3-bit field code into the selector bounds. P-relative codes
  /// fault if P has been parked outside the register (`p = 14` exists in the
  /// set table).
  fn select_field(&mut self, opcode: u10) -> Result<&'static str, Error> {
    let p = self.p.value() as usize;
    let (first, last, name) = match (opcode.value() >> 2) & 7 {
      0 => {
        if p >= REG_SIZE {
          return Err(Error::InvalidFieldPointer(self.p.value()));
        }
        (p, p, "p")
      }
      1 => {
        if p >= REG_SIZE {
          return Err(Error::InvalidFieldPointer(self.p.value()));
        }
        (0, p, "wp")
      }
      2 => (2, 2, "xs"),
      3 => (0, 1, "x"),
      4 => (REG_SIZE - 1, REG_SIZE - 1, "s"),
      5 => (3, REG_SIZE - 2, "m"),
      6 => (0, REG_SIZE - 1, "w"),
      _ => (3, REG_SIZE - 1, "ms"),
    };
    self.first = first;
    self.last = last;
    Ok(name)
  }

  /// `dst[i] <- src[i]`, or zero with no source.
  pub(super) fn reg_copy(&mut self, dst: RegId, src: Option<RegId>) {
    for i in self.first..=self.last {
      let nibble = match src {
        Some(s) => self.regs[s as usize].read_nibble(i),
        None => u4::new(0),
      };
      self.regs[dst as usize].write_nibble(i, nibble);
    }
  }

  /// Swap two registers over the field. Carry is untouched.
  pub(super) fn reg_exch(&mut self, x: RegId, y: RegId) {
    for i in self.first..=self.last {
      let nibble = self.regs[x as usize].read_nibble(i);
      self.regs[x as usize].write_nibble(i, self.regs[y as usize].read_nibble(i));
      self.regs[y as usize].write_nibble(i, nibble);
    }
  }

  /// `dst[i] <- src[i] + arg[i] + carry`. A missing destination makes this a
  /// compare, a missing operand reads as zero.
  pub(super) fn reg_add(&mut self, dst: Option<RegId>, src: Option<RegId>, arg: Option<RegId>) {
    for i in self.first..=self.last {
      let s = match src {
        Some(r) => self.regs[r as usize].read_nibble(i),
        None => u4::new(0),
      };
      let a = match arg {
        Some(r) => self.regs[r as usize].read_nibble(i),
        None => u4::new(0),
      };
      let (nibble, carry) = add(s, a, self.flags.carry, self.base);
      self.flags.carry = carry;
      if let Some(d) = dst {
        self.regs[d as usize].write_nibble(i, nibble);
      }
    }
  }

  /// `dst[i] <- src[i] - arg[i] - carry`, borrowing through the carry flag.
  pub(super) fn reg_sub(&mut self, dst: Option<RegId>, src: Option<RegId>, arg: Option<RegId>) {
    for i in self.first..=self.last {
      let s = match src {
        Some(r) => self.regs[r as usize].read_nibble(i),
        None => u4::new(0),
      };
      let a = match arg {
        Some(r) => self.regs[r as usize].read_nibble(i),
        None => u4::new(0),
      };
      let (nibble, carry) = sub(s, a, self.flags.carry, self.base);
      self.flags.carry = carry;
      if let Some(d) = dst {
        self.regs[d as usize].write_nibble(i, nibble);
      }
    }
  }

  /// Equality test; carry clear means equal ("do if true").
  pub(super) fn reg_test_eq(&mut self, src: RegId, arg: Option<RegId>) {
    self.flags.carry = false;
    for i in self.first..=self.last {
      let a = match arg {
        Some(r) => self.regs[r as usize].read_nibble(i),
        None => u4::new(0),
      };
      if self.regs[src as usize].read_nibble(i) != a {
        self.flags.carry = true;
        break;
      }
    }
  }

  /// Inequality test; carry clear means unequal.
  pub(super) fn reg_test_ne(&mut self, src: RegId, arg: Option<RegId>) {
    self.flags.carry = true;
    for i in self.first..=self.last {
      let a = match arg {
        Some(r) => self.regs[r as usize].read_nibble(i),
        None => u4::new(0),
      };
      if self.regs[src as usize].read_nibble(i) != a {
        self.flags.carry = false;
        break;
      }
    }
  }

  /// Shift the field one nibble toward the most significant end. Clears both
  /// carry flags.
  pub(super) fn reg_shl(&mut self, r: RegId) {
    for i in (self.first..=self.last).rev() {
      let nibble = if i == self.first {
        u4::new(0)
      } else {
        self.regs[r as usize].read_nibble(i - 1)
      };
      self.regs[r as usize].write_nibble(i, nibble);
    }
    self.flags.prev_carry = false;
    self.flags.carry = false;
  }

  /// Shift the field one nibble toward the least significant end. Clears
  /// carry.
  pub(super) fn reg_shr(&mut self, r: RegId) {
    self.flags.carry = false;
    for i in self.first..=self.last {
      let nibble = if i == self.last {
        u4::new(0)
      } else {
        self.regs[r as usize].read_nibble(i + 1)
      };
      self.regs[r as usize].write_nibble(i, nibble);
    }
  }

  /// Increment over the field by adding the carry in.
  pub(super) fn reg_inc(&mut self, r: RegId) {
    self.flags.carry = true;
    self.reg_add(Some(r), Some(r), None);
  }

  /// The `10` class: 32 arithmetic variants crossed with the field selector.
  /// Compare forms run the short-branch protocol on their verdict.
  pub(super) fn exec_arith(&mut self, opcode: u10) -> Result<(), Error> {
    let field = self.select_field(opcode)?;
    match (opcode.value() >> 5) as u8 {
      0o00 => {
        trace!("0 -> a[{field}]");
        self.reg_copy(RegId::A, None);
      }
      0o01 => {
        trace!("0 -> b[{field}]");
        self.reg_copy(RegId::B, None);
      }
      0o02 => {
        trace!("a exch b[{field}]");
        self.reg_exch(RegId::A, RegId::B);
      }
      0o03 => {
        trace!("a -> b[{field}]");
        self.reg_copy(RegId::B, Some(RegId::A));
      }
      0o04 => {
        trace!("a exch c[{field}]");
        self.reg_exch(RegId::A, RegId::C);
      }
      0o05 => {
        trace!("c -> a[{field}]");
        self.reg_copy(RegId::A, Some(RegId::C));
      }
      0o06 => {
        trace!("b -> c[{field}]");
        self.reg_copy(RegId::C, Some(RegId::B));
      }
      0o07 => {
        trace!("b exch c[{field}]");
        self.reg_exch(RegId::B, RegId::C);
      }
      0o10 => {
        trace!("0 -> c[{field}]");
        self.reg_copy(RegId::C, None);
      }
      0o11 => {
        trace!("a + b -> a[{field}]");
        self.reg_add(Some(RegId::A), Some(RegId::A), Some(RegId::B));
      }
      0o12 => {
        trace!("a + c -> a[{field}]");
        self.reg_add(Some(RegId::A), Some(RegId::A), Some(RegId::C));
      }
      0o13 => {
        trace!("c + c -> c[{field}]");
        self.reg_add(Some(RegId::C), Some(RegId::C), Some(RegId::C));
      }
      0o14 => {
        trace!("a + c -> c[{field}]");
        self.reg_add(Some(RegId::C), Some(RegId::C), Some(RegId::A));
      }
      0o15 => {
        trace!("a + 1 -> a[{field}]");
        self.reg_inc(RegId::A);
      }
      0o16 => {
        trace!("shift left a[{field}]");
        self.reg_shl(RegId::A);
      }
      0o17 => {
        trace!("c + 1 -> c[{field}]");
        self.reg_inc(RegId::C);
      }
      0o20 => {
        trace!("a - b -> a[{field}]");
        self.reg_sub(Some(RegId::A), Some(RegId::A), Some(RegId::B));
      }
      0o21 => {
        trace!("a - c -> c[{field}]");
        self.reg_sub(Some(RegId::C), Some(RegId::A), Some(RegId::C));
      }
      0o22 => {
        trace!("a - 1 -> a[{field}]");
        self.flags.carry = true;
        self.reg_sub(Some(RegId::A), Some(RegId::A), None);
      }
      0o23 => {
        trace!("c - 1 -> c[{field}]");
        self.flags.carry = true;
        self.reg_sub(Some(RegId::C), Some(RegId::C), None);
      }
      0o24 => {
        trace!("0 - c -> c[{field}]");
        self.reg_sub(Some(RegId::C), None, Some(RegId::C));
      }
      0o25 => {
        trace!("0 - c - 1 -> c[{field}]");
        self.flags.carry = true;
        self.reg_sub(Some(RegId::C), None, Some(RegId::C));
      }
      0o26 => {
        trace!("if b[{field}] = 0");
        self.reg_test_eq(RegId::B, None);
        self.short_branch()?;
      }
      0o27 => {
        trace!("if c[{field}] = 0");
        self.reg_test_eq(RegId::C, None);
        self.short_branch()?;
      }
      0o30 => {
        trace!("if a >= c[{field}]");
        self.reg_sub(None, Some(RegId::A), Some(RegId::C));
        self.short_branch()?;
      }
      0o31 => {
        trace!("if a >= b[{field}]");
        self.reg_sub(None, Some(RegId::A), Some(RegId::B));
        self.short_branch()?;
      }
      0o32 => {
        trace!("if a[{field}] <> 0");
        self.reg_test_ne(RegId::A, None);
        self.short_branch()?;
      }
      0o33 => {
        trace!("if c[{field}] <> 0");
        self.reg_test_ne(RegId::C, None);
        self.short_branch()?;
      }
      0o34 => {
        trace!("a - c -> a[{field}]");
        self.reg_sub(Some(RegId::A), Some(RegId::A), Some(RegId::C));
      }
      0o35 => {
        trace!("shift right a[{field}]");
        self.reg_shr(RegId::A);
      }
      0o36 => {
        trace!("shift right b[{field}]");
        self.reg_shr(RegId::B);
      }
      _ => {
        // 0o37
        trace!("shift right c[{field}]");
        self.reg_shr(RegId::C);
      }
    }
    Ok(())
  }
}
