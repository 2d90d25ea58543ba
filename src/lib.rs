#![no_std]
#![forbid(unsafe_code)]

//! The ACT (Arithmetic, Control and Timing) chip powered HP's Woodstock
//! series of scientific pocket calculators, starting with the HP-21 in 1975.
//! It merged the two chips of the earlier Classic series (Arithmetic &
//! Registers plus Control & Timing) into a single processor with a 56-bit
//! BCD register file, a 16-bit status word and a banked 10-bit instruction
//! ROM.
//!
//! The host owns the event loop: it latches key codes between ticks, calls
//! [`act::Act::tick`] once per instruction, and reads registers A and B back
//! to drive the LED display.

pub mod register;
pub mod ram;
pub mod act;
