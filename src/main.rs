//! act-sim - drives the ACT core from the command line.
//!
//! ROM image loading belongs to the calculator front ends, so the simulator
//! carries a small built-in microprogram: it loads a constant into C,
//! enables the display and counts in the exponent field until the carry
//! pops out, then starts over. Enough to watch every instruction class go
//! by under `--trace`.

use arbitrary_int::u10;
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use structopt::StructOpt;

use woodstock::act::{Act, BANK_WORDS, ROM_BANKS};
use woodstock::register::RegId;

/// Working storage of the base model.
const DATA_REGISTERS: usize = 20;

const DEMO_TICKS: usize = 500;

#[derive(Debug, StructOpt)]
#[structopt(name = "act-sim", about = "Woodstock ACT processor simulator.")]
struct CliOptions {
  /// Trace execution
  #[structopt(short, long)]
  trace: bool,
}

/// The built-in demonstration microprogram.
fn demo_rom() -> Vec<u10> {
  let mut rom = vec![u10::new(0); ROM_BANKS * BANK_WORDS];
  rom[0] = u10::new(0o1760); // hi I'm woodstock
  rom[1] = u10::new(0o1074); // p = 1
  rom[2] = u10::new(0o0330); // load 3
  rom[3] = u10::new(0o0130); // load 1
  rom[4] = u10::new(0o0210); // display toggle
  rom[5] = u10::new(0o0756); // c + 1 -> c[x]
  rom[6] = u10::new(0o0027); // if nc goto 5
  rom[7] = u10::new(0o1020); // return (empty stack lands back at 0)
  rom
}

fn main() {
  let opts = match CliOptions::from_iter_safe(std::env::args()) {
    Ok(opts) => opts,
    Err(e) if e.use_stderr() => {
      eprintln!("{}", e.message);
      std::process::exit(-1);
    }
    Err(e) => {
      // --help and --version land here
      println!("{}", e.message);
      std::process::exit(0);
    }
  };

  let level = if opts.trace { LevelFilter::Trace } else { LevelFilter::Info };
  TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).unwrap();

  let rom = demo_rom();
  let mut act = Act::<DATA_REGISTERS>::new(&rom);
  act.set_trace(opts.trace);

  for _ in 0..DEMO_TICKS {
    if let Err(e) = act.tick() {
      eprintln!("act-sim : {e}");
      std::process::exit(1);
    }
  }

  info!(
    "display {}  A: {:014x}  B: {:014x}  C: {:014x}",
    if act.display_enabled() { "on" } else { "off" },
    act.register(RegId::A).read_parallel(),
    act.register(RegId::B).read_parallel(),
    act.register(RegId::C).read_parallel()
  );
}
