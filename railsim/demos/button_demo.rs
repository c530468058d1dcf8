//! Wire a battery, a push button and an LED to a Pico and watch the LED
//! follow the button.
//!
//! Run with `cargo run --example button_demo`.

use railsim::prelude::*;

fn main() -> Result<(), RailSimError> {
    let mut bench = Workbench::new(BoardProfile::builtin("pico")?);
    bench.place(Box::new(Battery::new("bat1", 5.0)))?;
    bench.place(Box::new(PushButton::new("btn1")))?;
    bench.place(Box::new(Led::new("led1")))?;

    bench.connect(PinRef::board("VSYS"), PinRef::component("bat1", "POS"))?;
    bench.connect(PinRef::board("GND1"), PinRef::component("bat1", "NEG"))?;
    bench.connect(PinRef::board("GP15"), PinRef::component("btn1", "VCC"))?;
    bench.connect(PinRef::component("btn1", "SIG"), PinRef::component("led1", "ANODE"))?;
    bench.connect(PinRef::component("led1", "CATHODE"), PinRef::board("GND2"))?;

    // The running program drives GP15 high
    bench.board_mut().pin_states_mut().set("GP15", 1.0);

    let led = Led::new("led1");
    println!("Board powered: {}", bench.is_board_powered());

    for action in [Actuation::Press, Actuation::Release] {
        bench.actuate("btn1", action)?;
        println!(
            "after {:<8} SIG = {:>4}  LED lit = {}",
            action.to_string(),
            bench.pin_level(&PinRef::component("btn1", "SIG")),
            led.is_lit(&mut bench.tracer())
        );
    }

    Ok(())
}
