//! Drives the simulated ESC through a forward ramp, a polarity reversal and
//! an idle decay, logging voltage and commutation progress.

use steppulse_chip::{EscChip, SimHost};

fn run_phase(host: &mut SimHost, chip: &mut EscChip, label: &str, millis: u32) {
    let mut steps = 0u32;
    for _ in 0..millis {
        for _ in 0..10 {
            if host.run_tick(chip).stepped {
                steps += 1;
            }
        }
    }
    log::info!(
        "{label}: t={}ms voltage={:+.3}V phase={} steps={}",
        host.micros() / 1000,
        chip.controller().voltage(),
        chip.controller().step(),
        steps
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut host = SimHost::new();
    let mut chip = EscChip::init(&mut host).expect("chip resources");

    host.set_attr("Tau", 1.0); // tau = 1.0 * 10^-1 s with the default exponent
    host.set_volts("VMOT", 12.0);

    host.set_pin("INA", true);
    run_phase(&mut host, &mut chip, "forward ramp", 1000);

    host.set_pin("INA", false);
    host.set_pin("INB", true);
    run_phase(&mut host, &mut chip, "reversal", 1000);

    host.set_pin("INB", false);
    run_phase(&mut host, &mut chip, "idle decay", 2000);
}
