//! End-to-end tests driving the chip through the software host, the way the
//! real simulation scheduler would.

use steppulse_algo::motor_driver::step_planner::STOPPED_INTERVAL_US;
use steppulse_chip::{pinout, EscChip, SimHost};

fn bench() -> (SimHost, EscChip) {
    let mut host = SimHost::new();
    let mut chip = EscChip::init(&mut host).expect("chip resources");
    host.set_attr("Tau", 1.0); // 0.1 s with the default exponent of -1
    host.set_volts("VMOT", 12.0);
    // Flush the initial tau into the filter before stimulus
    host.run_tick(&mut chip);
    (host, chip)
}

fn run_collecting_steps(
    host: &mut SimHost,
    chip: &mut EscChip,
    millis: u32,
) -> Vec<u8> {
    let mut phases = Vec::new();
    for _ in 0..millis * 10 {
        if host.run_tick(chip).stepped {
            phases.push(chip.controller().step());
        }
    }
    phases
}

#[test]
fn forward_drive_commutates_cyclically() {
    let (mut host, mut chip) = bench();
    host.set_pin("INA", true);
    let phases = run_collecting_steps(&mut host, &mut chip, 3000);

    // 60 RPM at full scale is 5000 us/step; with the 0.1 s ramp deducted
    // that is just under 600 steps in 3 s
    assert!(
        phases.len() > 540 && phases.len() < 600,
        "got {} steps",
        phases.len()
    );
    for (i, phase) in phases.iter().enumerate() {
        assert_eq!(*phase as usize, (i + 1) % 4);
    }
    assert!(host.pin_volts("Vout") > 0.99);
}

#[test]
fn reverse_drive_commutates_backwards() {
    let (mut host, mut chip) = bench();
    host.set_pin("INB", true);
    let phases = run_collecting_steps(&mut host, &mut chip, 1000);

    assert!(phases.len() > 100);
    // Starting at phase 0 and retreating: 3, 2, 1, 0, 3, ...
    for (i, phase) in phases.iter().enumerate() {
        assert_eq!(*phase as usize, (7 - i % 4) % 4);
    }
    assert!(host.pin_volts("Vout") > 0.99);
}

#[test]
fn phase_pins_follow_the_latched_pattern() {
    let (mut host, mut chip) = bench();

    // Before the first commutation the outputs are never driven
    host.run_ticks(&mut chip, 10);
    assert!(!host.pin_level("A-") && !host.pin_level("A+"));
    assert!(!host.pin_level("B+") && !host.pin_level("B-"));

    host.set_pin("INA", true);
    let mut seen_step = false;
    for _ in 0..30_000 {
        let out = host.run_tick(&mut chip);
        if out.stepped {
            seen_step = true;
            assert_eq!(host.pin_level("A-"), out.phases[0]);
            assert_eq!(host.pin_level("A+"), out.phases[1]);
            assert_eq!(host.pin_level("B+"), out.phases[2]);
            assert_eq!(host.pin_level("B-"), out.phases[3]);
        }
    }
    assert!(seen_step);
}

#[test]
fn idle_input_decays_to_stopped_and_stays_put() {
    let (mut host, mut chip) = bench();
    host.set_pin("INA", true);
    host.run_millis(&mut chip, 1000);
    assert!(chip.controller().voltage() > 4.9);

    // Release the drive input and let the voltage bleed off
    host.set_pin("INA", false);
    host.run_millis(&mut chip, 2500);
    assert_eq!(chip.controller().step_interval_us(), STOPPED_INTERVAL_US);

    // No commutation for arbitrarily long once stopped
    let resting_phase = chip.controller().step();
    let phases = run_collecting_steps(&mut host, &mut chip, 2000);
    assert!(phases.is_empty());
    assert_eq!(chip.controller().step(), resting_phase);
}

#[test]
fn override_attribute_bypasses_the_filter() {
    let (mut host, mut chip) = bench();
    host.set_attr("OverrideVoltage", 2.5);
    host.set_attr("OverrideEnable", 1.0);

    let out = host.run_tick(&mut chip);
    assert_eq!(chip.controller().voltage(), 2.5);
    assert_eq!(out.vout_norm, 0.5);
    assert_eq!(host.pin_volts(pinout::VOUT.name()), 0.5);

    // Half scale halves the speed: 30 RPM -> 10_000 us/step
    let phases = run_collecting_steps(&mut host, &mut chip, 1000);
    assert!(
        phases.len() >= 99 && phases.len() <= 101,
        "got {} steps",
        phases.len()
    );

    // Releasing the override resumes smooth decay from the forced value
    host.set_attr("OverrideEnable", 0.0);
    host.run_tick(&mut chip);
    let v = chip.controller().voltage();
    assert!(v < 2.5 && v > 2.4);
}

#[test]
fn max_speed_attribute_rescales_the_cadence() {
    let (mut host, mut chip) = bench();
    host.set_pin("INA", true);
    host.run_millis(&mut chip, 1000); // settle near full scale
    assert_eq!(chip.controller().step_interval_us(), 5000);

    host.set_attr("MaxSpeed", 120.0);
    host.run_tick(&mut chip);
    assert_eq!(chip.controller().step_interval_us(), 2500);
}
