use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

const DEFAULT_CLOCK_HZ: u32 = 8_000_000;
const NRF51_CLOCK_HZ: u32 = 16_000_000;
const NRF52832_CLOCK_HZ: u32 = 64_000_000;
const DEFAULT_INTERVAL_MS: u32 = 500;

fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

    let mut feature_count = 0;

    if cfg!(feature = "nrf51") {
        feature_count += 1;
    }

    if cfg!(feature = "nrf52832") {
        feature_count += 1;
    }

    if feature_count > 1 {
        panic!("\n\nAt most one board may be selected!\nChoices: 'nrf51' or 'nrf52832'\n\n");
    }

    if cfg!(feature = "rt") && !cfg!(feature = "disable-linker-script") {
        // Put the linker script somewhere the linker can find it
        let linker = if cfg!(feature = "nrf51") {
            include_bytes!("memory_nrf51.x").as_ref()
        } else if cfg!(feature = "nrf52832") {
            include_bytes!("memory_nrf52832.x").as_ref()
        } else {
            panic!("\n\nThe 'rt' feature needs a board for linker script generation!\nChoices: 'nrf51' or 'nrf52832'\n\n");
        };

        File::create(out.join("memory.x"))
            .unwrap()
            .write_all(linker)
            .unwrap();
        println!("cargo:rustc-link-search={}", out.display());

        println!("cargo:rerun-if-changed=memory_nrf51.x");
        println!("cargo:rerun-if-changed=memory_nrf52832.x");
    }

    // Bake the timing parameters into the crate.
    // Without an explicit clock, calibrate for the selected board's core.
    let board_clock_hz = if cfg!(feature = "nrf51") {
        NRF51_CLOCK_HZ
    } else if cfg!(feature = "nrf52832") {
        NRF52832_CLOCK_HZ
    } else {
        DEFAULT_CLOCK_HZ
    };
    let clock_hz = env_u32("BLINKY_CLOCK_HZ", board_clock_hz);
    if clock_hz < 1_000 {
        panic!(
            "\n\nBLINKY_CLOCK_HZ must be at least 1000 Hz to calibrate a millisecond delay (got {})\n\n",
            clock_hz
        );
    }

    let interval_ms = env_u32("BLINKY_INTERVAL_MS", DEFAULT_INTERVAL_MS);
    if interval_ms == 0 {
        panic!("\n\nBLINKY_INTERVAL_MS must not be zero\n\n");
    }

    let mut config = File::create(out.join("config.rs")).unwrap();
    writeln!(config, "/// Core clock frequency the delays are calibrated against, in Hz.").unwrap();
    writeln!(config, "pub const CLOCK_HZ: u32 = {};", clock_hz).unwrap();
    writeln!(config, "/// Time between two toggles, in milliseconds.").unwrap();
    writeln!(config, "pub const INTERVAL_MS: u32 = {};", interval_ms).unwrap();

    println!("cargo:rerun-if-env-changed=BLINKY_CLOCK_HZ");
    println!("cargo:rerun-if-env-changed=BLINKY_INTERVAL_MS");
    println!("cargo:rerun-if-changed=build.rs");
}

fn env_u32(name: &str, default: u32) -> u32 {
    match env::var(name) {
        Ok(value) => value.trim().replace('_', "").parse().unwrap_or_else(|_| {
            panic!("\n\n{} must be an unsigned 32-bit integer (got {:?})\n\n", name, value)
        }),
        Err(env::VarError::NotPresent) => default,
        Err(env::VarError::NotUnicode(value)) => {
            panic!("\n\n{} is not valid unicode (got {:?})\n\n", name, value)
        }
    }
}
