//! Bakes the optional clock settings into the firmware.
//!
//! Values come from the build environment or a `.env` file next to this
//! crate; the environment wins. The firmware picks them up with
//! `option_env!` and parses them on boot.

const BAKED_KEYS: [&str; 2] = ["TICKWATCH_START_TIME", "TICKWATCH_TIME_FORMAT"];

fn main() {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();

    for key in BAKED_KEYS {
        println!("cargo:rerun-if-env-changed={key}");
        if let Ok(value) = std::env::var(key) {
            println!("cargo:rustc-env={key}={value}");
        }
    }

    println!("cargo:rustc-link-arg=-Tlinkall.x");
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-changed=build.rs");
}
