use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", swipe_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        swipe_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: decoder.sigma={}, decoder.beam_width={}, decoder.max_results={}, penalty.common_words={}",
        s.decoder.sigma,
        s.decoder.beam_width,
        s.decoder.max_results,
        s.penalty.common_words().len()
    );
}
