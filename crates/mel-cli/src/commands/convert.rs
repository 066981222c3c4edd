//! Convert command - parse text and print its canonical form.

use clap::ValueEnum;
use mel_runtime::{parse_float, parse_int, to_text};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Target {
    Int,
    Float,
}

pub fn run(target: Target, text: &str) -> miette::Result<()> {
    println!("{}", convert(target, text)?);
    Ok(())
}

pub fn convert(target: Target, text: &str) -> miette::Result<String> {
    let converted = match target {
        Target::Int => parse_int(text).map(to_text),
        Target::Float => parse_float(text).map(to_text),
    };
    converted.map_err(|e| miette::miette!("{}", e))
}
