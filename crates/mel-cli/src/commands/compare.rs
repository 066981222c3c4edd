//! Compare command - order two strings.

pub fn run(a: &str, b: &str) -> miette::Result<()> {
    println!("{}", mel_runtime::compare(a, b));
    Ok(())
}
