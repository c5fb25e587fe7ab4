use vergen::EmitBuilder;

fn main() {
    // Outside a git checkout the describe string is simply left unset.
    if let Err(error) = EmitBuilder::builder()
        .git_describe(true, true, None)
        .emit()
    {
        println!("cargo:warning=Unable to emit git describe: {error}");
    }
}
