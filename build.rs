use shadow_rs::BuildPattern;
use shadow_rs::ShadowBuilder;
use shadow_rs::ShadowError;

/// Embeds build metadata for `maze-search --version`.
fn main() -> Result<(), ShadowError> {
    ShadowBuilder::builder()
        .build_pattern(BuildPattern::Lazy)
        .deny_const(Default::default())
        .build()?;

    Ok(())
}
