use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

/// Converts an SVG rendering to PNG with ImageMagick, turning the white
/// background transparent.
pub fn convert_svg_to_png<S: AsRef<OsStr>, P: AsRef<Path>>(
    program: S,
    input: P,
    output: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = input.as_ref();
    let output = output.as_ref();
    log::debug!(
        "{} {} -transparent white {}",
        program.as_ref().to_string_lossy(),
        input.display(),
        output.display()
    );

    let proc = Command::new(program.as_ref())
        .arg(input)
        .args(["-transparent", "white"])
        .arg(output)
        .stdin(Stdio::null())
        .output()?;

    if !proc.status.success() {
        return Err(format!(
            "Failed to convert SVG to PNG: {}",
            String::from_utf8_lossy(&proc.stderr)
        )
        .into());
    }

    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn successful_converter() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.svg");
        let output = dir.path().join("out.png");
        assert!(convert_svg_to_png("true", &input, &output).is_ok());
    }

    #[test]
    fn failing_converter() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.svg");
        let output = dir.path().join("out.png");
        let err = convert_svg_to_png("false", &input, &output).unwrap_err();
        assert!(err.to_string().starts_with("Failed to convert SVG to PNG"));
    }

    #[test]
    fn missing_converter() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.svg");
        let output = dir.path().join("out.png");
        assert!(convert_svg_to_png("gplot-no-such-convert", &input, &output).is_err());
    }
}
