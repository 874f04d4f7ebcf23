use failure::{format_err, Error};
use shoal::io::FileFormat;


pub mod displace;
pub mod info;


/// Warns if the file extension suggests a different format than `expected`.
/// Files are read anyway, the extension is just a hint.
fn check_extension(filename: &str, expected: FileFormat) {
    match FileFormat::from_extension(filename) {
        Some(format) if format != expected => {
            warn!(
                "'{}' looks like a {} file, but is read as {} file",
                filename,
                format,
                expected,
            );
        }
        _ => {}
    }
}

/// Makes sure we don't accidentally overwrite a file.
fn check_target(path: &str, force: bool) -> Result<(), Error> {
    if !force && std::path::Path::new(path).exists() {
        return Err(format_err!(
            "target file '{}' already exists (use '--force' to overwrite)",
            path,
        ));
    }

    Ok(())
}
