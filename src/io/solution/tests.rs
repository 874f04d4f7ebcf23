use std::io::Cursor;

use failure::Error as AnyError;

use super::*;


fn reader(s: &'static str) -> Reader<Cursor<&'static [u8]>> {
    Reader::new(Cursor::new(s.as_bytes()))
}

#[test]
fn square() -> Result<(), AnyError> {
    let field = Reader::new(include_test_file!("square.sol")).read(4)?;
    assert_eq!(field.real(), &[1.0, 0.0, 0.5, -0.25]);
    assert_eq!(field.imag(), &[0.0, 1.0, -0.25, 1.5]);
    Ok(())
}

#[test]
fn record_variants() -> Result<(), AnyError> {
    let field = reader("1 2i\n3-4i\n 5\t6 i \n7 8\n-1e-1+2E1i\n").read(5)?;
    assert_eq!(field.real(), &[1.0, 3.0, 5.0, 7.0, -0.1]);
    assert_eq!(field.imag(), &[2.0, -4.0, 6.0, 8.0, 20.0]);
    Ok(())
}

#[test]
fn malformed_records() {
    let cases = ["1\n", "1 x\n", "a 1i\n", "1 2i 3\n", "1 2j\n", "1 2ii\n"];
    for case in &cases {
        match reader(case).read(1) {
            Err(Error::MalformedRecord { line: 1, .. }) => {}
            other => panic!("unexpected result for {:?}: {:?}", case, other),
        }
    }
}

#[test]
fn too_few_records() {
    match reader("1 0i\n\n2 0i\n").read(3) {
        Err(Error::UnexpectedEof { line: 3 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn huge_vertex_count_fails_at_eof() {
    match reader("1 0i\n").read(usize::max_value()) {
        Err(Error::UnexpectedEof { line: 1 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn too_many_records() -> Result<(), AnyError> {
    match reader("1 0i\n2 0i\n3 0i\n").read(2) {
        Err(Error::CountMismatch { expected: 2, found: 3 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    let field = reader("1 0i\n2 0i\n3 0i\n").lenient().read(2)?;
    assert_eq!(field.real(), &[1.0, 2.0]);

    // Trailing blank lines are fine in strict mode.
    let field = reader("1 0i\n2 0i\n\n\n").read(2)?;
    assert_eq!(field.len(), 2);
    Ok(())
}

#[test]
fn empty_mesh() -> Result<(), AnyError> {
    assert!(reader("").read(0)?.is_empty());
    assert!(reader("1 0i\n").strict(false).read(0)?.is_empty());
    Ok(())
}

#[test]
fn missing_file() {
    let opener = crate::io::MemOpener::new();
    match load_with(&opener, "nope.sol", 3) {
        Err(e) => assert!(e.is_unavailable()),
        Ok(_) => panic!("loading a missing file succeeded"),
    }
    assert_eq!(opener.open_count(), 1);
}
