//! The fallback flag is process-wide, so it is exercised by a single test in
//! its own test binary.

mod common;

use common::capture_logs;
use subview_core::api::{
    SubArray, SubString, SubView, Verbosity, fallback_verbosity, get_verbosity, shared,
    set_fallback_verbosity,
};
use subview_core::values::Value;

const STALE: &str = "source has destructively changed";

#[test]
fn test_fallback_applies_to_unset_specializations_only() {
    let numbers = shared(vec![1, 2, 3]);
    let text = shared("abcdef");
    let ary = SubView::<SubArray>::new(numbers.clone(), 0, 2).unwrap();
    let s = SubView::<SubString>::new(text.clone(), 1, 2).unwrap();

    numbers
        .borrow_mut()
        .as_array_mut()
        .unwrap()
        .push(Value::Int(4));
    text.borrow_mut().as_str_mut().unwrap().push('g');

    // Everything unset: silent.
    assert_eq!(fallback_verbosity(), Verbosity::Unset);
    let (_, output) = capture_logs(|| {
        ary.invoke("size", &[]).unwrap();
        s.invoke("size", &[]).unwrap();
    });
    assert!(!output.contains(STALE), "{output}");

    // Fallback on: both warn.
    assert_eq!(set_fallback_verbosity(true), Verbosity::Unset);
    let (_, output) = capture_logs(|| {
        ary.invoke("size", &[]).unwrap();
        s.invoke("size", &[]).unwrap();
    });
    assert!(output.contains("SubArray[0,2][1, 2]"), "{output}");
    assert!(output.contains("SubString[1,2]\"bc\""), "{output}");

    // An explicit flag beats the fallback.
    SubView::<SubString>::set_verbose(false);
    let (_, output) = capture_logs(|| {
        ary.invoke("size", &[]).unwrap();
        s.invoke("size", &[]).unwrap();
    });
    assert_eq!(output.matches(STALE).count(), 1, "{output}");
    assert!(output.contains("SubArray"), "{output}");

    // Fallback off, array explicitly on.
    set_fallback_verbosity(Verbosity::Disabled);
    SubView::<SubArray>::set_verbose(true);
    assert_eq!(get_verbosity::<SubArray>(), Verbosity::Enabled);
    let (_, output) = capture_logs(|| {
        ary.invoke("size", &[]).unwrap();
        s.invoke("size", &[]).unwrap();
    });
    assert_eq!(output.matches(STALE).count(), 1, "{output}");

    // Back to unset for the array: fallback (disabled) applies.
    SubView::<SubArray>::set_verbose(Verbosity::Unset);
    let (_, output) = capture_logs(|| ary.invoke("size", &[]).unwrap());
    assert!(!output.contains(STALE), "{output}");
}
