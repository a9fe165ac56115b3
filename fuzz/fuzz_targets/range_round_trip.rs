#![no_main]

use arbitrary::Arbitrary;
use editbridge::{prelude::*, range};

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    start: u16,
    end: u16,
}

libfuzzer_sys::fuzz_target!(|input: Input| {
    let text = &input.text;
    let offsets = Utf16Range::new(input.start as usize, input.end as usize);

    // Clamping never produces a range the checked conversions reject.
    let chars = range::to_char_range(text, offsets);
    assert!(chars.end <= range::char_count(text));
    let units = range::checked_to_code_unit_range(text, chars).expect("clamped char range is valid");
    assert_eq!(range::checked_to_char_range(text, units), Ok(chars));

    let units = range::to_code_unit_range(text, CharRange::new(input.start as usize, input.end as usize));
    assert!(units.end <= range::utf16_len(text));
    let chars = range::checked_to_char_range(text, units).expect("clamped code-unit range is valid");
    assert_eq!(range::checked_to_code_unit_range(text, chars), Ok(units));
});
