#![no_main]
use libfuzzer_sys::fuzz_target;
use wideprintf_core::stdio::{FormatArg, format_into};
use wideprintf_core::string::wcslen;

// Layout: [capacity byte][template bytes...]. Each template byte becomes one
// wide character so directive characters are dense in the corpus.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, rest)) = data.split_first() else {
        return;
    };
    let template: Vec<u32> = rest.iter().map(|&b| u32::from(b)).collect();
    let narrow = b"narrow\0";
    let wide = [u32::from(b'w'), 0x263A, 0];
    let args = [
        FormatArg::SignedInt(-12_345),
        FormatArg::UnsignedInt(u64::MAX),
        FormatArg::NarrowStr(Some(&narrow[..])),
        FormatArg::WideStr(Some(&wide[..])),
        FormatArg::Float(-1.0e-3),
        FormatArg::Char(u32::from(b'c')),
        FormatArg::WideStr(None),
        FormatArg::Float(f64::NAN),
    ];

    // Widths in the template can be huge; the reference run only needs the count.
    let capacity = usize::from(cap);
    let mut buf = vec![0xFFFF_FFFFu32; capacity];
    let count = format_into(&mut buf, &template, &args);

    if capacity > 0 {
        let len = wcslen(&buf);
        assert!(len < capacity, "buffer left unterminated");
        assert_eq!(len, count.min(capacity - 1), "terminator misplaced");
    }

    let mut wider = vec![0u32; capacity + 1];
    assert_eq!(format_into(&mut wider, &template, &args), count);
    assert_eq!(&wider[..wcslen(&buf).min(capacity)], &buf[..wcslen(&buf).min(capacity)]);
});
