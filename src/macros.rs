// src/macros.rs

/// `String` shorthand: `s!()` is empty, `s!(x)` is `String::from(x)`.
#[macro_export]
macro_rules! s {
    () => { ::std::string::String::new() };
    ($expr:expr) => { ::std::string::String::from($expr) };
}

/// Concatenate string-ish pieces into one `String`, sized up front.
#[macro_export]
macro_rules! join {
    ($first:expr $(, $rest:expr)+ $(,)?) => {
        match [
            ::core::convert::AsRef::<str>::as_ref(&$first),
            $(::core::convert::AsRef::<str>::as_ref(&$rest)),+
        ] {
            parts => {
                let mut out = ::std::string::String::with_capacity(parts.iter().map(|p| p.len()).sum());
                for p in parts {
                    out.push_str(p);
                }
                out
            }
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn join_mixes_owned_and_borrowed() {
        let owned = s!("b");
        assert_eq!(join!("a", owned, &s!("c"), "d",), "abcd");
        assert_eq!(join!(s!("x").trim(), "y"), "xy");
    }
}
