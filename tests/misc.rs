#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    tests! {
        precedence in misc is OK
        "14"
        "8"
        "4"
        "0"
        "4"
        "true"
        "true"
    }

    tests! {
        clock in misc is OK
        "true"
    }

    tests! {
        empty_file in misc is OK
    }

    tests! {
        unterminated_string in misc is ERR
        "[line 1:7] Error: Unterminated string"
    }

    tests! {
        unexpected_character in misc is ERR
        "[line 1:9] Error: Unexpected character '|'"
    }
}
