#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        literals in string is OK
        "a string"
        "()"
    }

    tests! {
        multiline in string is OK
        "1"
        "2"
        "3"
    }

    tests! {
        error_after_multiline in string is ERR
        "[line 4:1] Error at 'err': Undefined variable 'err'"
    }
}
