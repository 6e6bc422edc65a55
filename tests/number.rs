#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        literals in number is OK
        "123"
        "987654"
        "0"
        "-0"
        "123.456"
        "-0.001"
    }

    tests! {
        decimal_math in number is OK
        "false"
        "0.75"
    }

    tests! {
        leading_dot in number is ERR
        "[line 1:7] Error at '.': Expected expression"
    }

    tests! {
        trailing_dot in number is ERR
        "[line 1:11] Error at ';': Expected property name after '.'"
    }
}
