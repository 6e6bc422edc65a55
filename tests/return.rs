#[macro_use]
mod common;

#[cfg(test)]
mod _return {
    tests! {
        after_if in return is OK
        "ok"
    }

    tests! {
        after_while in return is OK
        "ok"
    }

    tests! {
        in_nested_function in return is OK
        "g"
        "f"
    }

    tests! {
        default_value in return is OK
        "nil"
    }

    tests! {
        at_top_level in return is ERR
        "[line 1:1] Error at 'return': Cannot return from top-level code"
    }
}
