#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        syntax in for is OK
        "0"
        "1"
        "2"
    }

    tests! {
        scope in for is OK
        "0"
        "-1"
        "after"
        "0"
    }

    tests! {
        closure_in_body in for is OK
        "4"
        "1"
        "4"
        "2"
        "4"
        "3"
    }

    tests! {
        no_clauses in for is OK
        "done"
    }

    tests! {
        initializer_is_expression in for is OK
        "1"
        "2"
        "3"
    }
}
